// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod login;
pub mod migrate;
pub mod spaces;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::debug;

use crate::config::{Config, TokenConfig};
use crate::error::{Error, Result};
use crate::http::{ApiRemote, ClientSettings, HttpClient, Tokens, Transport};
use crate::prompt::Prompt;
use tmv_core::model::Space;
use tmv_core::Remote;

/// Prompts for missing application credentials and saves them to `path`.
pub fn ensure_application<R: BufRead, W: Write>(
    config: &mut Config,
    path: &Path,
    prompt: &mut Prompt<R, W>,
) -> Result<()> {
    if config.client_credentials().is_some() {
        return Ok(());
    }
    prompt.say("No application is configured. Register one with the service, then enter its keys.")?;
    let client_id = prompt.ask_required("Client id: ")?;
    let client_secret = prompt.ask_required("Client secret: ")?;

    let mut stored = Config::load_from(path)?;
    stored.application.client_id = Some(client_id);
    stored.application.client_secret = Some(client_secret);
    stored.save_to(path)?;
    config.application = stored.application;
    Ok(())
}

/// Builds the API remote from the stored tokens.
pub fn connect<T: Transport>(transport: T, config: &Config) -> Result<ApiRemote<T>> {
    let settings = ClientSettings::from_config(config)?;
    let tokens = match (&config.tokens.bearer_token, &config.tokens.refresh_token) {
        (Some(access), Some(refresh)) => Tokens {
            access_token: access.clone(),
            refresh_token: refresh.clone(),
        },
        _ => return Err(Error::NotLoggedIn),
    };
    Ok(ApiRemote::new(
        HttpClient::new(transport, settings).with_tokens(tokens),
    ))
}

/// Saves `tokens` to `path` when they differ from the loaded configuration.
pub fn persist_tokens(path: &Path, config: &Config, tokens: Option<&Tokens>) -> Result<()> {
    let Some(tokens) = tokens else {
        return Ok(());
    };
    let unchanged = config.tokens.bearer_token.as_deref() == Some(tokens.access_token.as_str())
        && config.tokens.refresh_token.as_deref() == Some(tokens.refresh_token.as_str());
    if unchanged {
        return Ok(());
    }

    let mut stored = Config::load_from(path)?;
    stored.tokens = TokenConfig {
        bearer_token: Some(tokens.access_token.clone()),
        refresh_token: Some(tokens.refresh_token.clone()),
    };
    stored.save_to(path)?;
    debug!("saved tokens to {}", path.display());
    Ok(())
}

/// Looks a space up by name, falling back to its id.
pub fn find_space<R: Remote + ?Sized>(remote: &mut R, name: &str) -> Result<Space> {
    let spaces = remote.list_spaces()?;
    spaces
        .iter()
        .find(|s| s.name == name)
        .or_else(|| spaces.iter().find(|s| s.id == name))
        .cloned()
        .ok_or_else(|| Error::SpaceNotFound(name.to_string()))
}
