// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{BufRead, Write};
use std::path::Path;

use tracing::info;

use super::{ensure_application, persist_tokens};
use crate::config::{config_path, Config};
use crate::error::{Error, Result};
use crate::http::{ClientSettings, HttpClient, Transport, UreqTransport};
use crate::prompt::Prompt;

pub fn run() -> Result<()> {
    let path = config_path()?;
    let config = Config::load()?;
    let transport = UreqTransport::new(config.api.timeout());
    run_impl(&path, config, transport, &mut Prompt::stdio())
}

/// Internal implementation that accepts the transport and prompt for testing.
pub(crate) fn run_impl<T: Transport, R: BufRead, W: Write>(
    path: &Path,
    mut config: Config,
    transport: T,
    prompt: &mut Prompt<R, W>,
) -> Result<()> {
    ensure_application(&mut config, path, prompt)?;
    let mut client = HttpClient::new(transport, ClientSettings::from_config(&config)?);

    prompt.say("Open this page and allow access to get a PIN code:")?;
    prompt.say(&format!("  {}", client.authorize_url()))?;
    let pin = prompt.ask("PIN code: ")?;
    if pin.is_empty() {
        return Err(Error::Cancelled);
    }

    let tokens = client.exchange_pin(&pin)?;
    persist_tokens(path, &config, Some(&tokens))?;
    info!("stored tokens in {}", path.display());
    prompt.say("Logged in.")?;
    Ok(())
}

#[cfg(test)]
#[path = "login_tests.rs"]
mod tests;
