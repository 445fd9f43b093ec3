// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};

use super::{connect, ensure_application, persist_tokens};
use crate::config::{config_path, Config};
use crate::error::Result;
use crate::http::UreqTransport;
use crate::prompt::Prompt;
use tmv_core::Remote;

pub fn run() -> Result<()> {
    let path = config_path()?;
    let mut config = Config::load()?;
    ensure_application(&mut config, &path, &mut Prompt::stdio())?;
    let mut remote = connect(UreqTransport::new(config.api.timeout()), &config)?;

    let result = run_impl(&mut remote, &mut io::stdout());
    persist_tokens(&path, &config, remote.client().tokens())?;
    result
}

/// Internal implementation that accepts the remote and output for testing.
pub(crate) fn run_impl<R: Remote + ?Sized, W: Write>(remote: &mut R, out: &mut W) -> Result<()> {
    let mut spaces = remote.list_spaces()?;
    if spaces.is_empty() {
        writeln!(out, "No spaces found.")?;
        return Ok(());
    }
    spaces.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    let width = spaces.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for space in &spaces {
        writeln!(out, "{:<width$}  {}", space.name, space.id, width = width)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "spaces_tests.rs"]
mod tests;
