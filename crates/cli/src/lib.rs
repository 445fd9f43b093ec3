// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tmvrs - ticket migration between hosted workspaces.
//!
//! This crate provides the collaborator layer around the `tmv-core`
//! migration engine for the `tmv` CLI tool.
//!
//! # Main Components
//!
//! - [`http`] - REST transport, OAuth token handling, and the [`http::ApiRemote`]
//!   implementation of [`tmv_core::Remote`]
//! - [`Config`] - User configuration (application keys, tokens, API settings)
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use tmvrs::{run, Command};
//!
//! run(Command::Spaces)?;
//! ```

mod cli;
mod commands;
mod prompt;

pub mod config;
pub mod env;
pub mod error;
pub mod http;
pub mod logging;

pub use cli::{Cli, Command, MigrateArgs};
pub use config::Config;
pub use error::{Error, Result};

use clap::CommandFactory;
use clap_complete::generate;

/// Runs one parsed command.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Login => commands::login::run(),
        Command::Spaces => commands::spaces::run(),
        Command::Migrate(args) => commands::migrate::run(args),
        Command::Completion { shell } => {
            generate(shell, &mut Cli::command(), "tmv", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
