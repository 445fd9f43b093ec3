// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the tmvrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Core(#[from] tmv_core::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("not logged in\n  hint: run 'tmv login' to authorize this tool")]
    NotLoggedIn,

    #[error("authorization failed: {0}\n  hint: check the client id and secret, then run 'tmv login' again")]
    Auth(String),

    #[error("transport error: {0}")]
    Transport(#[from] crate::http::TransportError),

    #[error("space not found: '{0}'\n  hint: run 'tmv spaces' to list the spaces you can access")]
    SpaceNotFound(String),

    #[error("source and destination are the same space: '{0}'")]
    SameSpace(String),

    #[error("line {line}: {reason}")]
    ParseLineError { line: usize, reason: String },

    #[error("operation cancelled")]
    Cancelled,

    #[error("ticket numbers already exist in destination: {}\n  hint: pass --renumber to assign new numbers", format_numbers(numbers))]
    Collision { numbers: Vec<u64> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

fn format_numbers(numbers: &[u64]) -> String {
    numbers
        .iter()
        .map(|n| format!("#{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A specialized Result type for tmvrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
