// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for tmv-core operations.

use thiserror::Error;

/// Reason prefix the upstream API uses for missing records.
pub const NOT_FOUND_PREFIX: &str = "Not found";

/// All possible errors that can occur while reconciling two spaces.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested record does not exist in the space.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote rejected a read or write for any reason other than not-found.
    #[error("remote rejected request (status {status}): {reason}")]
    Remote { status: u16, reason: String },

    /// A ticket references a taxonomy id or number that was never reconciled.
    #[error("inconsistent state: ticket #{ticket} has {field} '{id}' with no translation\n  hint: taxonomy and number reconciliation must complete before tickets are copied")]
    InconsistentState {
        ticket: u64,
        field: &'static str,
        id: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classifies a failed remote call by its status and reason string.
    pub fn from_status(status: u16, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        if status == 404 || reason.starts_with(NOT_FOUND_PREFIX) {
            Error::NotFound(reason)
        } else {
            Error::Remote { status, reason }
        }
    }

    /// Returns true for the recoverable not-found kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// The human reason string surfaced when a run aborts.
    pub fn reason(&self) -> String {
        match self {
            Error::NotFound(reason) | Error::Remote { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

/// A specialized Result type for tmv-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
