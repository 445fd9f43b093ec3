// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup for the binary.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::env;

/// Filter directives: `RUST_LOG` when set, otherwise `debug` or `info`.
pub fn filter_directives(verbose: bool, env_filter: Option<String>) -> String {
    match env_filter.filter(|f| !f.trim().is_empty()) {
        Some(directives) => directives,
        None if verbose => "debug".to_string(),
        None => "info".to_string(),
    }
}

/// Opens `path` for appending, creating it when missing.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber.
///
/// Logs go to stderr, or are appended to `log_file` without ANSI colors.
/// A log file that cannot be opened is reported and logs go to stderr.
pub fn init(verbose: bool, log_file: Option<&Path>) {
    let directives = filter_directives(verbose, env::log_filter());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let file = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!(
                "warning: cannot open log file {}: {}; logging to stderr",
                path.display(),
                e
            );
            None
        }
    });
    if let Some(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
