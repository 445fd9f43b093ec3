// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `TMV_CONFIG_DIR` if set and non-empty.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var(vars::TMV_CONFIG_DIR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Returns the value of `TMV_API_HOST` if set and non-empty.
pub fn api_host() -> Option<String> {
    std::env::var(vars::TMV_API_HOST)
        .ok()
        .filter(|v| !v.is_empty())
}

/// Returns the log filter directives from `RUST_LOG` if set.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::RUST_LOG).ok()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
