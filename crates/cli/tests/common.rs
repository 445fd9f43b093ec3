// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// The binary with its config directory pointed at `config_dir`.
pub fn tmv(config_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tmv");
    cmd.env("TMV_CONFIG_DIR", config_dir.path())
        .env_remove("TMV_API_HOST")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes a config file with application keys and, optionally, tokens.
pub fn write_config(config_dir: &TempDir, logged_in: bool) {
    let mut content = String::from(
        "[application]\nclient_id = \"app\"\nclient_secret = \"secret\"\n",
    );
    if logged_in {
        content.push_str("\n[tokens]\nbearer_token = \"access\"\nrefresh_token = \"refresh\"\n");
    }
    // Unroutable host so nothing leaves the machine.
    content.push_str("\n[api]\nhost = \"http://127.0.0.1:9\"\nretry_count = 0\ntimeout_secs = 2\n");
    fs::write(config_dir.path().join("config.toml"), content).unwrap();
}
