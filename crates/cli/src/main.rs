// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use tmvrs::Cli;

fn main() {
    let cli = Cli::parse();
    tmvrs::logging::init(cli.verbose, cli.log_file.as_deref());
    if let Err(e) = tmvrs::run(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
