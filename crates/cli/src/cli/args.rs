// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Argument structs for CLI commands.

use std::path::PathBuf;

use clap::Args;

/// Arguments for `tmv migrate`.
#[derive(Args, Clone, Debug, Default)]
pub struct MigrateArgs {
    /// Name of the space to copy from
    pub from: String,

    /// Name of the space to copy into
    pub to: String,

    /// Copy only this ticket number (repeatable)
    #[arg(long = "ticket", short = 't', value_name = "N")]
    pub tickets: Vec<u64>,

    /// Copy only the ticket numbers listed in a file, one per line
    #[arg(long = "tickets", value_name = "FILE")]
    pub ticket_file: Option<PathBuf>,

    /// Assign fresh numbers instead of keeping the source numbers
    #[arg(long)]
    pub renumber: bool,

    /// Copy attached files (prompts for your username and password)
    #[arg(long)]
    pub attachments: bool,

    /// Write a JSON report of the migration to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Delete the migrated tickets from the source space afterwards
    #[arg(long)]
    pub delete_source: bool,

    /// Skip the confirmation before deleting source tickets
    #[arg(long, short = 'y')]
    pub yes: bool,
}
