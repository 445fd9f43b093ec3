// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub use args::MigrateArgs;

#[derive(Parser)]
#[command(name = "tmv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Migrate tickets between hosted workspaces")]
#[command(
    long_about = "Migrate tickets between hosted workspaces.\n\n\
    Copies statuses, custom fields, components, milestones, tickets with their \
    comment threads, and ticket associations from one space to another, \
    rewriting ticket references along the way."
)]
#[command(after_help = "\
Get started:
  tmv login                          Authorize with a PIN code
  tmv spaces                         List the spaces you can access
  tmv migrate old-space new-space    Copy every ticket")]
pub struct Cli {
    /// Log debug detail
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Authorize this tool with a PIN code
    #[command(after_help = "\
The authorization page shows a PIN code after you allow access.
Paste it at the prompt; the tokens are saved to the config file.")]
    Login,

    /// List the spaces visible to your account
    Spaces,

    /// Copy tickets from one space to another
    #[command(after_help = "\
Examples:
  tmv migrate old new                      Copy every ticket, keeping numbers
  tmv migrate old new --renumber           Assign fresh numbers in the destination
  tmv migrate old new --ticket 4 -t 9      Copy tickets #4 and #9 only
  tmv migrate old new --tickets list.txt   Copy the numbers listed in a file
  tmv migrate old new --attachments        Also copy attached files
  tmv migrate old new --report out.json    Save the number and id mapping")]
    Migrate(MigrateArgs),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  tmv completion bash > ~/.local/share/bash-completion/completions/tmv
  tmv completion zsh > ~/.zfunc/_tmv
  tmv completion fish > ~/.config/fish/completions/tmv.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
