// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::collections::{HashMap, HashSet};

use super::*;
use clap::CommandFactory;

/// Only allowed long-form flags have short forms, each maps to the
/// expected long form, and every allowed short form is used.
#[test]
fn test_flag_consistency() {
    let allowed: HashMap<char, &str> = [('t', "ticket"), ('y', "yes")].into_iter().collect();

    let cmd = Cli::command();
    let mut errors = Vec::new();
    let mut used_shorts = HashSet::new();

    check_command_flags(&cmd, &allowed, &mut errors, &mut used_shorts);

    for (short_char, long_name) in &allowed {
        if !used_shorts.contains(short_char) {
            errors.push(format!(
                "-{} (--{}) is in allowed set but never used",
                short_char, long_name
            ));
        }
    }

    if !errors.is_empty() {
        panic!("Flag consistency violations:\n{}", errors.join("\n"));
    }
}

fn check_command_flags(
    cmd: &clap::Command,
    allowed: &HashMap<char, &str>,
    errors: &mut Vec<String>,
    used_shorts: &mut HashSet<char>,
) {
    let cmd_name = cmd.get_name();

    for arg in cmd.get_arguments() {
        let long = arg.get_long();
        let Some(short_char) = arg.get_short() else {
            continue;
        };
        // clap's own help and version flags
        if matches!((short_char, long), ('h', Some("help")) | ('V', Some("version"))) {
            continue;
        }
        used_shorts.insert(short_char);

        match (allowed.get(&short_char), long) {
            (Some(expected), Some(actual)) if actual != *expected => errors.push(format!(
                "{}: -{} maps to --{} but should map to --{}",
                cmd_name, short_char, actual, expected
            )),
            (Some(expected), None) => errors.push(format!(
                "{}: -{} has no long form, expected --{}",
                cmd_name, short_char, expected
            )),
            (None, _) => errors.push(format!(
                "{}: -{} (--{}) is not an allowed short flag",
                cmd_name,
                short_char,
                long.unwrap_or("(none)")
            )),
            _ => {}
        }
    }

    for subcmd in cmd.get_subcommands() {
        check_command_flags(subcmd, allowed, errors, used_shorts);
    }
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["tmv", "spaces", "--verbose", "--log-file", "/tmp/tmv.log"])
        .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/tmv.log")));
    assert!(matches!(cli.command, Command::Spaces));
}

#[test]
fn test_completion_requires_known_shell() {
    assert!(Cli::try_parse_from(["tmv", "completion", "bash"]).is_ok());
    assert!(Cli::try_parse_from(["tmv", "completion", "cmd"]).is_err());
}
