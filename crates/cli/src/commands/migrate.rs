// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::{connect, ensure_application, find_space, persist_tokens};
use crate::cli::MigrateArgs;
use crate::config::{config_path, Config};
use crate::error::{Error, Result};
use crate::http::{CredentialFetcher, Credentials, UreqTransport};
use crate::prompt::Prompt;
use tmv_core::{migrate, FileFetcher, MigrateOptions, MigrationOutcome, MigrationReport, Remote};

pub fn run(args: MigrateArgs) -> Result<()> {
    let ticket_numbers = ticket_numbers(&args)?;
    let path = config_path()?;
    let mut config = Config::load()?;
    let mut prompt = Prompt::stdio();
    ensure_application(&mut config, &path, &mut prompt)?;
    let mut remote = connect(UreqTransport::new(config.api.timeout()), &config)?;

    let mut fetcher = if args.attachments {
        let credentials = ask_credentials(&mut prompt)?;
        Some(CredentialFetcher::new(
            UreqTransport::new(config.api.timeout()),
            credentials,
        ))
    } else {
        None
    };

    let result = run_impl(
        &mut remote,
        &args,
        ticket_numbers,
        fetcher.as_mut().map(|f| f as &mut dyn FileFetcher),
        &mut prompt,
        &mut io::stdout(),
    );
    persist_tokens(&path, &config, remote.client().tokens())?;
    result.map(|_| ())
}

/// Internal implementation that accepts the remote, prompt and output for testing.
pub(crate) fn run_impl<R, I, W, O>(
    remote: &mut R,
    args: &MigrateArgs,
    ticket_numbers: Option<Vec<u64>>,
    fetcher: Option<&mut (dyn FileFetcher + '_)>,
    prompt: &mut Prompt<I, W>,
    out: &mut O,
) -> Result<MigrationReport>
where
    R: Remote + ?Sized,
    I: BufRead,
    W: Write,
    O: Write,
{
    let source = find_space(remote, &args.from)?;
    let destination = find_space(remote, &args.to)?;
    if source.id == destination.id {
        return Err(Error::SameSpace(source.name));
    }

    let options = MigrateOptions {
        ticket_numbers,
        renumber: args.renumber,
    };
    let report = match migrate(remote, &source, &destination, &options, fetcher)? {
        MigrationOutcome::Migrated(report) => report,
        MigrationOutcome::Collision { numbers } => return Err(Error::Collision { numbers }),
    };

    print_summary(&report, out)?;
    if let Some(path) = &args.report {
        write_report(path, &report, Utc::now())?;
        writeln!(out, "Report written to {}", path.display())?;
    }

    if args.delete_source && !report.numbers.is_empty() {
        let question = format!(
            "Delete {} migrated tickets from {}?",
            report.numbers.len(),
            source.name
        );
        if args.yes || prompt.confirm(&question)? {
            let deleted = delete_source_tickets(remote, &source.id, &report)?;
            writeln!(out, "Deleted {} tickets from {}", deleted, source.name)?;
        } else {
            writeln!(out, "Source tickets kept.")?;
        }
    }

    Ok(report)
}

fn print_summary<O: Write>(report: &MigrationReport, out: &mut O) -> Result<()> {
    writeln!(
        out,
        "Migrated {} tickets from {} to {}",
        report.tickets, report.source, report.destination
    )?;
    writeln!(
        out,
        "  {} comments, {} attachments, {} associations",
        report.comments, report.attachments, report.associations
    )?;
    let created = &report.created;
    writeln!(
        out,
        "  created {} statuses, {} custom fields, {} components, {} milestones",
        created.statuses, created.custom_fields, created.components, created.milestones
    )?;
    if !report.numbers.is_identity() {
        for (from, to) in report.numbers.iter() {
            writeln!(out, "  #{} -> #{}", from, to)?;
        }
    }
    Ok(())
}

fn delete_source_tickets<R: Remote + ?Sized>(
    remote: &mut R,
    space: &str,
    report: &MigrationReport,
) -> Result<usize> {
    let mut deleted = 0;
    for (number, _) in report.numbers.iter() {
        remote.delete_ticket(space, number)?;
        info!("deleted source ticket #{}", number);
        deleted += 1;
    }
    Ok(deleted)
}

#[derive(Serialize)]
struct ReportFile<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a MigrationReport,
}

/// Writes the migration report as pretty JSON.
pub(crate) fn write_report(
    path: &Path,
    report: &MigrationReport,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let file = ReportFile {
        generated_at,
        report,
    };
    let mut json = serde_json::to_string_pretty(&file)?;
    json.push('\n');
    fs::write(path, json)?;
    Ok(())
}

/// Ticket numbers from `--ticket` flags and the `--tickets` file, in order
/// and without repeats. `None` selects every ticket.
pub(crate) fn ticket_numbers(args: &MigrateArgs) -> Result<Option<Vec<u64>>> {
    let mut numbers = args.tickets.clone();
    if let Some(path) = &args.ticket_file {
        let content = fs::read_to_string(path)?;
        numbers.extend(parse_ticket_list(&content)?);
    } else if numbers.is_empty() {
        return Ok(None);
    }

    let mut seen = std::collections::HashSet::new();
    numbers.retain(|n| seen.insert(*n));
    if numbers.is_empty() {
        warn!("ticket list is empty, nothing will be migrated");
    }
    Ok(Some(numbers))
}

/// Parses one ticket number per line. Blank lines are ignored.
pub(crate) fn parse_ticket_list(content: &str) -> Result<Vec<u64>> {
    let mut numbers = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let number = trimmed
            .trim_start_matches('#')
            .parse::<u64>()
            .map_err(|e| Error::ParseLineError {
                line: line_num + 1,
                reason: format!("invalid ticket number '{}': {}", trimmed, e),
            })?;
        if number == 0 {
            return Err(Error::ParseLineError {
                line: line_num + 1,
                reason: "ticket numbers start at 1".to_string(),
            });
        }
        numbers.push(number);
    }
    Ok(numbers)
}

fn ask_credentials<R: BufRead, W: Write>(prompt: &mut Prompt<R, W>) -> Result<Credentials> {
    prompt.say("Attachments are downloaded with your account login.")?;
    let username = prompt.ask_required("Username: ")?;
    let password = prompt.ask_required("Password: ")?;
    Ok(Credentials::new(username, password))
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
