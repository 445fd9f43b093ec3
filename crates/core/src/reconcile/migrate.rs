// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end migration of tickets between two spaces.

use serde::Serialize;
use tracing::{debug, info};

use super::associations::reconcile_associations;
use super::numbering::{allocate_numbers, resolve_tickets, Allocation};
use super::taxonomy::{reconcile_taxonomies, TaxonomyCounts};
use super::tickets::{copy_ticket, CopyContext};
use crate::error::Result;
use crate::maps::{IdMap, NumberMap};
use crate::model::Space;
use crate::remote::{FileFetcher, Remote};

/// What to migrate.
#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    /// Source numbers to migrate, in order. `None` migrates every ticket.
    pub ticket_numbers: Option<Vec<u64>>,
    /// Assign fresh destination numbers instead of keeping source numbers.
    pub renumber: bool,
}

/// Summary of a completed migration.
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub source: String,
    pub destination: String,
    pub numbers: NumberMap,
    pub ids: IdMap,
    pub created: TaxonomyCounts,
    pub tickets: usize,
    pub comments: usize,
    pub attachments: usize,
    pub associations: usize,
}

/// Result of [`migrate`].
#[derive(Debug, Clone)]
pub enum MigrationOutcome {
    Migrated(MigrationReport),
    /// Keeping numbers was requested but these already exist in the
    /// destination; no ticket was written.
    Collision { numbers: Vec<u64> },
}

/// Migrates tickets from `source` into `destination`.
///
/// Runs taxonomy reconciliation, number allocation, one ticket copy per
/// resolved ticket, then association reconciliation. The first error stops
/// the run: tickets already copied stay in the destination, and taxonomy
/// entities created earlier are never removed.
pub fn migrate<R: Remote + ?Sized>(
    remote: &mut R,
    source: &Space,
    destination: &Space,
    options: &MigrateOptions,
    mut fetcher: Option<&mut (dyn FileFetcher + '_)>,
) -> Result<MigrationOutcome> {
    info!("migrating tickets from {} to {}", source.name, destination.name);

    let taxonomies = reconcile_taxonomies(remote, source, destination)?;
    debug!("taxonomies reconciled: {:?}", taxonomies.created);

    let tickets = resolve_tickets(remote, source, options.ticket_numbers.as_deref())?;
    let numbers = match allocate_numbers(remote, destination, &tickets, options.renumber)? {
        Allocation::Mapped(numbers) => numbers,
        Allocation::Collision(numbers) => return Ok(MigrationOutcome::Collision { numbers }),
    };

    let ctx = CopyContext {
        components: &taxonomies.components,
        milestones: &taxonomies.milestones,
        numbers: &numbers,
    };
    let mut ids = IdMap::new();
    let mut comments = 0;
    let mut attachments = 0;
    for ticket in &tickets {
        let copied = copy_ticket(
            remote,
            source,
            destination,
            ticket,
            &ctx,
            fetcher.as_deref_mut(),
        )?;
        info!("copied ticket #{} to #{}", ticket.number, copied.ticket.number);
        ids.insert(ticket.id.clone(), copied.ticket.id);
        comments += copied.comments;
        attachments += copied.attachments;
    }

    let associations = reconcile_associations(remote, source, destination, &ids, &numbers)?;
    info!(
        "migrated {} tickets, {} comments, {} attachments, {} associations",
        tickets.len(),
        comments,
        attachments,
        associations
    );

    Ok(MigrationOutcome::Migrated(MigrationReport {
        source: source.name.clone(),
        destination: destination.name.clone(),
        tickets: tickets.len(),
        numbers,
        ids,
        created: taxonomies.created,
        comments,
        attachments,
        associations,
    }))
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
