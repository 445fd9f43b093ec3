// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recreating ticket associations between migrated tickets.

use tracing::debug;

use crate::error::Result;
use crate::maps::{IdMap, NumberMap};
use crate::model::{Association, Space};
use crate::remote::Remote;

/// Recreates, in `destination`, every source association whose endpoints
/// were both migrated. Returns the number of associations created.
///
/// Tickets are processed in number-map order. A candidate is skipped when
/// the destination ticket already has an association joining the same two
/// tickets in either direction, so running this twice creates nothing new.
pub fn reconcile_associations<R: Remote + ?Sized>(
    remote: &mut R,
    source: &Space,
    destination: &Space,
    ids: &IdMap,
    numbers: &NumberMap,
) -> Result<usize> {
    debug!("reconciling associations for {} tickets", numbers.len());
    let mut created = 0;

    for (source_number, dest_number) in numbers.iter() {
        let ticket = remote.get_ticket(&destination.id, dest_number)?;
        let mut existing = remote.list_associations(&destination.id, dest_number)?;

        for candidate in remote.list_associations(&source.id, source_number)? {
            let Some(translated) = translate(&candidate, ids) else {
                debug!("skipping association {}: endpoint not migrated", candidate.id);
                continue;
            };
            if existing
                .iter()
                .any(|a| a.joins(&translated.ticket1_id, &translated.ticket2_id))
            {
                debug!("skipping association {}: already present", candidate.id);
                continue;
            }

            // The service stores the ticket in the request path as ticket1.
            let request = if translated.ticket2_id == ticket.id {
                translated.inverted()
            } else {
                translated
            };
            let association = remote.create_association(&destination.id, dest_number, &request)?;
            debug!(
                "associated {} - {} ({})",
                association.ticket1_id, association.ticket2_id, association.relationship
            );
            existing.push(association);
            created += 1;
        }
    }

    debug!("created {} associations", created);
    Ok(created)
}

/// Maps both endpoints into the destination, or `None` if either endpoint
/// was not migrated.
fn translate(association: &Association, ids: &IdMap) -> Option<Association> {
    let ticket1_id = ids.get(&association.ticket1_id)?.clone();
    let ticket2_id = ids.get(&association.ticket2_id)?.clone();
    Some(Association {
        id: String::new(),
        ticket1_id,
        ticket2_id,
        ..association.clone()
    })
}

#[cfg(test)]
#[path = "associations_tests.rs"]
mod tests;
