// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Destination ticket numbering.

use std::collections::HashSet;

use crate::error::Result;
use crate::maps::NumberMap;
use crate::model::{Space, Ticket};
use crate::remote::Remote;

const PROBE_SUMMARY: &str = "tmv: number allocation probe";

/// Outcome of number allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    /// Every source number has a destination number.
    Mapped(NumberMap),
    /// Keeping numbers was requested but these already exist in the destination.
    Collision(Vec<u64>),
}

/// Fetches the tickets to migrate: the named numbers in order, or every
/// ticket the source lists. A repeated number is fetched once.
pub fn resolve_tickets<R: Remote + ?Sized>(
    remote: &mut R,
    source: &Space,
    numbers: Option<&[u64]>,
) -> Result<Vec<Ticket>> {
    match numbers {
        Some(numbers) => {
            let mut seen = HashSet::new();
            numbers
                .iter()
                .filter(|&&n| seen.insert(n))
                .map(|&n| remote.get_ticket(&source.id, n))
                .collect()
        }
        None => remote.list_tickets(&source.id),
    }
}

/// Decides destination numbers for `tickets`.
///
/// Without `renumber`, every source number is probed in the destination and
/// any existing one aborts with [`Allocation::Collision`] before anything is
/// written. With `renumber`, a contiguous block is reserved and assigned in
/// list order.
pub fn allocate_numbers<R: Remote + ?Sized>(
    remote: &mut R,
    destination: &Space,
    tickets: &[Ticket],
    renumber: bool,
) -> Result<Allocation> {
    if renumber {
        return renumbered(remote, destination, tickets).map(Allocation::Mapped);
    }

    let mut collisions = Vec::new();
    for ticket in tickets {
        match remote.get_ticket(&destination.id, ticket.number) {
            Ok(_) => collisions.push(ticket.number),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }
    }

    if collisions.is_empty() {
        Ok(Allocation::Mapped(NumberMap::identity(
            tickets.iter().map(|t| t.number),
        )))
    } else {
        tracing::warn!("ticket numbers already exist in destination: {:?}", collisions);
        Ok(Allocation::Collision(collisions))
    }
}

fn renumbered<R: Remote + ?Sized>(
    remote: &mut R,
    destination: &Space,
    tickets: &[Ticket],
) -> Result<NumberMap> {
    if tickets.is_empty() {
        return Ok(NumberMap::new());
    }
    let first = reserve_block(remote, destination)?;
    tracing::info!("renumbering {} tickets from #{}", tickets.len(), first);
    Ok(tickets
        .iter()
        .zip(first..)
        .map(|(ticket, number)| (ticket.number, number))
        .collect())
}

/// Finds the first number of a free contiguous block.
///
/// The service has no reservation call, so a throwaway ticket is created to
/// learn the next number it would assign and deleted straight away.
fn reserve_block<R: Remote + ?Sized>(remote: &mut R, destination: &Space) -> Result<u64> {
    let probe = remote.create_ticket(&destination.id, &Ticket::new(PROBE_SUMMARY))?;
    tracing::debug!("created numbering probe #{}", probe.number);
    remote.delete_ticket(&destination.id, probe.number)?;
    Ok(probe.number)
}

#[cfg(test)]
#[path = "numbering_tests.rs"]
mod tests;
