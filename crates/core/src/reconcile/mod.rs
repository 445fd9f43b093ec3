// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The migration engine.
//!
//! Each stage runs to completion before the next starts, and translation
//! tables flow between stages as values: taxonomy reconciliation yields the
//! component and milestone id maps, number allocation yields the number
//! map, ticket copies build the ticket id map, and association
//! reconciliation consumes both.

mod associations;
mod migrate;
mod numbering;
mod taxonomy;
mod tickets;

#[cfg(test)]
mod test_helpers;

pub use associations::reconcile_associations;
pub use migrate::{migrate, MigrateOptions, MigrationOutcome, MigrationReport};
pub use numbering::{allocate_numbers, resolve_tickets, Allocation};
pub use taxonomy::{
    reconcile, reconcile_taxonomies, Reconciled, Taxonomy, TaxonomyCounts, TaxonomyMaps,
};
pub use tickets::{copy_ticket, translate_ticket, CopiedTicket, CopyContext};
