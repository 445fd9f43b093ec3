// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tmv-core: ticket migration engine
//!
//! This crate reconciles two independently keyed ticket spaces: taxonomy
//! entities are matched by natural key, ticket numbers are allocated in the
//! destination, tickets are copied with their comment threads, and
//! associations are recreated without duplicates. All access to the spaces
//! goes through the [`Remote`] trait.

pub mod error;
pub mod maps;
pub mod memory;
pub mod model;
pub mod reconcile;
pub mod remote;
pub mod rewrite;

pub use error::{Error, Result};
pub use maps::{IdMap, NumberMap};
pub use memory::{FailPoint, MemoryRemote};
pub use model::{
    Association, Comment, Component, CustomField, Document, Fields, Milestone, Relationship,
    Space, Ticket, TicketStatus,
};
pub use reconcile::{migrate, MigrateOptions, MigrationOutcome, MigrationReport};
pub use remote::{FileFetcher, Remote};
