// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for reconcile tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::memory::MemoryRemote;
use crate::model::{Component, CustomField, Milestone, Space, Ticket, TicketStatus};
use crate::remote::{FileFetcher, Remote};

/// A memory remote with a source and a destination space.
pub struct Fixture {
    pub remote: MemoryRemote,
    pub source: Space,
    pub dest: Space,
}

impl Fixture {
    pub fn new() -> Self {
        let mut remote = MemoryRemote::new();
        let source = remote.add_space("source");
        let dest = remote.add_space("dest");
        Fixture {
            remote,
            source,
            dest,
        }
    }

    pub fn status(&mut self, space: &Space, name: &str) -> TicketStatus {
        let status = TicketStatus {
            name: name.into(),
            ..TicketStatus::default()
        };
        self.remote.create_status(&space.id, &status).unwrap()
    }

    pub fn custom_field(&mut self, space: &Space, title: &str) -> CustomField {
        let field = CustomField {
            title: title.into(),
            ..CustomField::default()
        };
        self.remote.create_custom_field(&space.id, &field).unwrap()
    }

    pub fn component(&mut self, space: &Space, name: &str) -> Component {
        let component = Component {
            name: name.into(),
            ..Component::default()
        };
        self.remote.create_component(&space.id, &component).unwrap()
    }

    pub fn milestone(&mut self, space: &Space, title: &str) -> Milestone {
        let milestone = Milestone {
            title: title.into(),
            ..Milestone::default()
        };
        self.remote.create_milestone(&space.id, &milestone).unwrap()
    }

    /// Creates a source ticket with an explicit number.
    pub fn source_ticket(&mut self, number: u64, summary: &str) -> Ticket {
        let ticket = Ticket::new(summary).with_number(number);
        self.remote.create_ticket(&self.source.id, &ticket).unwrap()
    }

    /// Creates a destination ticket with an explicit number.
    pub fn dest_ticket(&mut self, number: u64, summary: &str) -> Ticket {
        let ticket = Ticket::new(summary).with_number(number);
        self.remote.create_ticket(&self.dest.id, &ticket).unwrap()
    }

    /// Summaries of destination tickets keyed by number.
    pub fn dest_summaries(&mut self) -> HashMap<u64, String> {
        self.remote
            .list_tickets(&self.dest.id)
            .unwrap()
            .into_iter()
            .map(|t| (t.number, t.summary))
            .collect()
    }

    /// Forgets the writes made while seeding.
    pub fn seeded(mut self) -> Self {
        self.remote.clear_writes();
        self
    }
}

/// Serves attachment bytes from a fixed table of URLs.
#[derive(Default)]
pub struct MapFetcher {
    pub files: HashMap<String, Vec<u8>>,
    pub fetched: Vec<String>,
}

impl FileFetcher for MapFetcher {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>> {
        self.fetched.push(url.to_string());
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| Error::from_status(403, "download refused"))
    }
}
