// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Contract between the migration engine and a hosted workspace service.
//!
//! The engine only ever talks to spaces through [`Remote`]. Implementations
//! own authentication, retries, and wire encoding; they report failures as
//! [`Error::NotFound`](crate::Error::NotFound) or
//! [`Error::Remote`](crate::Error::Remote) after their own retry policy is
//! exhausted.

use crate::error::Result;
use crate::model::{
    Association, Comment, Component, CustomField, Document, Milestone, Space, Ticket,
    TicketStatus,
};

/// Synchronous operations against the spaces of one account.
///
/// Every call is scoped by the opaque space id; tickets are addressed by
/// their space-scoped number.
pub trait Remote {
    fn list_spaces(&mut self) -> Result<Vec<Space>>;

    fn list_statuses(&mut self, space: &str) -> Result<Vec<TicketStatus>>;
    fn create_status(&mut self, space: &str, status: &TicketStatus) -> Result<TicketStatus>;

    fn list_custom_fields(&mut self, space: &str) -> Result<Vec<CustomField>>;
    fn create_custom_field(&mut self, space: &str, field: &CustomField) -> Result<CustomField>;

    fn list_components(&mut self, space: &str) -> Result<Vec<Component>>;
    fn create_component(&mut self, space: &str, component: &Component) -> Result<Component>;

    fn list_milestones(&mut self, space: &str) -> Result<Vec<Milestone>>;
    fn create_milestone(&mut self, space: &str, milestone: &Milestone) -> Result<Milestone>;

    fn list_tickets(&mut self, space: &str) -> Result<Vec<Ticket>>;
    fn get_ticket(&mut self, space: &str, number: u64) -> Result<Ticket>;
    /// Creates a ticket. A zero `number` lets the space assign the next one.
    fn create_ticket(&mut self, space: &str, ticket: &Ticket) -> Result<Ticket>;
    fn delete_ticket(&mut self, space: &str, number: u64) -> Result<()>;

    fn list_comments(&mut self, space: &str, number: u64) -> Result<Vec<Comment>>;
    fn create_comment(&mut self, space: &str, number: u64, comment: &Comment) -> Result<Comment>;

    /// Lists associations touching the ticket, whichever endpoint it is.
    fn list_associations(&mut self, space: &str, number: u64) -> Result<Vec<Association>>;
    /// Creates an association from the perspective of ticket `number`.
    fn create_association(
        &mut self,
        space: &str,
        number: u64,
        association: &Association,
    ) -> Result<Association>;

    fn get_document(&mut self, space: &str, id: &str) -> Result<Document>;
    /// Uploads `content` as a new document attached to `ticket`.
    fn attach_document(
        &mut self,
        space: &str,
        ticket: &Ticket,
        document: &Document,
        content: Vec<u8>,
    ) -> Result<Document>;
}

/// Downloads attachment content through an authenticated side channel.
///
/// Only constructed when the caller supplied a credential pair; without one
/// attachments are skipped entirely.
pub trait FileFetcher {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>>;
}
