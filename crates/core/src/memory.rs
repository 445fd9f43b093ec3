// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process implementation of [`Remote`].
//!
//! Holds any number of spaces in memory and behaves like the hosted service
//! where the engine depends on it: ids and sequential numbers are assigned
//! on create, explicit numbers must be free, and associations are stored
//! from the perspective of the ticket named in the create call. Every write
//! is recorded, and a single failure can be injected per operation kind.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{
    Association, Comment, Component, CustomField, Document, Milestone, Space, Ticket,
    TicketStatus,
};
use crate::remote::Remote;

/// Write operations that can be made to fail once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    CreateStatus,
    CreateCustomField,
    CreateComponent,
    CreateMilestone,
    CreateTicket,
    DeleteTicket,
    CreateComment,
    CreateAssociation,
    AttachDocument,
}

#[derive(Debug)]
struct SpaceState {
    space: Space,
    statuses: Vec<TicketStatus>,
    custom_fields: Vec<CustomField>,
    components: Vec<Component>,
    milestones: Vec<Milestone>,
    tickets: Vec<Ticket>,
    comments: HashMap<String, Vec<Comment>>,
    associations: Vec<Association>,
    documents: Vec<Document>,
    contents: HashMap<String, Vec<u8>>,
    next_number: u64,
}

impl SpaceState {
    fn new(space: Space) -> Self {
        SpaceState {
            space,
            statuses: Vec::new(),
            custom_fields: Vec::new(),
            components: Vec::new(),
            milestones: Vec::new(),
            tickets: Vec::new(),
            comments: HashMap::new(),
            associations: Vec::new(),
            documents: Vec::new(),
            contents: HashMap::new(),
            next_number: 1,
        }
    }

    fn ticket(&self, number: u64) -> Result<&Ticket> {
        self.tickets
            .iter()
            .find(|t| t.number == number)
            .ok_or_else(|| Error::from_status(404, format!("Not found: ticket #{number}")))
    }

    fn has_ticket_id(&self, id: &str) -> bool {
        self.tickets.iter().any(|t| t.id == id)
    }
}

/// In-memory spaces addressed through the [`Remote`] contract.
#[derive(Debug, Default)]
pub struct MemoryRemote {
    spaces: Vec<SpaceState>,
    next_id: u64,
    failures: HashMap<FailPoint, (u16, String)>,
    writes: Vec<String>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        MemoryRemote::default()
    }

    /// Adds an empty space and returns it.
    pub fn add_space(&mut self, name: &str) -> Space {
        let space = Space::new(self.fresh_id("space"), name);
        self.spaces.push(SpaceState::new(space.clone()));
        space
    }

    /// Stores a document that tickets can reference from comments.
    pub fn add_document(
        &mut self,
        space: &str,
        mut document: Document,
        content: Vec<u8>,
    ) -> Result<Document> {
        document.id = self.fresh_id("doc");
        let state = self.space_mut(space)?;
        state.contents.insert(document.id.clone(), content);
        state.documents.push(document.clone());
        Ok(document)
    }

    /// Makes the next call of the given kind fail with `status` and `reason`.
    pub fn fail_next(&mut self, point: FailPoint, status: u16, reason: &str) {
        self.failures.insert(point, (status, reason.to_string()));
    }

    /// Every write performed so far, oldest first.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// Forgets recorded writes, typically after seeding fixtures.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    /// All associations stored in a space.
    pub fn associations(&self, space: &str) -> Result<Vec<Association>> {
        Ok(self.space(space)?.associations.clone())
    }

    /// Content of a stored document.
    pub fn document_content(&self, space: &str, id: &str) -> Result<Vec<u8>> {
        self.space(space)?
            .contents
            .get(id)
            .cloned()
            .ok_or_else(|| Error::from_status(404, format!("Not found: document {id}")))
    }

    /// Documents attached to the ticket with the given id.
    pub fn attachments(&self, space: &str, ticket_id: &str) -> Result<Vec<Document>> {
        Ok(self
            .space(space)?
            .documents
            .iter()
            .filter(|d| d.attachable_id.as_deref() == Some(ticket_id))
            .cloned()
            .collect())
    }

    fn fresh_id(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{kind}-{}", self.next_id)
    }

    fn space(&self, id: &str) -> Result<&SpaceState> {
        self.spaces
            .iter()
            .find(|s| s.space.id == id)
            .ok_or_else(|| Error::from_status(404, format!("Not found: space {id}")))
    }

    fn space_mut(&mut self, id: &str) -> Result<&mut SpaceState> {
        self.spaces
            .iter_mut()
            .find(|s| s.space.id == id)
            .ok_or_else(|| Error::from_status(404, format!("Not found: space {id}")))
    }

    fn check(&mut self, point: FailPoint) -> Result<()> {
        match self.failures.remove(&point) {
            Some((status, reason)) => Err(Error::from_status(status, reason)),
            None => Ok(()),
        }
    }

    fn record(&mut self, entry: String) {
        self.writes.push(entry);
    }
}

impl Remote for MemoryRemote {
    fn list_spaces(&mut self) -> Result<Vec<Space>> {
        Ok(self.spaces.iter().map(|s| s.space.clone()).collect())
    }

    fn list_statuses(&mut self, space: &str) -> Result<Vec<TicketStatus>> {
        Ok(self.space(space)?.statuses.clone())
    }

    fn create_status(&mut self, space: &str, status: &TicketStatus) -> Result<TicketStatus> {
        self.check(FailPoint::CreateStatus)?;
        let created = TicketStatus {
            id: self.fresh_id("status"),
            ..status.clone()
        };
        self.space_mut(space)?.statuses.push(created.clone());
        self.record(format!("create_status {space} {}", created.name));
        Ok(created)
    }

    fn list_custom_fields(&mut self, space: &str) -> Result<Vec<CustomField>> {
        Ok(self.space(space)?.custom_fields.clone())
    }

    fn create_custom_field(&mut self, space: &str, field: &CustomField) -> Result<CustomField> {
        self.check(FailPoint::CreateCustomField)?;
        let created = CustomField {
            id: self.fresh_id("field"),
            ..field.clone()
        };
        self.space_mut(space)?.custom_fields.push(created.clone());
        self.record(format!("create_custom_field {space} {}", created.title));
        Ok(created)
    }

    fn list_components(&mut self, space: &str) -> Result<Vec<Component>> {
        Ok(self.space(space)?.components.clone())
    }

    fn create_component(&mut self, space: &str, component: &Component) -> Result<Component> {
        self.check(FailPoint::CreateComponent)?;
        let created = Component {
            id: self.fresh_id("component"),
            ..component.clone()
        };
        self.space_mut(space)?.components.push(created.clone());
        self.record(format!("create_component {space} {}", created.name));
        Ok(created)
    }

    fn list_milestones(&mut self, space: &str) -> Result<Vec<Milestone>> {
        Ok(self.space(space)?.milestones.clone())
    }

    fn create_milestone(&mut self, space: &str, milestone: &Milestone) -> Result<Milestone> {
        self.check(FailPoint::CreateMilestone)?;
        let created = Milestone {
            id: self.fresh_id("milestone"),
            ..milestone.clone()
        };
        self.space_mut(space)?.milestones.push(created.clone());
        self.record(format!("create_milestone {space} {}", created.title));
        Ok(created)
    }

    fn list_tickets(&mut self, space: &str) -> Result<Vec<Ticket>> {
        Ok(self.space(space)?.tickets.clone())
    }

    fn get_ticket(&mut self, space: &str, number: u64) -> Result<Ticket> {
        self.space(space)?.ticket(number).cloned()
    }

    fn create_ticket(&mut self, space: &str, ticket: &Ticket) -> Result<Ticket> {
        self.check(FailPoint::CreateTicket)?;
        let id = self.fresh_id("ticket");
        let state = self.space_mut(space)?;
        let number = if ticket.number == 0 {
            state.next_number
        } else if state.ticket(ticket.number).is_ok() {
            return Err(Error::from_status(422, "Number has already been taken"));
        } else {
            ticket.number
        };
        state.next_number = state.next_number.max(number + 1);

        let created = Ticket {
            id,
            number,
            ..ticket.clone()
        };
        state.tickets.push(created.clone());
        self.record(format!("create_ticket {space} #{number}"));
        Ok(created)
    }

    fn delete_ticket(&mut self, space: &str, number: u64) -> Result<()> {
        self.check(FailPoint::DeleteTicket)?;
        let state = self.space_mut(space)?;
        let id = state.ticket(number)?.id.clone();
        state.tickets.retain(|t| t.id != id);
        state.comments.remove(&id);
        state
            .associations
            .retain(|a| a.ticket1_id != id && a.ticket2_id != id);
        self.record(format!("delete_ticket {space} #{number}"));
        Ok(())
    }

    fn list_comments(&mut self, space: &str, number: u64) -> Result<Vec<Comment>> {
        let state = self.space(space)?;
        let id = &state.ticket(number)?.id;
        Ok(state.comments.get(id).cloned().unwrap_or_default())
    }

    fn create_comment(&mut self, space: &str, number: u64, comment: &Comment) -> Result<Comment> {
        self.check(FailPoint::CreateComment)?;
        let created = Comment {
            id: self.fresh_id("comment"),
            ..comment.clone()
        };
        let state = self.space_mut(space)?;
        let ticket_id = state.ticket(number)?.id.clone();
        state
            .comments
            .entry(ticket_id)
            .or_default()
            .push(created.clone());
        self.record(format!("create_comment {space} #{number}"));
        Ok(created)
    }

    fn list_associations(&mut self, space: &str, number: u64) -> Result<Vec<Association>> {
        let state = self.space(space)?;
        let id = &state.ticket(number)?.id;
        Ok(state
            .associations
            .iter()
            .filter(|a| &a.ticket1_id == id || &a.ticket2_id == id)
            .cloned()
            .collect())
    }

    fn create_association(
        &mut self,
        space: &str,
        number: u64,
        association: &Association,
    ) -> Result<Association> {
        self.check(FailPoint::CreateAssociation)?;
        let id = self.fresh_id("assoc");
        let state = self.space_mut(space)?;
        let own = state.ticket(number)?.id.clone();

        // The ticket in the request path is always stored as ticket1.
        let other = if association.ticket1_id == own {
            association.ticket2_id.clone()
        } else if association.ticket2_id == own {
            association.ticket1_id.clone()
        } else {
            return Err(Error::from_status(
                422,
                format!("Association must involve ticket #{number}"),
            ));
        };
        if !state.has_ticket_id(&other) {
            return Err(Error::from_status(422, format!("Unknown ticket {other}")));
        }

        let created = Association {
            id,
            ticket1_id: own,
            ticket2_id: other,
            ..association.clone()
        };
        state.associations.push(created.clone());
        self.record(format!(
            "create_association {space} #{number} rel={}",
            created.relationship
        ));
        Ok(created)
    }

    fn get_document(&mut self, space: &str, id: &str) -> Result<Document> {
        self.space(space)?
            .documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| Error::from_status(404, format!("Not found: document {id}")))
    }

    fn attach_document(
        &mut self,
        space: &str,
        ticket: &Ticket,
        document: &Document,
        content: Vec<u8>,
    ) -> Result<Document> {
        self.check(FailPoint::AttachDocument)?;
        let created = Document {
            id: self.fresh_id("doc"),
            attachable_id: Some(ticket.id.clone()),
            attachable_type: Some("Ticket".to_string()),
            ..document.clone()
        };
        let state = self.space_mut(space)?;
        state.ticket(ticket.number)?;
        state.contents.insert(created.id.clone(), content);
        state.documents.push(created.clone());
        self.record(format!("attach_document {space} #{}", ticket.number));
        Ok(created)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
