// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! [`Remote`] implementation over the hosted REST API.
//!
//! Each resource is posted wrapped in its singular resource key
//! (`{"ticket": {...}}`), with the ids the service assigns removed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::client::HttpClient;
use super::transport::Transport;
use tmv_core::model::{
    Association, Comment, Component, CustomField, Document, Milestone, Space, Ticket,
    TicketStatus,
};
use tmv_core::{Remote, Result};

/// Tickets requested per page when listing a space.
pub const DEFAULT_PAGE_SIZE: usize = 100;

const MULTIPART_BOUNDARY: &str = "4079f119cf48";

/// Fields the service assigns itself and rejects on create.
const SERVER_FIELDS: [&str; 3] = ["id", "space_id", "ticket_id"];

/// Remote spaces reached through an authenticated [`HttpClient`].
pub struct ApiRemote<T: Transport> {
    client: HttpClient<T>,
    page_size: usize,
}

impl<T: Transport> ApiRemote<T> {
    pub fn new(client: HttpClient<T>) -> Self {
        ApiRemote {
            client,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the ticket listing page size (builder pattern).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn client(&self) -> &HttpClient<T> {
        &self.client
    }

    fn create<B: Serialize, D: DeserializeOwned>(
        &mut self,
        path: &str,
        key: &str,
        record: &B,
    ) -> Result<D> {
        let payload = wrap_payload(key, record)?;
        self.client.post(path, &payload)
    }
}

/// Serializes `record` under `key`, without server-assigned fields.
pub(crate) fn wrap_payload<B: Serialize>(key: &str, record: &B) -> Result<Value> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(fields) = &mut value {
        for field in SERVER_FIELDS {
            fields.remove(field);
        }
    }
    let mut wrapper = Map::new();
    wrapper.insert(key.to_string(), value);
    Ok(Value::Object(wrapper))
}

/// Builds the multipart body for a document upload.
///
/// Returns the content type header value and the encoded body.
pub(crate) fn multipart_document(document: &Document, content: &[u8]) -> (String, Vec<u8>) {
    let delimiter = format!("--{MULTIPART_BOUNDARY}");
    let mut body = Vec::with_capacity(content.len() + 512);
    fn line(body: &mut Vec<u8>, text: &[u8]) {
        body.extend_from_slice(text);
        body.extend_from_slice(b"\r\n");
    }

    line(&mut body, delimiter.as_bytes());
    line(
        &mut body,
        format!(
            "Content-Disposition: form-data; name=\"document[file]\"; filename=\"{}\"",
            document.name
        )
        .as_bytes(),
    );
    line(&mut body, b"Content-Type: application/octet-stream");
    line(&mut body, b"");
    line(&mut body, content);

    let fields = [
        ("name", Some(document.name.as_str())),
        ("attachable_id", document.attachable_id.as_deref()),
        ("description", document.description.as_deref()),
        ("attachable_type", document.attachable_type.as_deref()),
    ];
    for (name, value) in fields {
        line(&mut body, delimiter.as_bytes());
        line(
            &mut body,
            format!("Content-Disposition: form-data; name=\"document[{name}]\"").as_bytes(),
        );
        line(&mut body, b"");
        line(&mut body, value.unwrap_or_default().as_bytes());
    }
    line(&mut body, format!("{delimiter}--").as_bytes());

    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body,
    )
}

impl<T: Transport> Remote for ApiRemote<T> {
    fn list_spaces(&mut self) -> Result<Vec<Space>> {
        self.client.get_list("spaces.json", &[])
    }

    fn list_statuses(&mut self, space: &str) -> Result<Vec<TicketStatus>> {
        self.client
            .get_list(&format!("spaces/{space}/tickets/statuses.json"), &[])
    }

    fn create_status(&mut self, space: &str, status: &TicketStatus) -> Result<TicketStatus> {
        self.create(
            &format!("spaces/{space}/tickets/statuses.json"),
            "status",
            status,
        )
    }

    fn list_custom_fields(&mut self, space: &str) -> Result<Vec<CustomField>> {
        self.client
            .get_list(&format!("spaces/{space}/tickets/custom_fields.json"), &[])
    }

    fn create_custom_field(&mut self, space: &str, field: &CustomField) -> Result<CustomField> {
        self.create(
            &format!("spaces/{space}/tickets/custom_fields.json"),
            "custom_field",
            field,
        )
    }

    fn list_components(&mut self, space: &str) -> Result<Vec<Component>> {
        self.client
            .get_list(&format!("spaces/{space}/ticket_components.json"), &[])
    }

    fn create_component(&mut self, space: &str, component: &Component) -> Result<Component> {
        // Components are created from their name alone.
        let mut payload = Map::new();
        payload.insert("component".into(), Value::String(component.name.clone()));
        self.client.post(
            &format!("spaces/{space}/ticket_components.json"),
            &Value::Object(payload),
        )
    }

    fn list_milestones(&mut self, space: &str) -> Result<Vec<Milestone>> {
        self.client
            .get_list(&format!("spaces/{space}/milestones.json"), &[])
    }

    fn create_milestone(&mut self, space: &str, milestone: &Milestone) -> Result<Milestone> {
        self.create(
            &format!("spaces/{space}/milestones.json"),
            "milestone",
            milestone,
        )
    }

    fn list_tickets(&mut self, space: &str) -> Result<Vec<Ticket>> {
        let path = format!("spaces/{space}/tickets.json");
        let mut tickets = Vec::new();
        let mut page = 1;
        loop {
            let query = [
                ("report", "0".to_string()),
                ("per_page", self.page_size.to_string()),
                ("page", page.to_string()),
            ];
            let batch: Vec<Ticket> = self.client.get_list(&path, &query)?;
            let done = batch.len() < self.page_size;
            debug!("fetched {} tickets from page {} of {}", batch.len(), page, space);
            tickets.extend(batch);
            if done {
                break;
            }
            page += 1;
        }
        Ok(tickets)
    }

    fn get_ticket(&mut self, space: &str, number: u64) -> Result<Ticket> {
        self.client
            .get(&format!("spaces/{space}/tickets/{number}.json"))
    }

    fn create_ticket(&mut self, space: &str, ticket: &Ticket) -> Result<Ticket> {
        self.create(&format!("spaces/{space}/tickets.json"), "ticket", ticket)
    }

    fn delete_ticket(&mut self, space: &str, number: u64) -> Result<()> {
        self.client
            .delete(&format!("spaces/{space}/tickets/{number}.json"))
    }

    fn list_comments(&mut self, space: &str, number: u64) -> Result<Vec<Comment>> {
        self.client.get_list(
            &format!("spaces/{space}/tickets/{number}/ticket_comments.json"),
            &[],
        )
    }

    fn create_comment(&mut self, space: &str, number: u64, comment: &Comment) -> Result<Comment> {
        self.create(
            &format!("spaces/{space}/tickets/{number}/ticket_comments.json"),
            "ticket_comment",
            comment,
        )
    }

    fn list_associations(&mut self, space: &str, number: u64) -> Result<Vec<Association>> {
        self.client.get_list(
            &format!("spaces/{space}/tickets/{number}/ticket_associations.json"),
            &[],
        )
    }

    fn create_association(
        &mut self,
        space: &str,
        number: u64,
        association: &Association,
    ) -> Result<Association> {
        self.create(
            &format!("spaces/{space}/tickets/{number}/ticket_associations.json"),
            "ticket_association",
            association,
        )
    }

    fn get_document(&mut self, space: &str, id: &str) -> Result<Document> {
        self.client
            .get(&format!("spaces/{space}/documents/{id}.json"))
    }

    fn attach_document(
        &mut self,
        space: &str,
        ticket: &Ticket,
        document: &Document,
        content: Vec<u8>,
    ) -> Result<Document> {
        let upload = Document {
            attachable_id: Some(ticket.id.clone()),
            attachable_type: Some("Ticket".into()),
            ..document.clone()
        };
        let (content_type, body) = multipart_document(&upload, &content);
        debug!(
            "uploading {} ({} bytes) to ticket #{}",
            upload.name,
            content.len(),
            ticket.number
        );
        self.client
            .post_bytes(&format!("spaces/{space}/documents.json"), &content_type, body)
    }
}
