// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Records exchanged with a hosted workspace.
//!
//! Each record names the fields the migration engine interprets and keeps
//! every other wire field in a flattened [`Fields`] map, so an entity copied
//! from one space to another carries its full content across.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Wire fields the engine passes through without interpreting.
pub type Fields = serde_json::Map<String, serde_json::Value>;

// Attachment placeholders look like `[[file:abc123]]` or `[[image:abc123|300px]]`.
static ATTACHMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"\[\[(?:file|image):([^\]|\s]+)") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// Opaque identifiers arrive as JSON strings or integers depending on the resource.
pub(crate) mod opaque_id {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    impl From<Raw> for String {
        fn from(raw: Raw) -> Self {
            match raw {
                Raw::Text(s) => s,
                Raw::Number(n) => n.to_string(),
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(Raw::deserialize(d)?.into())
    }

    pub mod option {
        use super::Raw;
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
            Ok(Option::<Raw>::deserialize(d)?.map(String::from))
        }
    }
}

fn is_unassigned(number: &u64) -> bool {
    *number == 0
}

/// A workspace holding tickets and their taxonomies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    #[serde(deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Space {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Space {
            id: id.into(),
            name: name.into(),
            extra: Fields::new(),
        }
    }
}

/// A workflow status tickets may carry, matched across spaces by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TicketStatus {
    #[serde(default, deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Fields,
}

/// A custom ticket field definition, matched across spaces by title.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomField {
    #[serde(default, deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub extra: Fields,
}

/// A ticket component, matched across spaces by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Component {
    #[serde(default, deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Fields,
}

/// A milestone, matched across spaces by title.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default, deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub extra: Fields,
}

/// A ticket within one space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ticket {
    /// Space-scoped opaque id, empty until the space assigns one.
    #[serde(default, deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    /// Human-facing sequential number. Zero on a create request lets the
    /// space assign the next free number.
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub number: u64,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opaque_id::option::deserialize")]
    pub milestone_id: Option<String>,
    #[serde(default, deserialize_with = "opaque_id::option::deserialize")]
    pub component_id: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Ticket {
    /// Creates a ticket with only a summary (builder pattern start).
    pub fn new(summary: impl Into<String>) -> Self {
        Ticket {
            summary: summary.into(),
            ..Ticket::default()
        }
    }

    /// Sets the number (builder pattern).
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = number;
        self
    }

    /// Sets the description (builder pattern).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the milestone foreign key (builder pattern).
    pub fn with_milestone(mut self, milestone_id: impl Into<String>) -> Self {
        self.milestone_id = Some(milestone_id.into());
        self
    }

    /// Sets the component foreign key (builder pattern).
    pub fn with_component(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }
}

/// A comment on a ticket: human text, a system changelog entry, or an
/// attachment placeholder.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_changes: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Comment {
    /// Creates a comment carrying human text.
    pub fn text(comment: impl Into<String>) -> Self {
        Comment {
            comment: Some(comment.into()),
            ..Comment::default()
        }
    }

    /// Creates a system changelog entry with no human text.
    pub fn changelog(ticket_changes: impl Into<String>) -> Self {
        Comment {
            ticket_changes: Some(ticket_changes.into()),
            ..Comment::default()
        }
    }

    /// Returns the document id if this comment is an attachment placeholder.
    pub fn attachment_id(&self) -> Option<String> {
        let text = self.comment.as_deref()?;
        ATTACHMENT_RE
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Returns the human text, treating an empty comment as absent.
    pub fn human_text(&self) -> Option<&str> {
        self.comment.as_deref().filter(|text| !text.is_empty())
    }
}

/// Integer relationship code on an association.
///
/// Codes 0/1 and 7/8 are mirror pairs; every other code is its own mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relationship(pub i64);

impl Relationship {
    /// The code describing the same link seen from the other endpoint.
    pub fn mirrored(self) -> Self {
        match self.0 {
            0 => Relationship(1),
            1 => Relationship(0),
            7 => Relationship(8),
            8 => Relationship(7),
            other => Relationship(other),
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A typed link between two tickets of the same space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Association {
    #[serde(default, deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    #[serde(deserialize_with = "opaque_id::deserialize")]
    pub ticket1_id: String,
    #[serde(deserialize_with = "opaque_id::deserialize")]
    pub ticket2_id: String,
    #[serde(default)]
    pub relationship: Relationship,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Association {
    pub fn new(
        ticket1_id: impl Into<String>,
        ticket2_id: impl Into<String>,
        relationship: i64,
    ) -> Self {
        Association {
            ticket1_id: ticket1_id.into(),
            ticket2_id: ticket2_id.into(),
            relationship: Relationship(relationship),
            ..Association::default()
        }
    }

    /// The same link stored from the other endpoint's perspective.
    pub fn inverted(&self) -> Self {
        Association {
            ticket1_id: self.ticket2_id.clone(),
            ticket2_id: self.ticket1_id.clone(),
            relationship: self.relationship.mirrored(),
            ..self.clone()
        }
    }

    /// True if both associations join the same pair of tickets, in either order.
    pub fn joins(&self, ticket1_id: &str, ticket2_id: &str) -> bool {
        (self.ticket1_id == ticket1_id && self.ticket2_id == ticket2_id)
            || (self.ticket1_id == ticket2_id && self.ticket2_id == ticket1_id)
    }
}

/// A file stored in a space, possibly attached to a ticket.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, deserialize_with = "opaque_id::deserialize")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "opaque_id::option::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub attachable_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachable_type: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
