// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Copying one ticket and its comment thread into the destination.

use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::maps::{IdMap, NumberMap};
use crate::model::{Comment, Space, Ticket};
use crate::remote::{FileFetcher, Remote};
use crate::rewrite::{prettify_changes, rewrite_references};

/// Translation tables a ticket copy reads from.
#[derive(Debug, Clone, Copy)]
pub struct CopyContext<'a> {
    pub components: &'a IdMap,
    pub milestones: &'a IdMap,
    pub numbers: &'a NumberMap,
}

/// A ticket committed to the destination together with its thread.
#[derive(Debug, Clone)]
pub struct CopiedTicket {
    /// The ticket as the destination stored it.
    pub ticket: Ticket,
    pub comments: usize,
    pub attachments: usize,
}

/// Builds the create request for a source ticket without touching the source.
///
/// Foreign keys and the number are translated, and `#<number>` references in
/// the description are rewritten. A key with no translation is an
/// [`Error::InconsistentState`].
pub fn translate_ticket(source: &Ticket, ctx: &CopyContext<'_>) -> Result<Ticket> {
    let number = ctx
        .numbers
        .get(source.number)
        .ok_or_else(|| inconsistent(source, "number", source.number.to_string()))?;

    let milestone_id = translate_key(source, "milestone_id", &source.milestone_id, ctx.milestones)?;
    let component_id = translate_key(source, "component_id", &source.component_id, ctx.components)?;
    let description = source
        .description
        .as_deref()
        .map(|text| rewrite_references(text, ctx.numbers));

    Ok(Ticket {
        id: String::new(),
        number,
        description,
        milestone_id,
        component_id,
        ..source.clone()
    })
}

fn translate_key(
    ticket: &Ticket,
    field: &'static str,
    key: &Option<String>,
    map: &IdMap,
) -> Result<Option<String>> {
    match key {
        None => Ok(None),
        Some(id) => map
            .get(id)
            .cloned()
            .map(Some)
            .ok_or_else(|| inconsistent(ticket, field, id.clone())),
    }
}

fn inconsistent(ticket: &Ticket, field: &'static str, id: String) -> Error {
    Error::InconsistentState {
        ticket: ticket.number,
        field,
        id,
    }
}

/// Copies `ticket` from `source` into `destination`, comments included.
///
/// The copy is all-or-nothing for this one ticket: if anything fails while
/// the thread is copied, the new destination ticket is deleted and the
/// original error is returned. Attachments are only copied when a `fetcher`
/// is supplied.
pub fn copy_ticket<R: Remote + ?Sized>(
    remote: &mut R,
    source: &Space,
    destination: &Space,
    ticket: &Ticket,
    ctx: &CopyContext<'_>,
    fetcher: Option<&mut (dyn FileFetcher + '_)>,
) -> Result<CopiedTicket> {
    let request = translate_ticket(ticket, ctx)?;
    let created = remote.create_ticket(&destination.id, &request)?;
    debug!("created ticket #{} as #{}", ticket.number, created.number);

    match copy_thread(remote, source, destination, ticket, &created, ctx, fetcher) {
        Ok((comments, attachments)) => Ok(CopiedTicket {
            ticket: created,
            comments,
            attachments,
        }),
        Err(e) => {
            warn!(
                "copying thread of ticket #{} failed, deleting #{}: {}",
                ticket.number, created.number, e
            );
            if let Err(delete_err) = remote.delete_ticket(&destination.id, created.number) {
                error!(
                    "failed to delete partial ticket #{}: {}",
                    created.number, delete_err
                );
            }
            Err(e)
        }
    }
}

fn copy_thread<R: Remote + ?Sized>(
    remote: &mut R,
    source: &Space,
    destination: &Space,
    original: &Ticket,
    created: &Ticket,
    ctx: &CopyContext<'_>,
    mut fetcher: Option<&mut (dyn FileFetcher + '_)>,
) -> Result<(usize, usize)> {
    let mut comments = 0;
    let mut attachments = 0;

    for comment in remote.list_comments(&source.id, original.number)? {
        if let Some(document_id) = comment.attachment_id() {
            let Some(fetcher) = fetcher.as_deref_mut() else {
                debug!("skipping attachment {} without credentials", document_id);
                continue;
            };
            if copy_attachment(remote, source, destination, created, &document_id, fetcher)? {
                attachments += 1;
            }
            continue;
        }

        let Some(request) = comment_request(&comment, ctx.numbers) else {
            debug!("skipping empty comment {}", comment.id);
            continue;
        };
        let posted = remote.create_comment(&destination.id, created.number, &request)?;
        debug!("copied comment {} as {}", comment.id, posted.id);
        comments += 1;
    }

    Ok((comments, attachments))
}

/// Builds the destination comment: human text with references rewritten, or
/// a readable rendition of a changelog entry.
fn comment_request(comment: &Comment, numbers: &NumberMap) -> Option<Comment> {
    let text = match (comment.human_text(), comment.ticket_changes.as_deref()) {
        (Some(text), _) => rewrite_references(text, numbers),
        (None, Some(changes)) if !changes.is_empty() => prettify_changes(changes),
        _ => return None,
    };
    Some(Comment {
        id: String::new(),
        comment: Some(text),
        ticket_changes: None,
        ..comment.clone()
    })
}

/// Re-uploads one attachment. Returns false when the source no longer has
/// the document.
fn copy_attachment<R: Remote + ?Sized>(
    remote: &mut R,
    source: &Space,
    destination: &Space,
    ticket: &Ticket,
    document_id: &str,
    fetcher: &mut (dyn FileFetcher + '_),
) -> Result<bool> {
    let document = match remote.get_document(&source.id, document_id) {
        Ok(document) => document,
        Err(e) if e.is_not_found() => {
            debug!("document {} not found, skipping", document_id);
            return Ok(false);
        }
        Err(e) => return Err(e),
    };
    let Some(url) = document.url.as_deref() else {
        warn!("document {} has no download url, skipping", document_id);
        return Ok(false);
    };

    let content = fetcher.fetch(url)?;
    let attached = remote.attach_document(&destination.id, ticket, &document, content)?;
    debug!("attached {} as {}", document.name, attached.id);
    Ok(true)
}

#[cfg(test)]
#[path = "tickets_tests.rs"]
mod tests;
