// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Taxonomy reconciliation by natural key.
//!
//! Statuses and custom fields are created for parity only; tickets refer to
//! them by value. Components and milestones are referenced by foreign id,
//! so their reconciliation also yields a source-id → destination-id map.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::Result;
use crate::maps::IdMap;
use crate::model::{Component, CustomField, Milestone, Space, TicketStatus};
use crate::remote::Remote;

/// A lookup-table entity matched across spaces by a natural key.
pub trait Taxonomy: Sized {
    /// Name used in logs.
    const KIND: &'static str;
    /// Whether tickets reference this kind by foreign id.
    const REMAPPED: bool;

    fn id(&self) -> &str;
    fn natural_key(&self) -> &str;
    fn list<R: Remote + ?Sized>(remote: &mut R, space: &str) -> Result<Vec<Self>>;
    fn create<R: Remote + ?Sized>(remote: &mut R, space: &str, entity: &Self) -> Result<Self>;
}

impl Taxonomy for TicketStatus {
    const KIND: &'static str = "status";
    const REMAPPED: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
    fn natural_key(&self) -> &str {
        &self.name
    }
    fn list<R: Remote + ?Sized>(remote: &mut R, space: &str) -> Result<Vec<Self>> {
        remote.list_statuses(space)
    }
    fn create<R: Remote + ?Sized>(remote: &mut R, space: &str, entity: &Self) -> Result<Self> {
        remote.create_status(space, entity)
    }
}

impl Taxonomy for CustomField {
    const KIND: &'static str = "custom field";
    const REMAPPED: bool = false;

    fn id(&self) -> &str {
        &self.id
    }
    fn natural_key(&self) -> &str {
        &self.title
    }
    fn list<R: Remote + ?Sized>(remote: &mut R, space: &str) -> Result<Vec<Self>> {
        remote.list_custom_fields(space)
    }
    fn create<R: Remote + ?Sized>(remote: &mut R, space: &str, entity: &Self) -> Result<Self> {
        remote.create_custom_field(space, entity)
    }
}

impl Taxonomy for Component {
    const KIND: &'static str = "component";
    const REMAPPED: bool = true;

    fn id(&self) -> &str {
        &self.id
    }
    fn natural_key(&self) -> &str {
        &self.name
    }
    fn list<R: Remote + ?Sized>(remote: &mut R, space: &str) -> Result<Vec<Self>> {
        remote.list_components(space)
    }
    fn create<R: Remote + ?Sized>(remote: &mut R, space: &str, entity: &Self) -> Result<Self> {
        remote.create_component(space, entity)
    }
}

impl Taxonomy for Milestone {
    const KIND: &'static str = "milestone";
    const REMAPPED: bool = true;

    fn id(&self) -> &str {
        &self.id
    }
    fn natural_key(&self) -> &str {
        &self.title
    }
    fn list<R: Remote + ?Sized>(remote: &mut R, space: &str) -> Result<Vec<Self>> {
        remote.list_milestones(space)
    }
    fn create<R: Remote + ?Sized>(remote: &mut R, space: &str, entity: &Self) -> Result<Self> {
        remote.create_milestone(space, entity)
    }
}

/// Result of reconciling one taxonomy kind.
#[derive(Debug, Default)]
pub struct Reconciled {
    /// Source id → destination id; empty for kinds that are not remapped.
    pub ids: IdMap,
    pub matched: usize,
    pub created: usize,
}

/// Matches every source entity of kind `T` in the destination, creating
/// the ones whose natural key is missing.
///
/// Re-running against an already reconciled pair creates nothing.
pub fn reconcile<T, R>(remote: &mut R, source: &Space, destination: &Space) -> Result<Reconciled>
where
    T: Taxonomy,
    R: Remote + ?Sized,
{
    tracing::debug!("reconciling {}", T::KIND);
    let wanted = T::list(remote, &source.id)?;
    let existing: HashMap<String, String> = T::list(remote, &destination.id)?
        .iter()
        .map(|e| (e.natural_key().to_string(), e.id().to_string()))
        .collect();

    let mut result = Reconciled::default();
    let mut missing = Vec::new();
    for entity in &wanted {
        match existing.get(entity.natural_key()) {
            Some(dest_id) => {
                tracing::debug!("{} '{}' already present", T::KIND, entity.natural_key());
                if T::REMAPPED {
                    result.ids.insert(entity.id().to_string(), dest_id.clone());
                }
                result.matched += 1;
            }
            None => missing.push(entity),
        }
    }

    for entity in missing {
        let created = T::create(remote, &destination.id, entity)?;
        tracing::debug!("created {} '{}' as {}", T::KIND, entity.natural_key(), created.id());
        if T::REMAPPED {
            result.ids.insert(entity.id().to_string(), created.id().to_string());
        }
        result.created += 1;
    }

    tracing::debug!(
        "{}: {} matched, {} created",
        T::KIND,
        result.matched,
        result.created
    );
    Ok(result)
}

/// Number of taxonomy entities created in the destination, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaxonomyCounts {
    pub statuses: usize,
    pub custom_fields: usize,
    pub components: usize,
    pub milestones: usize,
}

/// Id maps produced by taxonomy reconciliation.
#[derive(Debug, Default)]
pub struct TaxonomyMaps {
    pub components: IdMap,
    pub milestones: IdMap,
    pub created: TaxonomyCounts,
}

/// Reconciles statuses, custom fields, components and milestones, in that order.
///
/// Creations are not rolled back if a later stage of the run aborts.
pub fn reconcile_taxonomies<R: Remote + ?Sized>(
    remote: &mut R,
    source: &Space,
    destination: &Space,
) -> Result<TaxonomyMaps> {
    let statuses = reconcile::<TicketStatus, _>(remote, source, destination)?;
    let custom_fields = reconcile::<CustomField, _>(remote, source, destination)?;
    let components = reconcile::<Component, _>(remote, source, destination)?;
    let milestones = reconcile::<Milestone, _>(remote, source, destination)?;

    Ok(TaxonomyMaps {
        created: TaxonomyCounts {
            statuses: statuses.created,
            custom_fields: custom_fields.created,
            components: components.created,
            milestones: milestones.created,
        },
        components: components.ids,
        milestones: milestones.ids,
    })
}

#[cfg(test)]
#[path = "taxonomy_tests.rs"]
mod tests;
