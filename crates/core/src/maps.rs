// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Translation tables built during one migration run.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Source ticket id → destination ticket id.
pub type IdMap = HashMap<String, String>;

/// Source ticket number → destination ticket number.
///
/// Iteration follows insertion order, which is the order the source listed
/// the tickets being migrated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberMap {
    entries: Vec<(u64, u64)>,
    index: HashMap<u64, u64>,
}

impl NumberMap {
    pub fn new() -> Self {
        NumberMap::default()
    }

    /// Maps every number to itself.
    pub fn identity(numbers: impl IntoIterator<Item = u64>) -> Self {
        numbers.into_iter().map(|n| (n, n)).collect()
    }

    /// Records a translation. A repeated source number keeps its first mapping.
    pub fn insert(&mut self, source: u64, destination: u64) {
        if self.index.contains_key(&source) {
            return;
        }
        self.index.insert(source, destination);
        self.entries.push((source, destination));
    }

    pub fn get(&self, source: u64) -> Option<u64> {
        self.index.get(&source).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every number maps to itself.
    pub fn is_identity(&self) -> bool {
        self.entries.iter().all(|(s, d)| s == d)
    }
}

impl FromIterator<(u64, u64)> for NumberMap {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        let mut map = NumberMap::new();
        for (source, destination) in iter {
            map.insert(source, destination);
        }
        map
    }
}

impl Serialize for NumberMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (source, destination) in &self.entries {
            map.serialize_entry(&source.to_string(), destination)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "maps_tests.rs"]
mod tests;
