// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn identity_maps_each_number_to_itself() {
    let map = NumberMap::identity([10, 11, 12]);
    assert_eq!(map.get(10), Some(10));
    assert_eq!(map.get(12), Some(12));
    assert_eq!(map.get(13), None);
    assert!(map.is_identity());
}

#[test]
fn iteration_preserves_insertion_order() {
    let map: NumberMap = [(12, 502), (10, 500), (11, 501)].into_iter().collect();
    let pairs: Vec<_> = map.iter().collect();
    assert_eq!(pairs, vec![(12, 502), (10, 500), (11, 501)]);
    assert!(!map.is_identity());
}

#[test]
fn insert_keeps_first_mapping() {
    let mut map = NumberMap::new();
    map.insert(1, 100);
    map.insert(1, 200);
    assert_eq!(map.get(1), Some(100));
    assert_eq!(map.len(), 1);
}

#[test]
fn serializes_as_ordered_object() {
    let map: NumberMap = [(11, 501), (10, 500)].into_iter().collect();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"11":501,"10":500}"#);
}
