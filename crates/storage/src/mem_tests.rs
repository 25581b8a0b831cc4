// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn mem_sequence_commits_on_save() {
    let mut seq = MemSequence::new("scratch");
    seq.push(json!(10));
    seq.push(json!(20));
    assert!(seq.changed());

    seq.save().unwrap();
    assert!(!seq.changed());
    assert_eq!(seq.underlay(), &[json!(10), json!(20)]);

    seq.set(0, json!(11)).unwrap();
    assert_eq!(seq.get_old(0).unwrap(), &json!(10));
    assert_eq!(seq.get(0).unwrap(), &json!(11));
}

#[test]
fn mem_map_commits_on_save() {
    let mut map = MemMap::new("scratch");
    map.set("k", json!("v")).unwrap();
    map.save().unwrap();
    assert!(!map.changed());
    assert_eq!(map.get_old("k").unwrap(), &json!("v"));
}

#[test]
fn purge_resets_everything() {
    let mut seq = MemSequence::new("scratch");
    seq.push(json!(1));
    seq.save().unwrap();
    seq.push(json!(2));

    seq.purge().unwrap();
    assert!(seq.is_empty());
    assert!(seq.underlay().is_empty());
    assert!(!seq.changed());
}
