// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;

/// Apply a change log to a copy of the underlay.
fn replay(underlay: &[Value], log: &[SequenceChange]) -> Vec<Value> {
    let mut out = underlay.to_vec();
    for change in log {
        match change {
            SequenceChange::Insert { index, value } => out.insert(*index, value.clone()),
            SequenceChange::Set { index, value } => out[*index] = value.clone(),
            SequenceChange::Remove { index, .. } => {
                out.remove(*index);
            }
        }
    }
    out
}

#[test]
fn insert_remove_set() {
    let mut state = SequenceState::new();
    state.insert(0, json!(10)).unwrap();
    state.insert(1, json!(20)).unwrap();
    state.insert(0, json!(5)).unwrap(); // [5, 10, 20]

    assert_eq!(state.len(), 3);
    assert_eq!(state.get(0).unwrap(), &json!(5));
    assert_eq!(state.get(2).unwrap(), &json!(20));

    state.remove(1).unwrap(); // [5, 20]
    assert_eq!(state.get(1).unwrap(), &json!(20));

    state.set(1, json!(99)).unwrap(); // [5, 99]
    assert_eq!(state.get(1).unwrap(), &json!(99));
    assert_eq!(state.log().len(), 5);
}

#[test]
fn push_appends_and_logs_inserts() {
    let mut state = SequenceState::new();
    state.push(json!(10));
    state.push(json!(20));

    assert_eq!(state.len(), 2);
    assert_eq!(
        state.log(),
        &[
            SequenceChange::Insert {
                index: 0,
                value: json!(10)
            },
            SequenceChange::Insert {
                index: 1,
                value: json!(20)
            },
        ]
    );
}

#[test]
fn views_diverge_until_commit() {
    let mut state = SequenceState::new();
    state.push(json!(100));
    state.commit();

    state.push(json!(200));
    state.set(0, json!(101)).unwrap();

    assert_eq!(state.get(0).unwrap(), &json!(101));
    assert_eq!(state.get(1).unwrap(), &json!(200));
    assert_eq!(state.get_old(0).unwrap(), &json!(100));
    assert!(matches!(
        state.get_old(1),
        Err(ObjectError::InvalidIndex { index: 1, len: 1 })
    ));
    assert_eq!(state.underlay().len(), 1);
}

#[test]
fn set_same_value_is_not_logged() {
    let mut state = SequenceState::new();
    state.push(json!(7));
    state.commit();
    assert!(!state.changed());

    state.set(0, json!(7)).unwrap();
    assert!(!state.changed());

    state.set(0, json!(8)).unwrap();
    assert!(state.changed());
    assert_eq!(state.log().len(), 1);
}

#[test]
fn commit_promotes_overlay_and_clears_log() {
    let mut state = SequenceState::new();
    state.push(json!(1));
    state.push(json!(2));
    state.set(0, json!(3)).unwrap();
    state.remove(1).unwrap();
    assert_eq!(state.log().len(), 4);

    state.commit();
    assert!(state.log().is_empty());
    assert!(!state.changed());
    assert_eq!(state.underlay(), state.overlay());
    assert_eq!(state.get(0).unwrap(), &json!(3));
}

#[test]
fn clear_resets_both_views() {
    let mut state = SequenceState::new();
    state.push(json!(1));
    state.commit();
    state.push(json!(2));

    state.clear();
    assert!(state.is_empty());
    assert!(state.underlay().is_empty());
    assert!(!state.changed());
}

#[test]
fn load_discards_pending_changes() {
    let mut state = SequenceState::new();
    state.push(json!(1));

    state.load(vec![json!(9), json!(8)]);
    assert!(!state.changed());
    assert_eq!(state.overlay(), state.underlay());
    assert_eq!(state.len(), 2);
}

#[yare::parameterized(
    insert_past_end = { 3 },
    insert_far      = { 100 },
)]
fn insert_out_of_bounds(index: usize) {
    let mut state = SequenceState::new();
    state.push(json!(1));
    state.push(json!(2));
    assert!(matches!(
        state.insert(index, json!(0)),
        Err(ObjectError::InvalidIndex { len: 2, .. })
    ));
}

#[yare::parameterized(
    at_len     = { 2 },
    beyond_len = { 5 },
)]
fn set_and_remove_require_existing_index(index: usize) {
    let mut state = SequenceState::new();
    state.push(json!(1));
    state.push(json!(2));
    assert!(state.set(index, json!(0)).is_err());
    assert!(state.remove(index).is_err());
}

proptest! {
    // overlay == apply(change_log, underlay), for any op sequence
    #[test]
    fn overlay_is_underlay_plus_log(
        initial in prop::collection::vec(0i64..100, 0..8),
        ops in prop::collection::vec((0u8..4, 0usize..16, 0i64..100), 0..32),
    ) {
        let mut state = SequenceState::new();
        state.load(initial.iter().map(|v| json!(v)).collect());

        for (op, index, val) in ops {
            match op {
                0 => state.push(json!(val)),
                1 => {
                    let i = index % (state.len() + 1);
                    state.insert(i, json!(val)).unwrap();
                }
                2 if !state.is_empty() => {
                    let i = index % state.len();
                    state.set(i, json!(val)).unwrap();
                }
                3 if !state.is_empty() => {
                    state.remove(index % state.len()).unwrap();
                }
                _ => {}
            }
        }

        prop_assert_eq!(replay(state.underlay(), state.log()), state.overlay().to_vec());
    }
}
