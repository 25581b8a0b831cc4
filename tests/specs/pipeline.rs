// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Full pipeline runs over filesystem-backed objects.

use crate::prelude::{wiring, CounterSource, EvenFilter};
use serde_json::json;
use tempfile::tempdir;
use weir_core::{share, share_process, Object, SharedObject};
use weir_engine::Scheduler;
use weir_storage::FsSequence;
use weir_topology::Topology;

fn fs_sequence(name: &str, dir: &std::path::Path) -> SharedObject {
    let object = share(FsSequence::new(name, dir.join(name)));
    {
        let mut guard = object.lock();
        guard.on_add_to_pipeline().unwrap();
        guard.on_pipeline_start().unwrap();
    }
    object
}

fn sequence_numbers(object: &SharedObject) -> Vec<i64> {
    let guard = object.lock();
    let seq = guard.as_any().downcast_ref::<FsSequence>().unwrap();
    seq.iter().filter_map(serde_json::Value::as_i64).collect()
}

#[test]
fn counter_filter_pipeline_runs_and_persists() {
    let tmp = tempdir().unwrap();

    let mut topology = Topology::new();
    topology.add_object("numbers").unwrap();
    topology.add_object("evens").unwrap();
    topology
        .add_process("source", wiring(&[]), wiring(&[("out", "numbers")]))
        .unwrap();
    topology
        .add_process(
            "filter",
            wiring(&[("inp", "numbers")]),
            wiring(&[("out", "evens")]),
        )
        .unwrap();

    let numbers = fs_sequence("numbers", tmp.path());
    let evens = fs_sequence("evens", tmp.path());
    let mut scheduler = Scheduler::new(
        topology,
        vec![
            share_process(CounterSource::new("source", 5)),
            share_process(EvenFilter::new("filter")),
        ],
        vec![numbers.clone(), evens.clone()],
        4,
    )
    .unwrap();

    for _ in 0..10 {
        scheduler.step().unwrap();
    }

    assert_eq!(sequence_numbers(&numbers), vec![0, 1, 2, 3, 4]);
    assert_eq!(sequence_numbers(&evens), vec![0, 2, 4]);

    // Steps saved as they went; nothing is pending
    assert!(!numbers.lock().changed());
    assert!(!evens.lock().changed());

    // A fresh instance over the same directory sees the saved underlay
    let mut reloaded = FsSequence::new("evens", tmp.path().join("evens"));
    reloaded.on_pipeline_start().unwrap();
    assert_eq!(
        reloaded.underlay(),
        &[json!(0), json!(2), json!(4)],
    );
    assert!(!reloaded.changed());
}

#[test]
fn quiet_steps_do_not_save() {
    let tmp = tempdir().unwrap();

    let mut topology = Topology::new();
    topology.add_object("numbers").unwrap();
    topology
        .add_process("source", wiring(&[]), wiring(&[("out", "numbers")]))
        .unwrap();

    let numbers = fs_sequence("numbers", tmp.path());
    let mut scheduler = Scheduler::new(
        topology,
        vec![share_process(CounterSource::new("source", 2))],
        vec![numbers.clone()],
        1,
    )
    .unwrap();

    assert!(scheduler.step().unwrap());
    assert!(scheduler.step().unwrap());
    // Source exhausted: no change, no save
    assert!(!scheduler.step().unwrap());
}
