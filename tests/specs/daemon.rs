// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon producers running beside the step loop.

use crate::prelude::{wiring, Streamer};
use serde_json::Value;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;
use weir_core::{share, share_process, Object, ShutdownToken};
use weir_engine::Scheduler;
use weir_storage::FsSequence;
use weir_topology::Topology;

#[test]
fn daemon_output_is_bounded_and_ordered() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("stream");

    let mut topology = Topology::new();
    topology.add_object("stream").unwrap();
    topology
        .add_process("streamer", wiring(&[]), wiring(&[("out", "stream")]))
        .unwrap();

    let stream = share(FsSequence::new("stream", &dir));
    stream.lock().on_add_to_pipeline().unwrap();

    let mut scheduler = Scheduler::new(
        topology,
        vec![share_process(Streamer::new(
            "streamer",
            Duration::from_millis(3),
        ))],
        vec![stream.clone()],
        2,
    )
    .unwrap();

    let shutdown = ShutdownToken::new();
    let runner = shutdown.clone();
    let handle = thread::spawn(move || {
        let result = scheduler.start(&runner);
        (scheduler, result)
    });

    thread::sleep(Duration::from_millis(150));
    shutdown.trigger();
    let (_scheduler, result) = handle.join().unwrap();
    result.unwrap();

    let numbers: Vec<i64> = {
        let guard = stream.lock();
        let seq = guard.as_any().downcast_ref::<FsSequence>().unwrap();
        seq.iter().filter_map(Value::as_i64).collect()
    };

    // Length stays bounded; elements keep producer order
    assert!(!numbers.is_empty());
    assert!(numbers.len() <= 10);
    assert!(numbers.windows(2).all(|pair| pair[0] + 1 == pair[1]));

    // The step loop persisted the object along the way
    let mut reloaded = FsSequence::new("stream", &dir);
    reloaded.on_pipeline_start().unwrap();
    assert!(!reloaded.underlay().is_empty());
}
