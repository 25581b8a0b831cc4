// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box CLI behavior: exit codes, stderr diagnostics, file effects.

use crate::prelude::weir;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// `weir init demo` under a scratch dir; returns the project path.
fn init_project(root: &Path) -> std::path::PathBuf {
    weir(root).args(["init", "demo"]).assert().success();
    root.join("demo")
}

#[test]
fn init_scaffolds_a_project() {
    let tmp = tempdir().unwrap();
    let project = init_project(tmp.path());

    assert!(project.join("weir.toml").exists());
    assert!(project.join("topology.yaml").exists());
    assert!(project.join("data").join("objects").is_dir());

    // Refuses a second time
    weir(tmp.path()).args(["init", "demo"]).assert().failure();
}

#[test]
fn topology_edits_round_trip_through_the_file() {
    let tmp = tempdir().unwrap();
    let project = init_project(tmp.path());

    weir(&project)
        .args(["topology", "add-object", "raw"])
        .assert()
        .success();
    weir(&project)
        .args(["topology", "add-object", "clean"])
        .assert()
        .success();
    weir(&project)
        .args([
            "topology",
            "add-process",
            "ingest",
            "--output",
            "out:raw",
        ])
        .assert()
        .success();
    weir(&project)
        .args([
            "topology",
            "add-process",
            "scrub",
            "--input",
            "inp:raw",
            "--output",
            "out:clean",
        ])
        .assert()
        .success();

    let doc: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(project.join("topology.yaml")).unwrap()).unwrap();
    assert_eq!(
        doc["processes"]["scrub"]["inputs"]["inp"].as_str(),
        Some("raw")
    );

    weir(&project)
        .args(["topology", "validate"])
        .assert()
        .success()
        .stdout(predicates::str::contains("topology is valid"));
}

#[test]
fn validate_reports_diagnostics_and_fails() {
    let tmp = tempdir().unwrap();
    let project = init_project(tmp.path());

    weir(&project)
        .args(["topology", "add-object", "orphan"])
        .assert()
        .success();

    weir(&project)
        .args(["topology", "validate"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("object orphan has no producer"));
}

#[test]
fn graph_rule_violations_abort_the_command() {
    let tmp = tempdir().unwrap();
    let project = init_project(tmp.path());

    weir(&project)
        .args(["topology", "add-object", "a"])
        .assert()
        .success();

    // Duplicate object
    weir(&project)
        .args(["topology", "add-object", "a"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("already exists"));

    // Unknown object in wiring
    weir(&project)
        .args(["topology", "add-process", "p", "--output", "out:ghost"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("does not exist"));

    // Object still wired
    weir(&project)
        .args(["topology", "add-process", "p", "--output", "out:a"])
        .assert()
        .success();
    weir(&project)
        .args(["topology", "remove-object", "a"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("still used"));
}

#[test]
fn from_yaml_adopts_an_external_topology() {
    let tmp = tempdir().unwrap();
    let project = init_project(tmp.path());

    let source = tmp.path().join("incoming.yaml");
    fs::write(
        &source,
        "objects: [a, b]\nprocesses:\n  gen:\n    outputs: {out: a}\n  copy:\n    inputs: {inp: a}\n    outputs: {out: b}\n",
    )
    .unwrap();

    weir(&project)
        .args(["topology", "from-yaml"])
        .arg(&source)
        .assert()
        .success();

    let text = fs::read_to_string(project.join("topology.yaml")).unwrap();
    assert!(text.contains("gen"));
    assert!(text.contains("copy"));
}

#[test]
fn commands_outside_a_project_fail() {
    let tmp = tempdir().unwrap();
    weir(tmp.path())
        .args(["topology", "validate"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("weir.toml"));
    weir(tmp.path())
        .args(["run"])
        .assert()
        .failure();
}
