// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the scheduler

use thiserror::Error;
use weir_core::{ObjectError, PollError};
use weir_topology::TopologyError;

/// Mismatches between the topology and the registered instances, detected
/// at scheduler construction.
#[derive(Debug, Error)]
pub enum ConsistencyError {
    #[error("duplicate object instance: {0}")]
    DuplicateObject(String),
    #[error("duplicate process instance: {0}")]
    DuplicateProcess(String),
    #[error("object {0} has no registered instance")]
    UnboundObject(String),
    #[error("topology processes {topology:?} do not match registered instances {instances:?}")]
    ProcessSetMismatch {
        topology: Vec<String>,
        instances: Vec<String>,
    },
    #[error("topology objects {topology:?} do not match registered instances {instances:?}")]
    ObjectSetMismatch {
        topology: Vec<String>,
        instances: Vec<String>,
    },
    #[error("process {process} declares {direction} ports {declared:?} but the topology binds {bound:?}")]
    PortMismatch {
        process: String,
        direction: &'static str,
        declared: Vec<String>,
        bound: Vec<String>,
    },
    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Failures inside one step. Either a poll raised (the wave is aborted) or
/// a save failed after the wave (persistence is best-effort; the first
/// failure is reported after every changed object has been attempted).
#[derive(Debug, Error)]
pub enum StepError {
    #[error("poll failed for process {process}: {source}")]
    Poll { process: String, source: PollError },
    #[error("save failed for object {object}: {source}")]
    Save {
        object: String,
        source: ObjectError,
    },
}

/// Top-level scheduler errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error("lifecycle hook failed for object {object}: {source}")]
    ObjectLifecycle {
        object: String,
        source: ObjectError,
    },
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),
}
