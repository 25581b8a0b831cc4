// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for topology mutation, validation, and serialization

use thiserror::Error;

/// Errors raised by topology operations.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("object {0} already exists")]
    DuplicateObject(String),
    #[error("process {0} already exists")]
    DuplicateProcess(String),
    #[error("object {0} does not exist")]
    ObjectNotFound(String),
    #[error("process {0} does not exist")]
    ProcessNotFound(String),
    #[error("object {object} referenced by port {port} does not exist")]
    MissingObject { port: String, object: String },
    #[error("object {object} already has producer {producer}")]
    DoubleProducer { object: String, producer: String },
    #[error("object {object} is still used by process {process}")]
    InUse { object: String, process: String },
    #[error("graph contains a cycle")]
    CycleDetected,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
