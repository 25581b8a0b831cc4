// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared across object and port operations

use thiserror::Error;

/// Errors raised by object state and persistence operations.
#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("index {index} out of bounds for length {len}")]
    InvalidIndex { index: usize, len: usize },
    #[error("key not found: {0}")]
    KeyNotFound(String),
    #[error("invalid key {0:?}: keys must be ASCII alphanumerics or underscores")]
    InvalidKey(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when resolving a port to its bound object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("unknown port: {0}")]
    Unknown(String),
    #[error("port {port} is not bound to a {expected}")]
    WrongKind { port: String, expected: &'static str },
}

/// Error surfaced from a user `poll` implementation.
///
/// Object and port errors convert with `?`; anything else a process wants to
/// report works too.
pub type PollError = Box<dyn std::error::Error + Send + Sync + 'static>;
