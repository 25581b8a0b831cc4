// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change-tracked keyed map state.
//!
//! Same two-view shape as [`SequenceState`](crate::SequenceState): underlay
//! (last committed), overlay (in-flight), and an append-only change log.
//! Keys are restricted to `[A-Za-z0-9_]+` so filesystem-backed maps can use
//! the key verbatim as a file name.

use crate::error::ObjectError;
use crate::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded mutation of a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapChange {
    Set { key: String, value: Value },
    Remove { key: String },
}

/// True when `key` is non-empty and contains only ASCII alphanumerics and
/// underscores.
pub fn valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Two-view keyed map with an append-only change log.
#[derive(Debug, Clone, Default)]
pub struct MapState {
    underlay: BTreeMap<String, Value>,
    overlay: BTreeMap<String, Value>,
    log: Vec<MapChange>,
}

impl MapState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the underlay with loaded data and reset the overlay to match.
    /// Any pending changes are discarded.
    pub fn load(&mut self, underlay: BTreeMap<String, Value>) {
        self.overlay = underlay.clone();
        self.underlay = underlay;
        self.log.clear();
    }

    /// Current (overlay) value for `key`.
    pub fn get(&self, key: &str) -> Result<&Value, ObjectError> {
        self.overlay
            .get(key)
            .ok_or_else(|| ObjectError::KeyNotFound(key.to_string()))
    }

    /// Persisted (underlay) value for `key`. The views miss independently:
    /// a freshly set key is absent here, a removed key is still present.
    pub fn get_old(&self, key: &str) -> Result<&Value, ObjectError> {
        self.underlay
            .get(key)
            .ok_or_else(|| ObjectError::KeyNotFound(key.to_string()))
    }

    /// Insert or overwrite `key`. Always records a change, even when the
    /// value is unchanged.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), ObjectError> {
        if !valid_key(key) {
            return Err(ObjectError::InvalidKey(key.to_string()));
        }
        self.overlay.insert(key.to_string(), value.clone());
        self.log.push(MapChange::Set {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    /// Remove `key`. No-op when absent.
    pub fn remove(&mut self, key: &str) {
        if self.overlay.remove(key).is_some() {
            self.log.push(MapChange::Remove {
                key: key.to_string(),
            });
        }
    }

    /// True when `key` exists in the overlay.
    pub fn contains(&self, key: &str) -> bool {
        self.overlay.contains_key(key)
    }

    /// Overlay keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.overlay.keys().map(String::as_str)
    }

    /// Iterate overlay entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.overlay.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay entry count.
    pub fn len(&self) -> usize {
        self.overlay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlay.is_empty()
    }

    /// True iff there are uncommitted changes.
    pub fn changed(&self) -> bool {
        !self.log.is_empty()
    }

    /// Mutations recorded since the last commit.
    pub fn log(&self) -> &[MapChange] {
        &self.log
    }

    pub fn underlay(&self) -> &BTreeMap<String, Value> {
        &self.underlay
    }

    pub fn overlay(&self) -> &BTreeMap<String, Value> {
        &self.overlay
    }

    /// Promote the overlay to the underlay and clear the change log.
    pub fn commit(&mut self) {
        self.underlay = self.overlay.clone();
        self.log.clear();
    }

    /// Reset both views to empty and drop pending changes.
    pub fn clear(&mut self) {
        self.underlay.clear();
        self.overlay.clear();
        self.log.clear();
    }
}

#[cfg(test)]
#[path = "map_tests.rs"]
mod tests;
