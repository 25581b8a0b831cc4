// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change-tracked ordered sequence state.
//!
//! Two views: the *underlay* is the state as of the last commit, the
//! *overlay* is the current in-flight state. Every mutation updates the
//! overlay and appends to the change log, so the overlay always equals the
//! underlay with the log applied. Committing promotes the overlay and
//! empties the log.

use crate::error::ObjectError;
use crate::Value;
use serde::{Deserialize, Serialize};

/// One recorded mutation of a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SequenceChange {
    Insert { index: usize, value: Value },
    Set { index: usize, value: Value },
    /// The removed value is kept for inspection; replay only needs the index.
    Remove { index: usize, value: Value },
}

/// Two-view ordered sequence with an append-only change log.
#[derive(Debug, Clone, Default)]
pub struct SequenceState {
    underlay: Vec<Value>,
    overlay: Vec<Value>,
    log: Vec<SequenceChange>,
}

impl SequenceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the underlay with loaded data and reset the overlay to match.
    /// Any pending changes are discarded.
    pub fn load(&mut self, underlay: Vec<Value>) {
        self.overlay = underlay.clone();
        self.underlay = underlay;
        self.log.clear();
    }

    /// Current (overlay) value at `index`.
    pub fn get(&self, index: usize) -> Result<&Value, ObjectError> {
        self.overlay.get(index).ok_or(ObjectError::InvalidIndex {
            index,
            len: self.overlay.len(),
        })
    }

    /// Persisted (underlay) value at `index`. Indices may differ from the
    /// overlay's once inserts or removes are pending.
    pub fn get_old(&self, index: usize) -> Result<&Value, ObjectError> {
        self.underlay.get(index).ok_or(ObjectError::InvalidIndex {
            index,
            len: self.underlay.len(),
        })
    }

    /// Insert `value` at `index`, shifting later elements. `index == len`
    /// appends.
    pub fn insert(&mut self, index: usize, value: Value) -> Result<(), ObjectError> {
        if index > self.overlay.len() {
            return Err(ObjectError::InvalidIndex {
                index,
                len: self.overlay.len(),
            });
        }
        self.overlay.insert(index, value.clone());
        self.log.push(SequenceChange::Insert { index, value });
        Ok(())
    }

    /// Append `value` at the end.
    pub fn push(&mut self, value: Value) {
        let index = self.overlay.len();
        self.overlay.push(value.clone());
        self.log.push(SequenceChange::Insert { index, value });
    }

    /// Overwrite the value at `index`. Setting the value already present is
    /// a no-op and leaves the change log untouched.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), ObjectError> {
        let len = self.overlay.len();
        let slot = self
            .overlay
            .get_mut(index)
            .ok_or(ObjectError::InvalidIndex { index, len })?;
        if *slot == value {
            return Ok(());
        }
        *slot = value.clone();
        self.log.push(SequenceChange::Set { index, value });
        Ok(())
    }

    /// Remove and return the value at `index`, shifting later elements.
    pub fn remove(&mut self, index: usize) -> Result<Value, ObjectError> {
        if index >= self.overlay.len() {
            return Err(ObjectError::InvalidIndex {
                index,
                len: self.overlay.len(),
            });
        }
        let value = self.overlay.remove(index);
        self.log.push(SequenceChange::Remove {
            index,
            value: value.clone(),
        });
        Ok(value)
    }

    /// Overlay length.
    pub fn len(&self) -> usize {
        self.overlay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlay.is_empty()
    }

    /// Iterate overlay values in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.overlay.iter()
    }

    /// True iff there are uncommitted changes.
    pub fn changed(&self) -> bool {
        !self.log.is_empty()
    }

    /// Mutations recorded since the last commit.
    pub fn log(&self) -> &[SequenceChange] {
        &self.log
    }

    pub fn underlay(&self) -> &[Value] {
        &self.underlay
    }

    pub fn overlay(&self) -> &[Value] {
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
#[path = "sequence_tests.rs"]
mod tests;
