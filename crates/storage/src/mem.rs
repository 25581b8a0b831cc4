// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory objects: the two-view contract without a backing store.
//!
//! `save` still promotes the overlay and clears the change log, so these
//! behave exactly like their filesystem-backed siblings minus persistence.
//! Useful in tests and for intermediate objects nobody needs across runs.

use std::any::Any;
use std::ops::{Deref, DerefMut};
use weir_core::{MapState, Object, ObjectError, SequenceState};

pub struct MemSequence {
    name: String,
    state: SequenceState,
}

impl MemSequence {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: SequenceState::new(),
        }
    }
}

impl Deref for MemSequence {
    type Target = SequenceState;

    fn deref(&self) -> &SequenceState {
        &self.state
    }
}

impl DerefMut for MemSequence {
    fn deref_mut(&mut self) -> &mut SequenceState {
        &mut self.state
    }
}

impl Object for MemSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn save(&mut self) -> Result<(), ObjectError> {
        self.state.commit();
        Ok(())
    }

    fn purge(&mut self) -> Result<(), ObjectError> {
        self.state.clear();
        Ok(())
    }

    fn changed(&self) -> bool {
        self.state.changed()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub struct MemMap {
    name: String,
    state: MapState,
}

impl MemMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: MapState::new(),
        }
    }
}

impl Deref for MemMap {
    type Target = MapState;

    fn deref(&self) -> &MapState {
        &self.state
    }
}

impl DerefMut for MemMap {
    fn deref_mut(&mut self) -> &mut MapState {
        &mut self.state
    }
}

impl Object for MemMap {
    fn name(&self) -> &str {
        &self.name
    }

    fn save(&mut self) -> Result<(), ObjectError> {
        self.state.commit();
        Ok(())
    }

    fn purge(&mut self) -> Result<(), ObjectError> {
        self.state.clear();
        Ok(())
    }

    fn changed(&self) -> bool {
        self.state.changed()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "mem_tests.rs"]
mod tests;
