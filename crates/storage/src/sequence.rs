// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-backed sequence object.

use crate::fs::atomic_write;
use std::any::Any;
use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tracing::debug;
use weir_core::{Object, ObjectError, SequenceState, Value};

const DATA_FILE: &str = "data.json";

/// A sequence persisted as a single JSON blob under its own directory.
///
/// Derefs to [`SequenceState`] for the data operations (`push`, `insert`,
/// `set`, `remove`, `get`, ...). `save` promotes the overlay and rewrites
/// the blob atomically.
pub struct FsSequence {
    name: String,
    dir: PathBuf,
    state: SequenceState,
}

impl FsSequence {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            state: SequenceState::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE)
    }
}

impl Deref for FsSequence {
    type Target = SequenceState;

    fn deref(&self) -> &SequenceState {
        &self.state
    }
}

impl DerefMut for FsSequence {
    fn deref_mut(&mut self) -> &mut SequenceState {
        &mut self.state
    }
}

impl Object for FsSequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_add_to_pipeline(&mut self) -> Result<(), ObjectError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn on_remove_from_pipeline(&mut self) -> Result<(), ObjectError> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir)?;
        }
        Ok(())
    }

    fn on_pipeline_start(&mut self) -> Result<(), ObjectError> {
        let path = self.data_path();
        let underlay: Vec<Value> = if path.exists() {
            serde_json::from_slice(&fs::read(&path)?)?
        } else {
            Vec::new()
        };
        debug!(object = %self.name, len = underlay.len(), "loaded sequence");
        self.state.load(underlay);
        Ok(())
    }

    fn save(&mut self) -> Result<(), ObjectError> {
        self.state.commit();
        let bytes = serde_json::to_vec_pretty(self.state.underlay())?;
        atomic_write(&self.data_path(), &bytes)?;
        debug!(object = %self.name, len = self.state.len(), "saved sequence");
        Ok(())
    }

    fn purge(&mut self) -> Result<(), ObjectError> {
        self.state.clear();
        let path = self.data_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
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
#[path = "sequence_tests.rs"]
mod tests;
