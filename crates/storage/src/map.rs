// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem-backed map object, one file per key.

use crate::fs::atomic_write;
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use weir_core::map::valid_key;
use weir_core::{MapChange, MapState, Object, ObjectError, Value};

/// A map persisted as one file per key (filename = key) under its own
/// directory.
///
/// Derefs to [`MapState`] for the data operations. Key removal is deferred:
/// the overlay forgets the key immediately, the file disappears on the next
/// `save`. Loading skips directory entries that are not valid keys, which
/// also keeps `.tmp` staging leftovers out of the underlay.
pub struct FsMap {
    name: String,
    dir: PathBuf,
    state: MapState,
}

impl FsMap {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            state: MapState::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Deref for FsMap {
    type Target = MapState;

    fn deref(&self) -> &MapState {
        &self.state
    }
}

impl DerefMut for FsMap {
    fn deref_mut(&mut self) -> &mut MapState {
        &mut self.state
    }
}

impl Object for FsMap {
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
        let mut underlay = BTreeMap::new();
        if self.dir.exists() {
            for entry in fs::read_dir(&self.dir)? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }
                let Some(key) = entry.file_name().to_str().map(str::to_string) else {
                    continue;
                };
                if !valid_key(&key) {
                    warn!(object = %self.name, file = %key, "skipping stray file");
                    continue;
                }
                let value: Value = serde_json::from_slice(&fs::read(entry.path())?)?;
                underlay.insert(key, value);
            }
        }
        debug!(object = %self.name, keys = underlay.len(), "loaded map");
        self.state.load(underlay);
        Ok(())
    }

    fn save(&mut self) -> Result<(), ObjectError> {
        // Files to delete: keys committed previously but gone from the overlay.
        let doomed: Vec<String> = self
            .state
            .underlay()
            .keys()
            .filter(|key| !self.state.contains(key))
            .cloned()
            .collect();
        // Keys to rewrite: touched by the log and still present.
        let touched: BTreeSet<&str> = self
            .state
            .log()
            .iter()
            .filter_map(|change| match change {
                MapChange::Set { key, .. } => Some(key.as_str()),
                MapChange::Remove { .. } => None,
            })
            .filter(|key| self.state.contains(key))
            .collect();

        for key in &touched {
            let value = self.state.get(key)?;
            atomic_write(&self.dir.join(key), &serde_json::to_vec_pretty(value)?)?;
        }
        for key in &doomed {
            let path = self.dir.join(key);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        debug!(
            object = %self.name,
            written = touched.len(),
            deleted = doomed.len(),
            "saved map",
        );
        self.state.commit();
        Ok(())
    }

    fn purge(&mut self) -> Result<(), ObjectError> {
        self.state.clear();
        if self.dir.exists() {
            for entry in fs::read_dir(&self.dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    fs::remove_file(entry.path())?;
                }
            }
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
#[path = "map_tests.rs"]
mod tests;
