// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Object capability: a named, persistent, change-tracked data holder.

use crate::error::ObjectError;
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

/// A named data holder bound to process ports.
///
/// Implementations keep two views (persisted underlay, in-flight overlay)
/// and a change log; see [`SequenceState`](crate::SequenceState) and
/// [`MapState`](crate::MapState) for the state machinery. Lifecycle order
/// over a run: `on_add_to_pipeline` once when first bound,
/// `on_pipeline_start` (load the underlay), mutations by the producer,
/// `save` at the end of each changed step, `on_pipeline_end` on shutdown.
pub trait Object: Send {
    /// Unique name within a run.
    fn name(&self) -> &str;

    /// Called once when the object is added to the pipeline, e.g. to create
    /// its backing directory.
    fn on_add_to_pipeline(&mut self) -> Result<(), ObjectError> {
        Ok(())
    }

    /// Called once when the object is removed from the pipeline, e.g. to
    /// delete its backing directory.
    fn on_remove_from_pipeline(&mut self) -> Result<(), ObjectError> {
        Ok(())
    }

    /// Called when pipeline execution starts. Loads the underlay from the
    /// backing store, or starts empty.
    fn on_pipeline_start(&mut self) -> Result<(), ObjectError> {
        Ok(())
    }

    /// Called when pipeline execution ends.
    fn on_pipeline_end(&mut self) -> Result<(), ObjectError> {
        Ok(())
    }

    /// Promote the overlay to the underlay, persist it, and clear the
    /// change log. Must be crash-safe: a reload observes either the prior
    /// underlay or the new one.
    fn save(&mut self) -> Result<(), ObjectError>;

    /// Reset to the state right after `on_add_to_pipeline`: both views
    /// empty, persisted data dropped.
    fn purge(&mut self) -> Result<(), ObjectError>;

    /// True iff the change log is non-empty.
    fn changed(&self) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Object handle shared between the step workers and daemon threads.
pub type SharedObject = Arc<Mutex<dyn Object>>;

/// Wrap a concrete object for registration.
pub fn share(object: impl Object + 'static) -> SharedObject {
    Arc::new(Mutex::new(object))
}
