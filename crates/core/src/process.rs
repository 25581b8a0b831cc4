// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Process capability: a compute unit polled once per step.

use crate::error::PollError;
use crate::ports::Ports;
use crate::shutdown::ShutdownToken;
use parking_lot::Mutex;
use std::sync::Arc;

/// Body of a daemon thread, built once per run by its process.
///
/// The closure owns clones of whatever the process shares with its `poll`
/// (typically a staging queue) and runs until the shutdown token triggers.
pub type DaemonTask = Box<dyn FnOnce(Ports, ShutdownToken) + Send + 'static>;

/// A named compute unit with declared input and output ports.
///
/// The scheduler invokes `poll` once per step, after every process producing
/// one of the declared inputs has completed. Polling is unconditional;
/// change gating is the implementation's job (early-return when inputs
/// report `!changed()`), which also lets a process flush internal buffers on
/// steps where its inputs are quiet.
pub trait Process: Send {
    /// Unique name within a run.
    fn name(&self) -> &str;

    /// Declared input port names. Must match the topology entry.
    fn inputs(&self) -> Vec<String> {
        Vec::new()
    }

    /// Declared output port names. Must match the topology entry.
    fn outputs(&self) -> Vec<String> {
        Vec::new()
    }

    /// True when this process brings a background daemon thread.
    fn has_daemon(&self) -> bool {
        false
    }

    fn on_add_to_pipeline(&mut self) {}

    fn on_remove_from_pipeline(&mut self) {}

    fn on_pipeline_start(&mut self) {}

    fn on_pipeline_end(&mut self) {}

    /// One unit of work. May mutate objects bound to output ports and read
    /// objects bound to input ports; must not mutate inputs.
    fn poll(&mut self, ports: &Ports) -> Result<(), PollError>;

    /// Build the daemon body. Called once at pipeline start when
    /// `has_daemon()`. The task receives the same resolved ports as `poll`
    /// with read access only; mutation stays confined to `poll`, fed
    /// through a process-owned thread-safe queue.
    fn daemon(&mut self) -> Option<DaemonTask> {
        None
    }
}

/// Process handle shared between the step workers and the scheduler.
pub type SharedProcess = Arc<Mutex<dyn Process>>;

/// Wrap a concrete process for registration.
pub fn share_process(process: impl Process + 'static) -> SharedProcess {
    Arc::new(Mutex::new(process))
}
