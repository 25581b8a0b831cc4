// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative shutdown signal for the run loop and daemon threads.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::Duration;

/// Clonable one-shot stop flag.
///
/// The CLI triggers it from the signal handler; the run loop observes it
/// between steps and daemons observe it at their loop head. `wait_timeout`
/// doubles as an interruptible sleep so a triggered token cuts waits short.
#[derive(Clone, Default)]
pub struct ShutdownToken {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    triggered: Mutex<bool>,
    condvar: Condvar,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal shutdown and wake all waiters. Idempotent.
    pub fn trigger(&self) {
        let mut triggered = self.inner.triggered.lock();
        *triggered = true;
        self.inner.condvar.notify_all();
    }

    /// True once `trigger` has been called.
    pub fn is_triggered(&self) -> bool {
        *self.inner.triggered.lock()
    }

    /// Sleep for up to `timeout`, returning early when triggered.
    /// Returns true when shutdown has been signalled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut triggered = self.inner.triggered.lock();
        if *triggered {
            return true;
        }
        // Spurious wakeups only shorten the sleep; callers loop anyway.
        let _ = self.inner.condvar.wait_for(&mut triggered, timeout);
        *triggered
    }
}

#[cfg(test)]
#[path = "shutdown_tests.rs"]
mod tests;
