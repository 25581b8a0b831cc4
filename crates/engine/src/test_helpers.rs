// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for engine tests: small processes over in-memory
//! sequences. Counters and knobs are shared handles so tests keep access
//! after the instances move into the scheduler.

use parking_lot::Mutex;
use serde_json::json;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use weir_core::{DaemonTask, PollError, Ports, Process, Value};
use weir_storage::MemSequence;

pub(crate) fn wiring(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(port, object)| (port.to_string(), object.to_string()))
        .collect()
}

/// Source process: pushes the queued value once, when one is staged.
pub(crate) struct Emitter {
    name: String,
    next: Arc<Mutex<Option<Value>>>,
    polls: Arc<AtomicUsize>,
}

impl Emitter {
    pub(crate) fn new(name: &str) -> (Self, Arc<Mutex<Option<Value>>>, Arc<AtomicUsize>) {
        let next = Arc::new(Mutex::new(None));
        let polls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name: name.to_string(),
                next: Arc::clone(&next),
                polls: Arc::clone(&polls),
            },
            next,
            polls,
        )
    }
}

impl Process for Emitter {
    fn name(&self) -> &str {
        &self.name
    }

    fn outputs(&self) -> Vec<String> {
        vec!["out".to_string()]
    }

    fn poll(&mut self, ports: &Ports) -> Result<(), PollError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        if let Some(value) = self.next.lock().take() {
            ports.lock_output::<MemSequence>("out")?.push(value);
        }
        Ok(())
    }
}

/// Copies `f(last input)` to its output when the input changed.
pub(crate) struct Transform {
    name: String,
    f: fn(i64) -> i64,
    runs: Arc<AtomicUsize>,
    polls: Arc<AtomicUsize>,
}

impl Transform {
    pub(crate) fn new(
        name: &str,
        f: fn(i64) -> i64,
    ) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        let polls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name: name.to_string(),
                f,
                runs: Arc::clone(&runs),
                polls: Arc::clone(&polls),
            },
            runs,
            polls,
        )
    }
}

impl Process for Transform {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> Vec<String> {
        vec!["inp".to_string()]
    }

    fn outputs(&self) -> Vec<String> {
        vec!["out".to_string()]
    }

    fn poll(&mut self, ports: &Ports) -> Result<(), PollError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let last = {
            let input = ports.lock_input::<MemSequence>("inp")?;
            if !input.changed() || input.is_empty() {
                return Ok(());
            }
            input.get(input.len() - 1)?.clone()
        };
        self.runs.fetch_add(1, Ordering::SeqCst);
        let value = last.as_i64().ok_or("non-integer value")?;
        ports
            .lock_output::<MemSequence>("out")?
            .push(json!((self.f)(value)));
        Ok(())
    }
}

/// Sink joining the last values of two inputs into one pair.
pub(crate) struct Join {
    name: String,
    runs: Arc<AtomicUsize>,
}

impl Join {
    pub(crate) fn new(name: &str) -> (Self, Arc<AtomicUsize>) {
        let runs = Arc::new(AtomicUsize::new(0));
        (
            Self {
                name: name.to_string(),
                runs: Arc::clone(&runs),
            },
            runs,
        )
    }
}

impl Process for Join {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> Vec<String> {
        vec!["left".to_string(), "right".to_string()]
    }

    fn outputs(&self) -> Vec<String> {
        vec!["out".to_string()]
    }

    fn poll(&mut self, ports: &Ports) -> Result<(), PollError> {
        let pair = {
            let left = ports.lock_input::<MemSequence>("left")?;
            let right = ports.lock_input::<MemSequence>("right")?;
            if !left.changed() && !right.changed() {
                return Ok(());
            }
            if left.is_empty() || right.is_empty() {
                return Ok(());
            }
            json!([
                left.get(left.len() - 1)?.clone(),
                right.get(right.len() - 1)?.clone(),
            ])
        };
        self.runs.fetch_add(1, Ordering::SeqCst);
        ports.lock_output::<MemSequence>("out")?.push(pair);
        Ok(())
    }
}

/// Always fails: exercises step abort.
pub(crate) struct Failing {
    name: String,
}

impl Failing {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Process for Failing {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> Vec<String> {
        vec!["inp".to_string()]
    }

    fn outputs(&self) -> Vec<String> {
        vec!["out".to_string()]
    }

    fn poll(&mut self, _ports: &Ports) -> Result<(), PollError> {
        Err("boom".into())
    }
}

/// Daemon source: a background thread stages integers, `poll` flushes up
/// to ten per step and trims the head to keep the output at ten items.
pub(crate) struct Ticker {
    name: String,
    staged: Arc<Mutex<VecDeque<i64>>>,
    period: Duration,
}

impl Ticker {
    pub(crate) fn new(name: &str, period: Duration) -> Self {
        Self {
            name: name.to_string(),
            staged: Arc::new(Mutex::new(VecDeque::new())),
            period,
        }
    }
}

impl Process for Ticker {
    fn name(&self) -> &str {
        &self.name
    }

    fn outputs(&self) -> Vec<String> {
        vec!["out".to_string()]
    }

    fn has_daemon(&self) -> bool {
        true
    }

    fn daemon(&mut self) -> Option<DaemonTask> {
        let staged = Arc::clone(&self.staged);
        let period = self.period;
        Some(Box::new(move |_ports, shutdown| {
            let mut tick = 0i64;
            while !shutdown.wait_timeout(period) {
                staged.lock().push_back(tick);
                tick += 1;
            }
        }))
    }

    fn poll(&mut self, ports: &Ports) -> Result<(), PollError> {
        let mut output = ports.lock_output::<MemSequence>("out")?;
        for _ in 0..10 {
            let Some(tick) = self.staged.lock().pop_front() else {
                break;
            };
            output.push(json!(tick));
            while output.len() > 10 {
                output.remove(0)?;
            }
        }
        Ok(())
    }
}
