// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the workspace specs.

use assert_cmd::Command;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{BTreeMap, VecDeque};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use weir_core::{DaemonTask, PollError, Ports, Process};
use weir_storage::FsSequence;

/// `weir` binary invocation rooted in `dir`.
pub fn weir(dir: &Path) -> Command {
    let mut command = Command::cargo_bin("weir").unwrap();
    command.current_dir(dir);
    command
}

pub fn wiring(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(port, object)| (port.to_string(), object.to_string()))
        .collect()
}

/// Source that counts 0..limit, one value per step.
pub struct CounterSource {
    name: String,
    limit: i64,
    counter: i64,
}

impl CounterSource {
    pub fn new(name: &str, limit: i64) -> Self {
        Self {
            name: name.to_string(),
            limit,
            counter: 0,
        }
    }
}

impl Process for CounterSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn outputs(&self) -> Vec<String> {
        vec!["out".to_string()]
    }

    fn poll(&mut self, ports: &Ports) -> Result<(), PollError> {
        if self.counter < self.limit {
            ports
                .lock_output::<FsSequence>("out")?
                .push(json!(self.counter));
            self.counter += 1;
        }
        Ok(())
    }
}

/// Forwards even input values, tracking its position with a cursor.
pub struct EvenFilter {
    name: String,
    cursor: usize,
}

impl EvenFilter {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cursor: 0,
        }
    }
}

impl Process for EvenFilter {
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
        let fresh: Vec<i64> = {
            let input = ports.lock_input::<FsSequence>("inp")?;
            if !input.changed() {
                return Ok(());
            }
            let mut values = Vec::new();
            while self.cursor < input.len() {
                if let Some(value) = input.get(self.cursor)?.as_i64() {
                    values.push(value);
                }
                self.cursor += 1;
            }
            values
        };
        let mut output = ports.lock_output::<FsSequence>("out")?;
        for value in fresh {
            if value % 2 == 0 {
                output.push(json!(value));
            }
        }
        Ok(())
    }
}

/// Daemon producer: stages a monotonic counter on a fixed period; `poll`
/// flushes at most ten staged values and trims the head so the output
/// keeps at most ten items.
pub struct Streamer {
    name: String,
    staged: Arc<Mutex<VecDeque<i64>>>,
    period: Duration,
}

impl Streamer {
    pub fn new(name: &str, period: Duration) -> Self {
        Self {
            name: name.to_string(),
            staged: Arc::new(Mutex::new(VecDeque::new())),
            period,
        }
    }
}

impl Process for Streamer {
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
        let mut output = ports.lock_output::<FsSequence>("out")?;
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
