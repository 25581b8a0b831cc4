// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The step loop: topological waves of polls over a worker pool.
//!
//! Each step polls every process at most once, in an order compatible with
//! the data flow: a process is submitted once all processes producing its
//! input objects have completed, so a mutation made early in a step is
//! visible downstream within the same step. Changed objects are saved only
//! after the wave drains. Daemon threads run beside the loop and stage
//! data for their process's next poll.

use crate::error::{EngineError, StepError};
use crate::pool::WorkerPool;
use crate::registry::Registry;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use weir_core::{PollError, SharedObject, SharedProcess, ShutdownToken};
use weir_topology::Topology;

/// Worker pool size used when the embedder does not pick one.
pub const DEFAULT_PARALLELIZATION: usize = 4;

/// Pause between steps, long enough to avoid a busy spin and short enough
/// to pick up daemon-staged data promptly.
const STEP_INTERVAL: Duration = Duration::from_millis(10);

struct PollOutcome {
    process: String,
    result: Result<(), PollError>,
}

/// Owns the instance registry for the duration of a run and drives it:
/// lifecycle hooks, daemon threads, and the step loop.
pub struct Scheduler {
    topology: Topology,
    registry: Registry,
    pool: WorkerPool,
    daemons: Vec<JoinHandle<()>>,
}

impl Scheduler {
    /// Bind instances to the topology and spin up the worker pool.
    /// Consistency failures are fatal.
    pub fn new(
        topology: Topology,
        processes: Vec<SharedProcess>,
        objects: Vec<SharedObject>,
        parallelization: usize,
    ) -> Result<Self, EngineError> {
        let registry = Registry::bind(&topology, processes, objects)?;
        let pool = WorkerPool::new(parallelization.max(1))?;
        Ok(Self {
            topology,
            registry,
            pool,
            daemons: Vec::new(),
        })
    }

    /// Run the pipeline until `shutdown` triggers: start hooks, daemons,
    /// the step loop, end hooks, daemon join. A step error stops the loop
    /// and is returned after the end-of-run lifecycle has completed.
    pub fn start(&mut self, shutdown: &ShutdownToken) -> Result<(), EngineError> {
        info!("pipeline starting");
        for (name, object) in self.registry.objects() {
            object
                .lock()
                .on_pipeline_start()
                .map_err(|source| EngineError::ObjectLifecycle {
                    object: name.to_string(),
                    source,
                })?;
        }
        for (_, process) in self.registry.processes() {
            process.lock().on_pipeline_start();
        }
        self.spawn_daemons(shutdown)?;

        let mut result = Ok(());
        while !shutdown.is_triggered() {
            match self.step() {
                Ok(_) => {}
                Err(err) => {
                    error!(error = %err, "step failed; stopping pipeline");
                    result = Err(EngineError::Step(err));
                    break;
                }
            }
            if shutdown.wait_timeout(STEP_INTERVAL) {
                break;
            }
        }
        // Daemons watch the token; make sure it is set even when the loop
        // exits through a step error.
        shutdown.trigger();

        for (name, object) in self.registry.objects() {
            if let Err(err) = object.lock().on_pipeline_end() {
                warn!(object = name, error = %err, "object end hook failed");
            }
        }
        for (_, process) in self.registry.processes() {
            process.lock().on_pipeline_end();
        }
        self.join_daemons();
        info!("pipeline stopped");
        result
    }

    /// One topological wave. Every process polls at most once; a process
    /// with inputs waits until all producers of those inputs completed.
    /// After the wave, every changed object is saved. Returns whether any
    /// object was saved.
    ///
    /// A failing poll aborts the wave: nothing new is submitted, in-flight
    /// polls drain, objects are left unsaved so the failed step's overlay
    /// never reaches disk.
    pub fn step(&mut self) -> Result<bool, StepError> {
        let mut pending: BTreeMap<String, usize> = BTreeMap::new();
        for name in self.topology.process_names() {
            let inputs = self.topology.process_inputs(name).map(BTreeMap::len);
            pending.insert(name.to_string(), inputs.unwrap_or(0));
        }

        let (done_tx, done_rx) = mpsc::channel::<PollOutcome>();
        let mut outstanding = 0usize;
        let mut failure: Option<StepError> = None;

        let sources: Vec<String> = pending
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| name.clone())
            .collect();
        for name in sources {
            self.submit_poll(&name, &done_tx);
            outstanding += 1;
        }

        while outstanding > 0 {
            let Ok(outcome) = done_rx.recv() else {
                break;
            };
            outstanding -= 1;
            match outcome.result {
                Ok(()) => {
                    if failure.is_some() {
                        continue; // draining after a failed poll
                    }
                    for name in self.completed(&outcome.process, &mut pending) {
                        self.submit_poll(&name, &done_tx);
                        outstanding += 1;
                    }
                }
                Err(source) => {
                    warn!(process = %outcome.process, error = %source, "poll failed");
                    if failure.is_none() {
                        failure = Some(StepError::Poll {
                            process: outcome.process,
                            source,
                        });
                    }
                }
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        self.save_changed()
    }

    /// Fan out a completion: decrement consumers of every output of
    /// `process`, returning those that became ready.
    fn completed(&self, process: &str, pending: &mut BTreeMap<String, usize>) -> Vec<String> {
        let mut ready = Vec::new();
        let Ok(outputs) = self.topology.process_outputs(process) else {
            return ready;
        };
        for object in outputs.values() {
            let Ok(consumers) = self.topology.object_consumers(object) else {
                continue;
            };
            for consumer in consumers {
                if let Some(degree) = pending.get_mut(consumer) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(consumer.clone());
                    }
                }
            }
        }
        ready
    }

    fn submit_poll(&self, name: &str, done_tx: &Sender<PollOutcome>) {
        let (Some(process), Some(ports)) = (self.registry.process(name), self.registry.ports(name))
        else {
            // Registry::bind guarantees both lookups; nothing to run otherwise.
            return;
        };
        let process = Arc::clone(process);
        let ports = ports.clone();
        let name = name.to_string();
        let done_tx = done_tx.clone();
        self.pool.submit(Box::new(move || {
            let result = catch_unwind(AssertUnwindSafe(|| process.lock().poll(&ports)))
                .unwrap_or_else(|payload| Err(panic_message(&payload).into()));
            let _ = done_tx.send(PollOutcome {
                process: name,
                result,
            });
        }));
    }

    /// Save every changed object. Persistence is best-effort: all objects
    /// are attempted, each failure is logged, the first is returned.
    fn save_changed(&self) -> Result<bool, StepError> {
        let mut saved_any = false;
        let mut failure: Option<StepError> = None;
        for (name, object) in self.registry.objects() {
            let mut guard = object.lock();
            if !guard.changed() {
                continue;
            }
            match guard.save() {
                Ok(()) => {
                    debug!(object = name, "saved");
                    saved_any = true;
                }
                Err(source) => {
                    error!(object = name, error = %source, "save failed");
                    if failure.is_none() {
                        failure = Some(StepError::Save {
                            object: name.to_string(),
                            source,
                        });
                    }
                }
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }
        Ok(saved_any)
    }

    fn spawn_daemons(&mut self, shutdown: &ShutdownToken) -> Result<(), EngineError> {
        for (name, process) in self.registry.processes() {
            let task = {
                let mut guard = process.lock();
                if !guard.has_daemon() {
                    continue;
                }
                guard.daemon()
            };
            let Some(task) = task else {
                warn!(process = name, "has_daemon is set but no daemon task was built");
                continue;
            };
            let Some(ports) = self.registry.ports(name) else {
                continue;
            };
            let ports = ports.clone();
            let token = shutdown.clone();
            let handle = thread::Builder::new()
                .name(format!("weir-daemon-{name}"))
                .spawn(move || task(ports, token))?;
            debug!(process = name, "daemon launched");
            self.daemons.push(handle);
        }
        Ok(())
    }

    /// Join daemon threads. A panicked daemon only costs its own thread;
    /// it is reported here.
    fn join_daemons(&mut self) {
        for handle in self.daemons.drain(..) {
            let name = handle
                .thread()
                .name()
                .unwrap_or("weir-daemon")
                .to_string();
            if handle.join().is_err() {
                warn!(daemon = %name, "daemon thread panicked");
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("poll panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("poll panicked: {message}")
    } else {
        "poll panicked".to_string()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
