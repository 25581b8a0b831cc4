// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-size worker pool consuming a task channel.
//!
//! Workers take turns blocking on the shared receiver; a task hand-off
//! releases the lock before the task runs, so up to `size` tasks execute
//! concurrently. Dropping the pool closes the channel and joins the
//! workers.

use parking_lot::Mutex;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::warn;

pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

pub(crate) struct WorkerPool {
    task_tx: Option<Sender<Task>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub(crate) fn new(size: usize) -> io::Result<Self> {
        let (task_tx, task_rx) = mpsc::channel::<Task>();
        let task_rx = Arc::new(Mutex::new(task_rx));

        let mut workers = Vec::with_capacity(size);
        for index in 0..size {
            let task_rx = Arc::clone(&task_rx);
            let handle = thread::Builder::new()
                .name(format!("weir-worker-{index}"))
                .spawn(move || worker_loop(&task_rx))?;
            workers.push(handle);
        }

        Ok(Self {
            task_tx: Some(task_tx),
            workers,
        })
    }

    /// Queue a task. Silently dropped once the pool is shutting down.
    pub(crate) fn submit(&self, task: Task) {
        if let Some(task_tx) = &self.task_tx {
            let _ = task_tx.send(task);
        }
    }
}

fn worker_loop(task_rx: &Mutex<Receiver<Task>>) {
    loop {
        let task = { task_rx.lock().recv() };
        match task {
            Ok(task) => task(),
            // Channel closed: the pool is gone
            Err(_) => break,
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.task_tx.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("worker thread panicked");
            }
        }
    }
}

#[cfg(test)]
#[path = "pool_tests.rs"]
mod tests;
