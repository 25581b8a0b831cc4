// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interrupt handling for `weir run`.

use anyhow::Result;
use std::thread;
use tracing::info;
use weir_core::ShutdownToken;

/// Trigger `shutdown` on Ctrl-C (and SIGTERM on Unix).
///
/// A small single-threaded runtime runs on a side thread so the scheduler
/// can keep the main thread. Signals are process-wide; the listener thread
/// is detached and dies with the process.
pub(crate) fn spawn_signal_listener(shutdown: ShutdownToken) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;
    thread::Builder::new()
        .name("weir-signals".to_string())
        .spawn(move || {
            runtime.block_on(wait_for_signal());
            info!("interrupt received, shutting down");
            shutdown.trigger();
        })?;
    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};
    let Ok(mut sigterm) = signal(SignalKind::terminate()) else {
        let _ = tokio::signal::ctrl_c().await;
        return;
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
