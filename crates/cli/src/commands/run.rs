// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `weir run` - run the pipeline until interrupted

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;
use weir_core::ShutdownToken;
use weir_engine::Scheduler;
use weir_topology::Topology;

use crate::config::ProjectConfig;
use crate::{spawn_signal_listener, InstanceSet};

#[derive(Args)]
pub struct RunArgs {
    /// Worker pool size (overrides the project config)
    #[arg(long)]
    parallelization: Option<usize>,
}

pub fn execute(args: &RunArgs, instances: InstanceSet) -> Result<()> {
    let config = ProjectConfig::load()?;
    let path = config.topology_path();
    if !path.exists() {
        bail!("topology {} not found, have you built it?", path.display());
    }
    let topology =
        Topology::from_yaml_file(path).with_context(|| format!("loading {}", path.display()))?;

    let parallelization = args
        .parallelization
        .unwrap_or(config.project.parallelization);
    let mut scheduler = Scheduler::new(
        topology,
        instances.processes,
        instances.objects,
        parallelization,
    )?;

    let shutdown = ShutdownToken::new();
    spawn_signal_listener(shutdown.clone())?;
    info!(project = %config.project.name, parallelization, "running pipeline");
    scheduler.start(&shutdown)?;
    Ok(())
}
