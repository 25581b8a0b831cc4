// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! weir - command-line surface for Weir pipelines
//!
//! The `weir` binary edits and validates the topology file of a project.
//! Running a pipeline needs the user's process and object instances, which
//! only exist in the user's own binary: embedders call [`run`] with their
//! [`InstanceSet`], exactly like `main.rs` does with an empty one.

pub mod commands;
pub mod config;
mod signal;

pub use config::ProjectConfig;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use weir_core::{share, share_process, Object, Process, SharedObject, SharedProcess};

/// The user's concrete instances, registered before `run`.
///
/// The compiled counterpart of a "definitions module": embedding binaries
/// build one from their own types and hand it to the CLI.
#[derive(Default)]
pub struct InstanceSet {
    pub objects: Vec<SharedObject>,
    pub processes: Vec<SharedProcess>,
}

impl InstanceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, object: impl Object + 'static) -> Self {
        self.objects.push(share(object));
        self
    }

    pub fn with_process(mut self, process: impl Process + 'static) -> Self {
        self.processes.push(share_process(process));
        self
    }
}

#[derive(Parser)]
#[command(name = "weir", version, about = "Weir - a change-driven dataflow pipeline runner")]
pub struct Cli {
    /// Change to <DIR> before doing anything
    #[arg(short = 'C', global = true, value_name = "DIR")]
    directory: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new project directory
    Init(commands::init::InitArgs),
    /// Edit and validate the project topology
    Topology(commands::topology::TopologyArgs),
    /// Run the pipeline until interrupted
    Run(commands::run::RunArgs),
}

/// Install the log subscriber. `WEIR_LOG` selects the filter.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("WEIR_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch a parsed command line against the registered instances.
pub fn run(cli: Cli, instances: InstanceSet) -> ExitCode {
    match execute(cli, instances) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli, instances: InstanceSet) -> Result<()> {
    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)?;
    }
    match cli.command {
        Commands::Init(args) => commands::init::execute(&args),
        Commands::Topology(args) => commands::topology::execute(&args, &instances),
        Commands::Run(args) => commands::run::execute(&args, instances),
    }
}

pub(crate) use signal::spawn_signal_listener;
