// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `weir topology` - edit and validate the project topology file
//!
//! Mutations load the YAML document, apply one graph operation, and write
//! the file back. When an instance for a touched object is registered (in
//! an embedding binary), its add/remove lifecycle hook runs too; the
//! standalone binary edits the file only.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use weir_topology::Topology;

use crate::config::ProjectConfig;
use crate::InstanceSet;

#[derive(Args)]
pub struct TopologyArgs {
    #[command(subcommand)]
    command: TopologyCommands,
}

#[derive(Subcommand)]
enum TopologyCommands {
    /// Register an object name
    AddObject { name: String },
    /// Remove an object that no process uses
    RemoveObject { name: String },
    /// Register a process with its port wiring
    AddProcess {
        name: String,
        /// Input binding, repeatable: --input port:object
        #[arg(long = "input", value_name = "PORT:OBJECT")]
        inputs: Vec<String>,
        /// Output binding, repeatable: --output port:object
        #[arg(long = "output", value_name = "PORT:OBJECT")]
        outputs: Vec<String>,
    },
    /// Remove a process and detach its wiring
    RemoveProcess { name: String },
    /// Adopt a topology from an external YAML file
    FromYaml { path: PathBuf },
    /// Report completeness and cycle diagnostics
    Validate,
}

pub fn execute(args: &TopologyArgs, instances: &InstanceSet) -> Result<()> {
    let config = ProjectConfig::load()?;
    let path = config.topology_path();

    match &args.command {
        TopologyCommands::AddObject { name } => {
            let mut topology = load_or_empty(path)?;
            topology.add_object(name)?;
            topology.to_yaml_file(path)?;
            run_add_hook(instances, name)?;
        }
        TopologyCommands::RemoveObject { name } => {
            let mut topology = load(path)?;
            topology.remove_object(name)?;
            topology.to_yaml_file(path)?;
            run_remove_hook(instances, name)?;
        }
        TopologyCommands::AddProcess {
            name,
            inputs,
            outputs,
        } => {
            let mut topology = load_or_empty(path)?;
            topology.add_process(name, parse_wiring(inputs)?, parse_wiring(outputs)?)?;
            topology.to_yaml_file(path)?;
        }
        TopologyCommands::RemoveProcess { name } => {
            let mut topology = load(path)?;
            topology.remove_process(name)?;
            topology.to_yaml_file(path)?;
        }
        TopologyCommands::FromYaml { path: source } => {
            if path.exists() && load(path)?.process_names().next().is_some() {
                bail!(
                    "topology {} is not empty; remove its processes first",
                    path.display()
                );
            }
            let topology = Topology::from_yaml_file(source)
                .with_context(|| format!("loading {}", source.display()))?;
            topology.to_yaml_file(path)?;
            for name in topology.object_names() {
                run_add_hook(instances, name)?;
            }
        }
        TopologyCommands::Validate => {
            let topology = load(path)?;
            let diagnostics = topology.validate();
            if !diagnostics.is_empty() {
                for line in &diagnostics {
                    eprintln!("{line}");
                }
                bail!("topology is invalid");
            }
            println!("topology is valid");
        }
    }
    Ok(())
}

/// Parse repeated `port:object` bindings.
pub(crate) fn parse_wiring(bindings: &[String]) -> Result<BTreeMap<String, String>> {
    let mut wiring = BTreeMap::new();
    for binding in bindings {
        let (port, object) = binding
            .split_once(':')
            .ok_or_else(|| anyhow!("invalid binding {binding:?}, expected port:object"))?;
        if port.is_empty() || object.is_empty() {
            bail!("invalid binding {binding:?}, expected port:object");
        }
        if wiring.insert(port.to_string(), object.to_string()).is_some() {
            bail!("port {port} bound twice");
        }
    }
    Ok(wiring)
}

fn load(path: &Path) -> Result<Topology> {
    if !path.exists() {
        bail!("topology {} not found, have you built it?", path.display());
    }
    Topology::from_yaml_file(path).with_context(|| format!("loading {}", path.display()))
}

fn load_or_empty(path: &Path) -> Result<Topology> {
    if path.exists() {
        load(path)
    } else {
        Ok(Topology::new())
    }
}

fn run_add_hook(instances: &InstanceSet, name: &str) -> Result<()> {
    match find_object(instances, name) {
        Some(object) => Ok(object.lock().on_add_to_pipeline()?),
        None => {
            debug!(object = name, "no registered instance; skipping add hook");
            Ok(())
        }
    }
}

fn run_remove_hook(instances: &InstanceSet, name: &str) -> Result<()> {
    match find_object(instances, name) {
        Some(object) => Ok(object.lock().on_remove_from_pipeline()?),
        None => {
            debug!(object = name, "no registered instance; skipping remove hook");
            Ok(())
        }
    }
}

fn find_object<'a>(
    instances: &'a InstanceSet,
    name: &str,
) -> Option<&'a weir_core::SharedObject> {
    instances
        .objects
        .iter()
        .find(|object| object.lock().name() == name)
}

#[cfg(test)]
#[path = "topology_tests.rs"]
mod tests;
