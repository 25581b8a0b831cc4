// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime bindings: topology names resolved to concrete instances.
//!
//! Built once at scheduler construction and immutable for the run. The
//! consistency check guarantees that every later lookup succeeds: process
//! and object name sets match the topology 1:1, and each process's
//! declared ports match the topology's wiring for it.

use crate::error::ConsistencyError;
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};
use weir_core::{Ports, SharedObject, SharedProcess};
use weir_topology::Topology;

pub struct Registry {
    objects: BTreeMap<String, SharedObject>,
    processes: BTreeMap<String, SharedProcess>,
    ports: BTreeMap<String, Ports>,
}

impl Registry {
    /// Check instances against the topology and resolve each process's
    /// port map.
    pub fn bind(
        topology: &Topology,
        processes: Vec<SharedProcess>,
        objects: Vec<SharedObject>,
    ) -> Result<Self, ConsistencyError> {
        let mut object_map = BTreeMap::new();
        for object in objects {
            let name = object.lock().name().to_string();
            if object_map.insert(name.clone(), object).is_some() {
                return Err(ConsistencyError::DuplicateObject(name));
            }
        }
        let mut process_map = BTreeMap::new();
        for process in processes {
            let name = process.lock().name().to_string();
            if process_map.insert(name.clone(), process).is_some() {
                return Err(ConsistencyError::DuplicateProcess(name));
            }
        }

        let topology_objects: BTreeSet<&str> = topology.object_names().collect();
        let instance_objects: BTreeSet<&str> = object_map.keys().map(String::as_str).collect();
        if topology_objects != instance_objects {
            return Err(ConsistencyError::ObjectSetMismatch {
                topology: to_owned(&topology_objects),
                instances: to_owned(&instance_objects),
            });
        }

        let topology_processes: BTreeSet<&str> = topology.process_names().collect();
        let instance_processes: BTreeSet<&str> = process_map.keys().map(String::as_str).collect();
        if topology_processes != instance_processes {
            return Err(ConsistencyError::ProcessSetMismatch {
                topology: to_owned(&topology_processes),
                instances: to_owned(&instance_processes),
            });
        }

        for (name, process) in &process_map {
            let (declared_inputs, declared_outputs) = {
                let guard = process.lock();
                (guard.inputs(), guard.outputs())
            };
            check_ports(name, "input", &declared_inputs, topology.process_inputs(name)?)?;
            check_ports(
                name,
                "output",
                &declared_outputs,
                topology.process_outputs(name)?,
            )?;
        }

        let mut ports = BTreeMap::new();
        for name in topology.process_names() {
            ports.insert(
                name.to_string(),
                Ports::new(
                    resolve(topology.process_inputs(name)?, &object_map)?,
                    resolve(topology.process_outputs(name)?, &object_map)?,
                ),
            );
        }

        Ok(Self {
            objects: object_map,
            processes: process_map,
            ports,
        })
    }

    pub fn object(&self, name: &str) -> Option<&SharedObject> {
        self.objects.get(name)
    }

    pub fn process(&self, name: &str) -> Option<&SharedProcess> {
        self.processes.get(name)
    }

    /// Resolved port map for a process, inputs and outputs both.
    pub fn ports(&self, name: &str) -> Option<&Ports> {
        self.ports.get(name)
    }

    pub fn objects(&self) -> impl Iterator<Item = (&str, &SharedObject)> {
        self.objects.iter().map(|(name, obj)| (name.as_str(), obj))
    }

    pub fn processes(&self) -> impl Iterator<Item = (&str, &SharedProcess)> {
        self.processes
            .iter()
            .map(|(name, proc)| (name.as_str(), proc))
    }
}

fn to_owned(names: &BTreeSet<&str>) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn check_ports(
    process: &str,
    direction: &'static str,
    declared: &[String],
    bound: &BTreeMap<String, String>,
) -> Result<(), ConsistencyError> {
    let declared_set: BTreeSet<&str> = declared.iter().map(String::as_str).collect();
    let bound_set: BTreeSet<&str> = bound.keys().map(String::as_str).collect();
    if declared_set != bound_set {
        return Err(ConsistencyError::PortMismatch {
            process: process.to_string(),
            direction,
            declared: to_owned(&declared_set),
            bound: to_owned(&bound_set),
        });
    }
    Ok(())
}

fn resolve(
    wiring: &BTreeMap<String, String>,
    objects: &BTreeMap<String, SharedObject>,
) -> Result<IndexMap<String, SharedObject>, ConsistencyError> {
    wiring
        .iter()
        .map(|(port, object)| {
            objects
                .get(object)
                .cloned()
                .map(|instance| (port.clone(), instance))
                .ok_or_else(|| ConsistencyError::UnboundObject(object.clone()))
        })
        .collect()
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
