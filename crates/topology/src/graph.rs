// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure in-memory graph of processes wired to objects through named ports.
//!
//! Objects carry back-edges (one optional producer, a set of consumers)
//! maintained by process registration. The graph itself enforces only the
//! structural rules (unique names, known objects, single producer);
//! completeness checks live in [`Topology::validate`].

use crate::error::TopologyError;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ObjectNode {
    pub(crate) producer: Option<String>,
    pub(crate) consumers: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ProcessNode {
    pub(crate) inputs: BTreeMap<String, String>,
    pub(crate) outputs: BTreeMap<String, String>,
}

/// The declarative DAG: named objects and processes plus their port wiring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    pub(crate) objects: BTreeMap<String, ObjectNode>,
    pub(crate) processes: BTreeMap<String, ProcessNode>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object name.
    pub fn add_object(&mut self, name: &str) -> Result<(), TopologyError> {
        if self.objects.contains_key(name) {
            return Err(TopologyError::DuplicateObject(name.to_string()));
        }
        self.objects.insert(name.to_string(), ObjectNode::default());
        Ok(())
    }

    /// Register a process with its port wiring and record producer/consumer
    /// back-edges. The topology is untouched on any failure.
    pub fn add_process(
        &mut self,
        name: &str,
        inputs: BTreeMap<String, String>,
        outputs: BTreeMap<String, String>,
    ) -> Result<(), TopologyError> {
        if self.processes.contains_key(name) {
            return Err(TopologyError::DuplicateProcess(name.to_string()));
        }
        for (port, object) in inputs.iter().chain(outputs.iter()) {
            if !self.objects.contains_key(object) {
                return Err(TopologyError::MissingObject {
                    port: port.clone(),
                    object: object.clone(),
                });
            }
        }
        for object in outputs.values() {
            if let Some(node) = self.objects.get(object) {
                if let Some(producer) = &node.producer {
                    return Err(TopologyError::DoubleProducer {
                        object: object.clone(),
                        producer: producer.clone(),
                    });
                }
            }
        }

        for object in inputs.values() {
            if let Some(node) = self.objects.get_mut(object) {
                node.consumers.insert(name.to_string());
            }
        }
        for object in outputs.values() {
            if let Some(node) = self.objects.get_mut(object) {
                node.producer = Some(name.to_string());
            }
        }
        self.processes
            .insert(name.to_string(), ProcessNode { inputs, outputs });
        Ok(())
    }

    /// Remove a process and detach its back-edges.
    pub fn remove_process(&mut self, name: &str) -> Result<(), TopologyError> {
        let node = self
            .processes
            .remove(name)
            .ok_or_else(|| TopologyError::ProcessNotFound(name.to_string()))?;
        for object in node.inputs.values() {
            if let Some(obj) = self.objects.get_mut(object) {
                obj.consumers.remove(name);
            }
        }
        for object in node.outputs.values() {
            if let Some(obj) = self.objects.get_mut(object) {
                obj.producer = None;
            }
        }
        Ok(())
    }

    /// Remove an object. Fails while any process still produces or consumes
    /// it.
    pub fn remove_object(&mut self, name: &str) -> Result<(), TopologyError> {
        let node = self
            .objects
            .get(name)
            .ok_or_else(|| TopologyError::ObjectNotFound(name.to_string()))?;
        if let Some(producer) = &node.producer {
            return Err(TopologyError::InUse {
                object: name.to_string(),
                process: producer.clone(),
            });
        }
        if let Some(consumer) = node.consumers.iter().next() {
            return Err(TopologyError::InUse {
                object: name.to_string(),
                process: consumer.clone(),
            });
        }
        self.objects.remove(name);
        Ok(())
    }

    /// Diagnostic pass: every object needs exactly one producer and at
    /// least one consumer, and the process graph must be acyclic. Returns
    /// one line per finding, ordered by object name; never fails.
    pub fn validate(&self) -> Vec<String> {
        let mut diagnostics = Vec::new();
        for (name, node) in &self.objects {
            if node.producer.is_none() {
                diagnostics.push(format!("object {name} has no producer"));
            }
            if node.consumers.is_empty() {
                diagnostics.push(format!("object {name} has no consumers"));
            }
        }
        if let Err(err) = self.topological_sort() {
            diagnostics.push(err.to_string());
        }
        diagnostics
    }

    /// Kahn's algorithm over processes, using the number of input ports as
    /// the in-degree. The relative order of simultaneously ready processes
    /// is unspecified.
    pub fn topological_sort(&self) -> Result<Vec<String>, TopologyError> {
        let mut pending: BTreeMap<&str, usize> = self
            .processes
            .iter()
            .map(|(name, node)| (name.as_str(), node.inputs.len()))
            .collect();
        let mut ready: Vec<&str> = pending
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(name, _)| *name)
            .collect();

        let mut order = Vec::with_capacity(self.processes.len());
        while let Some(current) = ready.pop() {
            order.push(current.to_string());
            let Some(node) = self.processes.get(current) else {
                continue;
            };
            for object in node.outputs.values() {
                let Some(obj) = self.objects.get(object) else {
                    continue;
                };
                for consumer in &obj.consumers {
                    if let Some(degree) = pending.get_mut(consumer.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            ready.push(consumer);
                        }
                    }
                }
            }
        }

        if order.len() != self.processes.len() {
            return Err(TopologyError::CycleDetected);
        }
        Ok(order)
    }

    /// Port-to-object wiring of a process's inputs.
    pub fn process_inputs(&self, name: &str) -> Result<&BTreeMap<String, String>, TopologyError> {
        self.processes
            .get(name)
            .map(|node| &node.inputs)
            .ok_or_else(|| TopologyError::ProcessNotFound(name.to_string()))
    }

    /// Port-to-object wiring of a process's outputs.
    pub fn process_outputs(&self, name: &str) -> Result<&BTreeMap<String, String>, TopologyError> {
        self.processes
            .get(name)
            .map(|node| &node.outputs)
            .ok_or_else(|| TopologyError::ProcessNotFound(name.to_string()))
    }

    /// Names of processes consuming an object.
    pub fn object_consumers(&self, name: &str) -> Result<&BTreeSet<String>, TopologyError> {
        self.objects
            .get(name)
            .map(|node| &node.consumers)
            .ok_or_else(|| TopologyError::ObjectNotFound(name.to_string()))
    }

    /// Name of the process producing an object, if any.
    pub fn object_producer(&self, name: &str) -> Result<Option<&str>, TopologyError> {
        self.objects
            .get(name)
            .map(|node| node.producer.as_deref())
            .ok_or_else(|| TopologyError::ObjectNotFound(name.to_string()))
    }

    /// Object names in sorted order.
    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Process names in sorted order.
    pub fn process_names(&self) -> impl Iterator<Item = &str> {
        self.processes.keys().map(String::as_str)
    }

    pub fn contains_object(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    pub fn contains_process(&self, name: &str) -> bool {
        self.processes.contains_key(name)
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
