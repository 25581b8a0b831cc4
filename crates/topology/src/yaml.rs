// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! YAML serialization of the topology.
//!
//! Canonical document shape:
//!
//! ```yaml
//! objects: [a, b, c]          # sorted
//! processes:
//!   copy:
//!     inputs:  {inp: a}
//!     outputs: {out: b}
//! ```
//!
//! Files are written atomically (temp file, then rename) so an interrupted
//! CLI edit never leaves a half-written topology behind.

use crate::error::TopologyError;
use crate::graph::Topology;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct TopologyDoc {
    #[serde(default)]
    objects: Vec<String>,
    #[serde(default)]
    processes: BTreeMap<String, ProcessDoc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProcessDoc {
    #[serde(default)]
    inputs: BTreeMap<String, String>,
    #[serde(default)]
    outputs: BTreeMap<String, String>,
}

impl Topology {
    /// Parse a topology from its YAML document. Back-edges are rebuilt by
    /// replaying the public mutation API, so a document that violates the
    /// structural rules is rejected the same way direct calls would be.
    pub fn from_yaml(text: &str) -> Result<Self, TopologyError> {
        let doc: TopologyDoc = serde_yaml::from_str(text)?;
        let mut topology = Topology::new();
        for object in &doc.objects {
            topology.add_object(object)?;
        }
        for (name, process) in doc.processes {
            topology.add_process(&name, process.inputs, process.outputs)?;
        }
        Ok(topology)
    }

    /// Render the canonical YAML document.
    pub fn to_yaml(&self) -> Result<String, TopologyError> {
        let doc = TopologyDoc {
            objects: self.objects.keys().cloned().collect(),
            processes: self
                .processes
                .iter()
                .map(|(name, node)| {
                    (
                        name.clone(),
                        ProcessDoc {
                            inputs: node.inputs.clone(),
                            outputs: node.outputs.clone(),
                        },
                    )
                })
                .collect(),
        };
        Ok(serde_yaml::to_string(&doc)?)
    }

    /// Load a topology from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, TopologyError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Write the topology to a YAML file atomically.
    pub fn to_yaml_file(&self, path: &Path) -> Result<(), TopologyError> {
        let text = self.to_yaml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, text)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "yaml_tests.rs"]
mod tests;
