// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration, loaded once from `weir.toml` at CLI entry.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use weir_engine::DEFAULT_PARALLELIZATION;

/// Project config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "weir.toml";

/// Topology file used when the config does not override it.
pub const TOPOLOGY_FILE: &str = "topology.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no {CONFIG_FILE} found in {0}; run `weir init` first")]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid {CONFIG_FILE}: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectSection,
}

#[derive(Debug, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    /// Root for object data directories.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
    /// Topology file path, relative to the project directory.
    #[serde(default = "default_topology")]
    pub topology: PathBuf,
    /// Worker pool size for `run`.
    #[serde(default = "default_parallelization")]
    pub parallelization: usize,
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_topology() -> PathBuf {
    PathBuf::from(TOPOLOGY_FILE)
}

fn default_parallelization() -> usize {
    DEFAULT_PARALLELIZATION
}

impl ProjectConfig {
    /// Load from the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."))
    }

    /// Load from a project directory.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Err(ConfigError::NotFound(dir.to_path_buf()));
        }
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    pub fn topology_path(&self) -> &Path {
        &self.project.topology
    }

    /// Directory holding per-object subdirectories.
    pub fn objects_dir(&self) -> PathBuf {
        self.project.data_root.join("objects")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
