// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `weir init` - scaffold a project directory

use anyhow::{bail, Result};
use clap::Args;
use std::fs;
use std::path::Path;

use crate::config::{CONFIG_FILE, TOPOLOGY_FILE};

const EMPTY_TOPOLOGY: &str = "objects: []\nprocesses: {}\n";

#[derive(Args)]
pub struct InitArgs {
    /// Project name; a directory of this name is created
    pub name: String,
}

pub fn execute(args: &InitArgs) -> Result<()> {
    let root = Path::new(&args.name);
    if root.exists() {
        bail!("project {} already exists", args.name);
    }

    fs::create_dir_all(root.join("data").join("objects"))?;
    fs::write(root.join(CONFIG_FILE), config_template(&args.name))?;
    fs::write(root.join(TOPOLOGY_FILE), EMPTY_TOPOLOGY)?;

    println!("created project {}", args.name);
    Ok(())
}

fn config_template(name: &str) -> String {
    format!("[project]\nname = \"{name}\"\ndata_root = \"data\"\n")
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
