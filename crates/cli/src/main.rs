// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! weir - standalone CLI binary
//!
//! Topology editing and validation work from here directly. `weir run`
//! works too, but with no registered instances it only accepts an empty
//! topology; projects with processes embed the CLI in their own binary.

use clap::Parser;
use std::process::ExitCode;
use weir_cli::{Cli, InstanceSet};

fn main() -> ExitCode {
    weir_cli::init_tracing();
    weir_cli::run(Cli::parse(), InstanceSet::new())
}
