// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! weir-core: capability traits and change-tracked state for the Weir runtime

pub mod error;
pub mod map;
pub mod object;
pub mod ports;
pub mod process;
pub mod sequence;
pub mod shutdown;

pub use error::{ObjectError, PollError, PortError};
pub use map::{MapChange, MapState};
pub use object::{share, Object, SharedObject};
pub use ports::Ports;
pub use process::{share_process, DaemonTask, Process, SharedProcess};
pub use sequence::{SequenceChange, SequenceState};
pub use shutdown::ShutdownToken;

/// Values held by objects. Arbitrary JSON; processes agree on shape by convention.
pub type Value = serde_json::Value;
