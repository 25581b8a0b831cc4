// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved port bindings handed to `poll` and daemon threads.

use crate::error::PortError;
use crate::object::{Object, SharedObject};
use indexmap::IndexMap;
use parking_lot::{MappedMutexGuard, MutexGuard};

/// The port map for one process: declared port name to bound object.
///
/// Built once at scheduler construction and never reordered. Cloning is
/// cheap (the objects are shared handles); daemon threads receive a clone
/// of the same map their process polls with.
#[derive(Clone, Default)]
pub struct Ports {
    inputs: IndexMap<String, SharedObject>,
    outputs: IndexMap<String, SharedObject>,
}

impl Ports {
    pub fn new(
        inputs: IndexMap<String, SharedObject>,
        outputs: IndexMap<String, SharedObject>,
    ) -> Self {
        Self { inputs, outputs }
    }

    /// Shared handle of the object bound to input port `port`.
    pub fn input(&self, port: &str) -> Result<&SharedObject, PortError> {
        self.inputs
            .get(port)
            .ok_or_else(|| PortError::Unknown(port.to_string()))
    }

    /// Shared handle of the object bound to output port `port`.
    pub fn output(&self, port: &str) -> Result<&SharedObject, PortError> {
        self.outputs
            .get(port)
            .ok_or_else(|| PortError::Unknown(port.to_string()))
    }

    /// Lock the object bound to input port `port` and downcast it to `T`.
    ///
    /// Inputs must not be mutated; the guard is mutable only because
    /// downcasting goes through `as_any_mut`.
    pub fn lock_input<T: Object + 'static>(
        &self,
        port: &str,
    ) -> Result<MappedMutexGuard<'_, T>, PortError> {
        lock_as(self.input(port)?, port)
    }

    /// Lock the object bound to output port `port` and downcast it to `T`.
    pub fn lock_output<T: Object + 'static>(
        &self,
        port: &str,
    ) -> Result<MappedMutexGuard<'_, T>, PortError> {
        lock_as(self.output(port)?, port)
    }

    /// Declared input port names, in topology order.
    pub fn input_names(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }

    /// Declared output port names, in topology order.
    pub fn output_names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }
}

fn lock_as<'a, T: Object + 'static>(
    object: &'a SharedObject,
    port: &str,
) -> Result<MappedMutexGuard<'a, T>, PortError> {
    MutexGuard::try_map(object.lock(), |o| o.as_any_mut().downcast_mut::<T>()).map_err(|_| {
        PortError::WrongKind {
            port: port.to_string(),
            expected: std::any::type_name::<T>(),
        }
    })
}

#[cfg(test)]
#[path = "ports_tests.rs"]
mod tests;
