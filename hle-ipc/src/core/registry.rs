//! Command handler table
//!
//! This module provides the per-service handler table. A table is built once
//! from an ordered descriptor list and never changes afterwards, so lookups
//! from any number of threads need no lock.

use alloc::vec::Vec;
use hashbrown::HashMap;

use hle_api::error::{self, Result};
use hle_api::ipc::CommandId;

use super::descriptor::CommandDescriptor;

/// Immutable table of command descriptors
#[derive(Debug)]
pub struct HandlerTable {
    /// Descriptors in registration order
    descriptors: Vec<CommandDescriptor>,
    /// Identifier to position in `descriptors`
    index: HashMap<CommandId, usize>,
}

impl HandlerTable {
    /// Register a descriptor list
    ///
    /// A repeated identifier is a programming error in the service's table
    /// and fails construction; nothing is ever overwritten.
    pub fn register(service: &str, descriptors: Vec<CommandDescriptor>) -> Result<Self> {
        let mut index = HashMap::with_capacity(descriptors.len());
        for (position, descriptor) in descriptors.iter().enumerate() {
            if index.insert(descriptor.id(), position).is_some() {
                return Err(error::duplicate_command(service, descriptor.id()));
            }
        }

        Ok(Self { descriptors, index })
    }

    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Get a descriptor by identifier
    pub fn lookup(&self, id: CommandId) -> Option<&CommandDescriptor> {
        self.index.get(&id).map(|&position| &self.descriptors[position])
    }

    /// Returns true if the identifier is registered
    pub fn contains(&self, id: CommandId) -> bool {
        self.index.contains_key(&id)
    }

    /// Descriptors in registration order
    pub fn iter(&self) -> core::slice::Iter<'_, CommandDescriptor> {
        self.descriptors.iter()
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no command is registered
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Number of commands with a handler
    pub fn implemented_count(&self) -> usize {
        self.descriptors.iter().filter(|d| d.is_implemented()).count()
    }

    /// Number of commands declared without a handler
    pub fn unimplemented_count(&self) -> usize {
        self.len() - self.implemented_count()
    }
}

impl<'a> IntoIterator for &'a HandlerTable {
    type Item = &'a CommandDescriptor;
    type IntoIter = core::slice::Iter<'a, CommandDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
