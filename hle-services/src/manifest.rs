//! Service manifests
//!
//! A manifest is the registration surface of one service: its name and the
//! ordered list of commands it declares. With the `serde` feature manifests
//! serialize, which is how tooling compares the declared surface against a
//! reference command list.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hle_api::ipc::CommandId;
use hle_ipc::{CommandDescriptor, Service};

/// One declared command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommandManifest {
    /// Full 32-bit command identifier
    pub id: CommandId,
    /// Display name
    pub name: &'static str,
    /// Whether a handler is present
    pub implemented: bool,
}

impl From<&CommandDescriptor> for CommandManifest {
    fn from(descriptor: &CommandDescriptor) -> Self {
        Self {
            id: descriptor.id(),
            name: descriptor.name(),
            implemented: descriptor.is_implemented(),
        }
    }
}

/// Registration surface of one service
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ServiceManifest {
    /// Service name
    pub name: String,
    /// Commands in registration order
    pub commands: Vec<CommandManifest>,
}

impl ServiceManifest {
    /// Build the manifest of `service`
    pub fn from_service(service: &Service) -> Self {
        Self {
            name: service.name().to_string(),
            commands: service.table().iter().map(CommandManifest::from).collect(),
        }
    }

    /// Commands declared without a handler
    pub fn unimplemented(&self) -> impl Iterator<Item = &CommandManifest> {
        self.commands.iter().filter(|c| !c.implemented)
    }
}
