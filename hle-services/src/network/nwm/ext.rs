//! `nwm::EXT` service

use alloc::vec;
use alloc::vec::Vec;

use hle_api::error::Result;
use hle_ipc::{CommandDescriptor, Service};

/// Service name
pub const SERVICE_NAME: &str = "nwm::EXT";

/// Command table
pub fn descriptors() -> Vec<CommandDescriptor> {
    vec![CommandDescriptor::unimplemented(0x0008_0040, "ControlWirelessEnabled")]
}

/// Construct the service
pub fn service() -> Result<Service> {
    Service::new(SERVICE_NAME, descriptors())
}
