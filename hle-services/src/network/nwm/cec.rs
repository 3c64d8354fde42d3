//! `nwm::CEC` service

use alloc::vec;
use alloc::vec::Vec;

use hle_api::error::Result;
use hle_ipc::{CommandDescriptor, Service};

/// Service name
pub const SERVICE_NAME: &str = "nwm::CEC";

/// Command table
pub fn descriptors() -> Vec<CommandDescriptor> {
    vec![CommandDescriptor::unimplemented(0x000D_0082, "SendProbeRequest")]
}

/// Construct the service
pub fn service() -> Result<Service> {
    Service::new(SERVICE_NAME, descriptors())
}
