//! `nwm::INF` service

use alloc::vec;
use alloc::vec::Vec;

use hle_api::error::Result;
use hle_ipc::{CommandDescriptor, Service};

/// Service name
pub const SERVICE_NAME: &str = "nwm::INF";

/// Command table
pub fn descriptors() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::unimplemented(0x0006_03C4, "RecvBeaconBroadcastData"),
        CommandDescriptor::unimplemented(0x0007_0742, "ConnectToEncryptedAP"),
        CommandDescriptor::unimplemented(0x0008_0302, "ConnectToAP"),
    ]
}

/// Construct the service
pub fn service() -> Result<Service> {
    Service::new(SERVICE_NAME, descriptors())
}
