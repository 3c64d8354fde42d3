//! Service endpoints
//!
//! A [`Service`] is a named guest endpoint owning one immutable
//! [`HandlerTable`]. Concrete services are nothing more than a name and a
//! descriptor list:
//!
//! ```rust
//! use hle_ipc::{CommandDescriptor, Service};
//!
//! let service = Service::new(
//!     "nwm::CEC",
//!     vec![CommandDescriptor::unimplemented(0x000D_0082, "SendProbeRequest")],
//! )
//! .unwrap();
//! assert_eq!(service.table().len(), 1);
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use hle_api::error::{Error, Result};
use hle_api::ipc::{CommandBuffer, CommandId};

use crate::core::descriptor::CommandDescriptor;
use crate::core::dispatcher::{DispatchOutcome, Dispatcher};
use crate::core::registry::HandlerTable;

/// Longest service name the guest's naming facility accepts
pub const MAX_SERVICE_NAME_LEN: usize = 8;

/// Named guest service
#[derive(Debug)]
pub struct Service {
    name: String,
    table: HandlerTable,
}

impl Service {
    /// Create a service and register its command table
    pub fn new(name: &str, descriptors: Vec<CommandDescriptor>) -> Result<Self> {
        validate_service_name(name)?;
        let table = HandlerTable::register(name, descriptors)?;
        hle_debug!(
            "registered service '{}' with {} commands ({} unimplemented)",
            name,
            table.len(),
            table.unimplemented_count()
        );

        Ok(Self {
            name: name.to_string(),
            table,
        })
    }

    /// Service name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handler table
    pub fn table(&self) -> &HandlerTable {
        &self.table
    }

    /// Get a descriptor by identifier
    pub fn lookup(&self, id: CommandId) -> Option<&CommandDescriptor> {
        self.table.lookup(id)
    }

    /// Service a synchronous request held in `buffer`
    pub fn handle_sync_request(
        &self,
        dispatcher: &Dispatcher,
        buffer: &mut CommandBuffer,
    ) -> DispatchOutcome {
        dispatcher.dispatch_raw(self, buffer)
    }
}

/// Check a name against the guest's service-name rules
///
/// Names are one to eight bytes of printable ASCII.
pub fn validate_service_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= MAX_SERVICE_NAME_LEN
        && name.bytes().all(|b| b.is_ascii_graphic());
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidServiceName(name.to_string()))
    }
}
