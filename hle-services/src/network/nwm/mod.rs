//! Local wireless manager services
//!
//! The `nwm::` family is declared only: every command is registered with its
//! identifier and name so guest calls are reported by name, but no wireless
//! behavior is emulated.

pub mod cec;
pub mod ext;
pub mod inf;

use hle_api::error::Result;

use crate::registry::ServiceManager;

/// Register every `nwm::` service with `manager`
pub fn install_nwm_services(manager: &mut ServiceManager) -> Result<()> {
    manager.register(cec::service()?)?;
    manager.register(ext::service()?)?;
    manager.register(inf::service()?)?;
    hle_debug!("nwm services installed");
    Ok(())
}
