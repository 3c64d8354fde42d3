//! HLE Services
//!
//! This crate provides the service manager and the concrete guest service
//! tables of the HLE service layer.
//!
//! # Architecture
//!
//! - **Registry**: The service manager, an explicit name-to-service registry
//! - **Manifest**: Registration surface of each service
//! - **Network**: Network service tables (`nwm::` family)
//!
//! # Usage
//!
//! ```rust
//! use hle_api::ipc::{CommandBuffer, ResultCode};
//! use hle_ipc::{DispatchOutcome, Dispatcher};
//! use hle_services::{install_nwm_services, ServiceManager};
//!
//! let mut manager = ServiceManager::new();
//! install_nwm_services(&mut manager).unwrap();
//!
//! let dispatcher = Dispatcher::default();
//! let mut buffer = CommandBuffer::from_words(&[0x000D_0082, 0, 0, 0, 0]).unwrap();
//! let outcome = dispatcher.dispatch_to(&manager, "nwm::CEC", &mut buffer).unwrap();
//! assert_eq!(outcome, DispatchOutcome::Unimplemented);
//! assert_eq!(buffer.word(1), Some(ResultCode::NOT_IMPLEMENTED.raw()));
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[macro_use]
mod logging;

pub mod manifest;
pub mod network;
pub mod registry;

// Re-export commonly used items
pub use manifest::{CommandManifest, ServiceManifest};
pub use network::nwm::install_nwm_services;
pub use registry::ServiceManager;
