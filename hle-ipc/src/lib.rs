//! HLE IPC
//!
//! This crate provides the IPC command-dispatch mechanism of the HLE service
//! layer: command descriptors, per-service handler tables, service endpoints
//! and the dispatcher that turns a guest command buffer into a handler
//! invocation or a well-defined failure response.
//!
//! # Architecture
//!
//! - **Core**: Descriptors, handler tables, dispatcher, seam traits
//! - **Service**: Named endpoints owning one handler table
//! - **Diagnostics**: Records for requests that could not be serviced
//!
//! # Usage
//!
//! ```rust
//! use hle_api::ipc::{CommandBuffer, IpcRequest, IpcResponse};
//! use hle_ipc::{CommandDescriptor, DispatchOutcome, Dispatcher, HandlerResult, Service};
//!
//! fn double(request: &IpcRequest) -> HandlerResult {
//!     let value = request.parser().pop_u32().map_err(|_| hle_api::ResultCode::NOT_IMPLEMENTED)?;
//!     Ok(IpcResponse::success(request.header().command_id()).with_word(value * 2))
//! }
//!
//! let service = Service::new(
//!     "nwm::CEC",
//!     vec![
//!         CommandDescriptor::unimplemented(0x000D_0082, "SendProbeRequest"),
//!         CommandDescriptor::new(0x000E_0040, double, "Double"),
//!     ],
//! )
//! .unwrap();
//!
//! let dispatcher = Dispatcher::default();
//! let mut buffer = CommandBuffer::from_words(&[0x000E_0040, 5]).unwrap();
//! assert_eq!(service.handle_sync_request(&dispatcher, &mut buffer), DispatchOutcome::Handled);
//! assert_eq!(buffer.word(2), Some(10));
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[macro_use]
mod logging;

pub mod core;
pub mod diagnostics;
pub mod service;

// Re-export commonly used items
pub use crate::core::{
    CommandDescriptor, CommandHandler, DiagnosticSink, DispatchOutcome, DispatchStats, Dispatcher,
    Handler, HandlerResult, HandlerTable, ServiceLookup,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, LogSink, NullSink};
pub use service::{MAX_SERVICE_NAME_LEN, Service, validate_service_name};
