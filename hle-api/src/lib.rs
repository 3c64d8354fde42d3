//! HLE API - Guest IPC types for the high-level-emulation service layer
//!
//! This crate provides the types shared by every part of the HLE service
//! layer: the guest's command header and command buffer, result codes, the
//! decoded request/response messages, dispatch configuration, and the
//! host-side error type.
//!
//! # Architecture
//!
//! - **Error**: Host-side error type and `Result` alias
//! - **IPC**: Command header, command buffer, result codes, messages
//! - **Config**: Dispatcher configuration
//!
//! # Usage
//!
//! ```rust
//! use hle_api::ipc::{CommandBuffer, IpcRequest, IpcResponse};
//!
//! let buffer = CommandBuffer::from_words(&[0x000E_0040, 5]).unwrap();
//! let request = IpcRequest::decode(&buffer).unwrap();
//! let value = request.parser().pop_u32().unwrap();
//! let response = IpcResponse::success(request.header().command_id()).with_word(value * 2);
//! assert_eq!(response.payload(), &[10]);
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod config;
pub mod error;
pub mod ipc;

// Re-export commonly used types
pub use crate::config::{DispatchConfig, ReportFlags};
pub use crate::error::{Error, Result};
pub use crate::ipc::{CommandBuffer, CommandHeader, CommandId, IpcRequest, IpcResponse, ResultCode};
