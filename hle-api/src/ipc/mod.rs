//! Guest IPC wire types
//!
//! This module provides the command header, the fixed-size command buffer,
//! result codes and the decoded request/response messages built on them.

pub mod buffer;
pub mod header;
pub mod message;
pub mod result;

pub use buffer::{COMMAND_BUFFER_WORDS, CommandBuffer};
pub use header::{CommandHeader, CommandId, MAX_PARAM_COUNT};
pub use message::{IpcRequest, IpcResponse, RequestParser};
pub use result::{ErrorDescription, ErrorLevel, ErrorModule, ErrorSummary, ResultCode};
