//! Error handling module for the HLE service layer
//!
//! These errors are host-side only. Anything the guest can observe is a
//! [`ResultCode`](crate::ipc::result::ResultCode) written into its command
//! buffer, never an [`Error`].

use alloc::string::{String, ToString};
use core::fmt;

/// Common error type used throughout the HLE service layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A command identifier was registered twice for the same service
    DuplicateCommand {
        /// Service being constructed
        service: String,
        /// Raw command identifier that collided
        id: u32,
    },
    /// A service name was registered twice with the service manager
    DuplicateService(String),
    /// Service name is empty, too long or not printable ASCII
    InvalidServiceName(String),
    /// No service is registered under the given name
    ServiceNotFound(String),
    /// Header parameter counts do not fit in the command buffer
    MalformedHeader(u32),
    /// A handler response does not fit in the command buffer
    ResponseOverflow {
        /// Words the response would need, header included
        words: usize,
    },
    /// A handler asked for a parameter the request does not carry
    MissingParameter {
        /// Zero-based word index inside the parameter area
        index: usize,
    },
    /// Invalid argument
    InvalidArgument(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateCommand { service, id } => {
                write!(f, "Duplicate command {:#010x} registered for service '{}'", id, service)
            }
            Error::DuplicateService(name) => write!(f, "Service '{}' already registered", name),
            Error::InvalidServiceName(name) => write!(f, "Invalid service name '{}'", name),
            Error::ServiceNotFound(name) => write!(f, "Service '{}' not found", name),
            Error::MalformedHeader(raw) => write!(f, "Malformed command header {:#010x}", raw),
            Error::ResponseOverflow { words } => {
                write!(f, "Response of {} words does not fit in the command buffer", words)
            }
            Error::MissingParameter { index } => write!(f, "Missing parameter word {}", index),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl core::error::Error for Error {}

/// Result type for operations that can fail
pub type Result<T> = core::result::Result<T, Error>;

/// Creates a new duplicate command error
pub fn duplicate_command(service: &str, id: u32) -> Error {
    Error::DuplicateCommand {
        service: service.to_string(),
        id,
    }
}

/// Creates a new service not found error
pub fn service_not_found(name: &str) -> Error {
    Error::ServiceNotFound(name.to_string())
}

/// Creates a new invalid argument error
pub fn invalid_argument(msg: &str) -> Error {
    Error::InvalidArgument(msg.to_string())
}
