//! Dispatch traits
//!
//! This module provides the traits at the seams of the dispatch mechanism:
//! command handlers, diagnostic sinks and service lookup.

use hle_api::ipc::{IpcRequest, IpcResponse, ResultCode};

use crate::diagnostics::Diagnostic;
use crate::service::Service;

/// What a handler hands back to the dispatcher
///
/// `Err` carries a guest result code; the dispatcher turns it into an error
/// response for the requesting command.
pub type HandlerResult = core::result::Result<IpcResponse, ResultCode>;

/// Command handler trait
pub trait CommandHandler: Send + Sync {
    /// Execute the command
    fn handle(&self, request: &IpcRequest) -> HandlerResult;
}

impl<F> CommandHandler for F
where
    F: Fn(&IpcRequest) -> HandlerResult + Send + Sync,
{
    fn handle(&self, request: &IpcRequest) -> HandlerResult {
        self(request)
    }
}

/// Receiver for dispatch diagnostics
///
/// Sinks observe; they never change what the guest receives.
pub trait DiagnosticSink: Send + Sync {
    /// Record a diagnostic
    fn record(&self, diagnostic: &Diagnostic);
}

/// Service lookup by guest-visible name
pub trait ServiceLookup {
    /// Get a service by name
    fn service(&self, name: &str) -> Option<&Service>;
}
