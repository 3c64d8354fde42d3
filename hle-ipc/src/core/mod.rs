//! Core dispatch functionality
//!
//! This module provides the command dispatch mechanism: descriptors, the
//! per-service handler table, the dispatcher and the traits at its seams.

pub mod descriptor;
pub mod dispatcher;
pub mod registry;
pub mod traits;

// Re-export commonly used items
pub use descriptor::{CommandDescriptor, Handler};
pub use dispatcher::{DispatchOutcome, DispatchStats, Dispatcher};
pub use registry::HandlerTable;
pub use traits::{CommandHandler, DiagnosticSink, HandlerResult, ServiceLookup};
