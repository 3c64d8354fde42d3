//! Command descriptors
//!
//! A descriptor pairs a command identifier with its handler slot and a
//! display name. The slot is an explicit variant, so a command can be
//! declared before anyone implements it.

use alloc::boxed::Box;
use core::fmt;

use hle_api::ipc::CommandId;

use super::traits::CommandHandler;

/// Handler slot of a command
pub enum Handler {
    /// Command is emulated
    Implemented(Box<dyn CommandHandler>),
    /// Command is declared but not emulated
    Unimplemented,
}

impl Handler {
    /// Returns true if a handler is present
    pub fn is_implemented(&self) -> bool {
        matches!(self, Handler::Implemented(_))
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Implemented(_) => write!(f, "Implemented"),
            Handler::Unimplemented => write!(f, "Unimplemented"),
        }
    }
}

/// Command descriptor
#[derive(Debug)]
pub struct CommandDescriptor {
    id: CommandId,
    handler: Handler,
    name: &'static str,
}

impl CommandDescriptor {
    /// Create a descriptor with a handler
    pub fn new<H>(id: CommandId, handler: H, name: &'static str) -> Self
    where
        H: CommandHandler + 'static,
    {
        Self {
            id,
            handler: Handler::Implemented(Box::new(handler)),
            name,
        }
    }

    /// Create a descriptor for a declared but unimplemented command
    pub const fn unimplemented(id: CommandId, name: &'static str) -> Self {
        Self {
            id,
            handler: Handler::Unimplemented,
            name,
        }
    }

    /// Command identifier
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Handler slot
    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if a handler is present
    pub fn is_implemented(&self) -> bool {
        self.handler.is_implemented()
    }
}
