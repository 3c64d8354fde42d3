//! Command header encoding
//!
//! Word 0 of every request and response:
//!
//! ```text
//!  31            16 15  12 11      6 5       0
//! +----------------+------+---------+---------+
//! |   command id   | ---- | normal  |translate|
//! +----------------+------+---------+---------+
//! ```
//!
//! A service's command identifier is this whole word, so two requests with the
//! same command id but different parameter counts are different commands.

use core::fmt;

const COMMAND_ID_SHIFT: u32 = 16;
const NORMAL_SHIFT: u32 = 6;
const PARAM_COUNT_MASK: u32 = 0x3F;

/// Largest parameter count either field can hold
pub const MAX_PARAM_COUNT: u32 = PARAM_COUNT_MASK;

/// Decoded command header
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandHeader(u32);

impl CommandHeader {
    /// Builds a header from its fields
    ///
    /// Counts wider than six bits are truncated the same way the guest does.
    pub const fn new(command_id: u16, normal_params: u32, translate_params: u32) -> Self {
        CommandHeader(
            ((command_id as u32) << COMMAND_ID_SHIFT)
                | ((normal_params & PARAM_COUNT_MASK) << NORMAL_SHIFT)
                | (translate_params & PARAM_COUNT_MASK),
        )
    }

    /// Wraps a raw header word
    pub const fn from_raw(raw: u32) -> Self {
        CommandHeader(raw)
    }

    /// Raw header word
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Command id (upper half-word)
    pub const fn command_id(self) -> u16 {
        (self.0 >> COMMAND_ID_SHIFT) as u16
    }

    /// Number of normal parameter words
    pub const fn normal_params(self) -> u32 {
        (self.0 >> NORMAL_SHIFT) & PARAM_COUNT_MASK
    }

    /// Number of translate parameter words
    pub const fn translate_params(self) -> u32 {
        self.0 & PARAM_COUNT_MASK
    }

    /// Total parameter words following the header
    pub const fn param_words(self) -> usize {
        (self.normal_params() + self.translate_params()) as usize
    }
}

impl From<u32> for CommandHeader {
    fn from(raw: u32) -> Self {
        CommandHeader(raw)
    }
}

impl fmt::Debug for CommandHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHeader")
            .field("raw", &format_args!("{:#010x}", self.0))
            .field("command_id", &format_args!("{:#06x}", self.command_id()))
            .field("normal", &self.normal_params())
            .field("translate", &self.translate_params())
            .finish()
    }
}

/// Command identifier as registered in a service's handler table
pub type CommandId = u32;
