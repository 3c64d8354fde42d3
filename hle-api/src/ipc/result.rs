//! Guest result codes
//!
//! A result code is the second word of every response. Zero means success;
//! anything else packs a description, module, summary and level:
//!
//! ```text
//!  31    27 26    21 20  18 17       10 9          0
//! +--------+--------+------+-----------+------------+
//! | level  |summary | ---- |  module   | description|
//! +--------+--------+------+-----------+------------+
//! ```

use core::fmt;
use static_assertions::const_assert_eq;

/// Error description field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorDescription {
    /// No error
    Success = 0,
    /// Argument out of the accepted set
    InvalidEnumValue = 1005,
    /// Functionality is not implemented
    NotImplemented = 1012,
    /// Object was not found
    NotFound = 1018,
    /// Value is out of range
    OutOfRange = 1021,
}

/// Module that produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorModule {
    /// Shared across all modules
    Common = 0,
    /// Kernel
    Kernel = 1,
}

/// Broad category of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorSummary {
    /// Success
    Success = 0,
    /// Missing object or data
    NotFound = 4,
    /// Request is not supported
    NotSupported = 6,
    /// Wrong state for the request
    InvalidState = 5,
    /// Caller passed a bad argument
    InvalidArgument = 7,
}

/// Severity of the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorLevel {
    /// Success
    Success = 0,
    /// Caller may retry
    Temporary = 26,
    /// Retrying will not help
    Permanent = 27,
    /// Usage error
    Usage = 28,
}

const DESCRIPTION_MASK: u32 = 0x3FF;
const MODULE_SHIFT: u32 = 10;
const MODULE_MASK: u32 = 0xFF;
const SUMMARY_SHIFT: u32 = 21;
const SUMMARY_MASK: u32 = 0x3F;
const LEVEL_SHIFT: u32 = 27;
const LEVEL_MASK: u32 = 0x1F;

/// Raw guest result word
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResultCode(u32);

impl ResultCode {
    /// The success result
    pub const SUCCESS: ResultCode = ResultCode(0);

    /// Written for commands that are unknown, declared without a handler, or
    /// otherwise cannot be serviced
    pub const NOT_IMPLEMENTED: ResultCode = ResultCode::new(
        ErrorDescription::NotImplemented,
        ErrorModule::Common,
        ErrorSummary::NotSupported,
        ErrorLevel::Permanent,
    );

    /// Packs a result code from its fields
    pub const fn new(
        description: ErrorDescription,
        module: ErrorModule,
        summary: ErrorSummary,
        level: ErrorLevel,
    ) -> Self {
        ResultCode(
            (description as u32 & DESCRIPTION_MASK)
                | ((module as u32 & MODULE_MASK) << MODULE_SHIFT)
                | ((summary as u32 & SUMMARY_MASK) << SUMMARY_SHIFT)
                | ((level as u32 & LEVEL_MASK) << LEVEL_SHIFT),
        )
    }

    /// Wraps a raw result word
    pub const fn from_raw(raw: u32) -> Self {
        ResultCode(raw)
    }

    /// Returns the raw result word
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true if the result is success
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the result is an error
    pub const fn is_error(self) -> bool {
        self.0 != 0
    }

    /// Raw description field
    pub const fn description(self) -> u32 {
        self.0 & DESCRIPTION_MASK
    }

    /// Raw module field
    pub const fn module(self) -> u32 {
        (self.0 >> MODULE_SHIFT) & MODULE_MASK
    }

    /// Raw summary field
    pub const fn summary(self) -> u32 {
        (self.0 >> SUMMARY_SHIFT) & SUMMARY_MASK
    }

    /// Raw level field
    pub const fn level(self) -> u32 {
        (self.0 >> LEVEL_SHIFT) & LEVEL_MASK
    }
}

const_assert_eq!(ResultCode::NOT_IMPLEMENTED.raw(), 0xD8C0_03F4);

impl Default for ResultCode {
    fn default() -> Self {
        ResultCode::SUCCESS
    }
}

impl fmt::Debug for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResultCode({:#010x})", self.0)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            return write!(f, "success");
        }
        write!(
            f,
            "{:#010x} (description={}, module={}, summary={}, level={})",
            self.0,
            self.description(),
            self.module(),
            self.summary(),
            self.level()
        )
    }
}
