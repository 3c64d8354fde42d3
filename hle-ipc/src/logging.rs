//! Logging support for hle-ipc
//!
//! Thin wrappers over the `log` facade that compile to nothing when the
//! `log` feature is disabled, so call sites need no `#[cfg]` of their own.

/// Trace-level logging
macro_rules! hle_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
    }
}

/// Debug-level logging
macro_rules! hle_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
    }
}

/// Warn-level logging
macro_rules! hle_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::warn!($($arg)*);
    }
}

/// Error-level logging
macro_rules! hle_error {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::error!($($arg)*);
    }
}
