//! Logging support for hle-services

/// Info-level logging
macro_rules! hle_info {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::info!($($arg)*);
    }
}

/// Debug-level logging
macro_rules! hle_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
    }
}
