#![forbid(unsafe_code)]

//! Logging shims.
//!
//! With the `tracing` feature enabled, the crate-root `debug!`/`info!`/
//! `warn!`/`error!` macros forward to [`tracing`]; without it they compile
//! to nothing, so callers never need to feature-gate their log lines.

#[cfg(feature = "tracing")]
pub use tracing;

/// Log at debug level (no-op without the `tracing` feature).
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::logging::tracing::debug!($($arg)*) };
}

/// Log at debug level (no-op without the `tracing` feature).
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// Log at info level (no-op without the `tracing` feature).
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::logging::tracing::info!($($arg)*) };
}

/// Log at info level (no-op without the `tracing` feature).
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {};
}

/// Log at warn level (no-op without the `tracing` feature).
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::logging::tracing::warn!($($arg)*) };
}

/// Log at warn level (no-op without the `tracing` feature).
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

/// Log at error level (no-op without the `tracing` feature).
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::logging::tracing::error!($($arg)*) };
}

/// Log at error level (no-op without the `tracing` feature).
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {};
}
