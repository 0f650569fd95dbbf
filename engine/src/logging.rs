//! FILENAME: engine/src/logging.rs
// PURPOSE: Category-tagged logging macros for the engine and the crates driving it.
// CONTEXT: Every line goes through the `log` facade with the category as its
// target, so `log_debug!("VIEW", ...)` can be enabled per category by the host.

// ============================================================================
// LEVEL MACROS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::__log::error!(target: $cat, $($arg)*)
    };
}

// ============================================================================
// ENTER/EXIT macros for function tracing
// ============================================================================

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::__log::debug!(target: $cat, "ENTER {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::__log::debug!(target: $cat, "ENTER {} {}", $func, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::__log::debug!(target: $cat, "EXIT {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::__log::debug!(target: $cat, "EXIT {} {}", $func, format_args!($($arg)*))
    };
}
