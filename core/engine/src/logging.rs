//! FILENAME: core/engine/src/logging.rs
//! PURPOSE: Category-tagged logging macros for the engine.
//! CONTEXT: The engine is a library, so it only emits through the `log`
//! facade; the host decides where lines go. The category becomes the log
//! target, which keeps lines filterable per subsystem (SHEET, MERGE, ...).

// ============================================================================
// CATEGORIES
// ============================================================================

pub const SHEET: &str = "SHEET";
pub const MERGE: &str = "MERGE";
pub const FORMAT: &str = "FORMAT";
pub const CMD: &str = "CMD";
pub const UNDO: &str = "UNDO";

/// Write an ENTER line for function entry.
pub fn write_log_enter(level: log::Level, category: &str, func_name: &str, params: &str) {
    if params.is_empty() {
        log::log!(target: category, level, "ENTER {}", func_name);
    } else {
        log::log!(target: category, level, "ENTER {} {}", func_name, params);
    }
}

/// Write an EXIT line for function exit.
pub fn write_log_exit(level: log::Level, category: &str, func_name: &str, result: &str) {
    if result.is_empty() {
        log::log!(target: category, level, "EXIT {}", func_name);
    } else {
        log::log!(target: category, level, "EXIT {} {}", func_name, result);
    }
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        ::log::log!(target: $cat, ::log::Level::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        ::log::log!(target: $cat, ::log::Level::Info, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        ::log::log!(target: $cat, ::log::Level::Warn, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        ::log::log!(target: $cat, ::log::Level::Error, $($arg)*)
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter(::log::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter(::log::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit(::log::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit(::log::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use log_debug;
pub use log_enter;
pub use log_error;
pub use log_exit;
pub use log_info;
pub use log_warn;
