//! Structured logging for tokendash
//!
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control via --debug-<tag> flags
//! - Dual output: colored console + daily log file
//!
//! ## Usage
//!
//! ```rust
//! use tokendash::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::info(LogTag::Trader, "Trade submitted");
//! logger::debug(LogTag::Api, "Request details: ..."); // Only with --debug-api
//! ```
//!
//! Console output goes to stderr so rendered dashboard output on stdout stays clean.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Call once at startup with the configuration derived from CLI flags.
/// File logging is enabled only when `config.file_logging` is set.
pub fn init(config: LoggerConfig) {
    let file_logging = config.file_logging;
    set_logger_config(config);

    if file_logging {
        file::init_file_logging();
    }
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (shown unless --quiet)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the matching --debug-<tag> flag is provided.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (only with --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush pending log writes
pub fn flush() {
    file::flush_file_logging();
}
