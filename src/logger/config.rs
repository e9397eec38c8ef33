/// Logger configuration shared by all logging calls
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped (Debug/Verbose have extra gating)
    pub min_level: LogLevel,
    /// Tags whose Debug messages are shown
    pub debug_tags: HashSet<LogTag>,
    /// Mirror console output into the daily log file
    pub file_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            file_logging: false,
        }
    }
}

impl LoggerConfig {
    /// Build a config from the CLI flags
    ///
    /// `--quiet` wins over `--verbose`; any --debug-<tag> raises the threshold to Debug.
    pub fn from_flags(verbose: bool, quiet: bool, debug_tags: HashSet<LogTag>) -> Self {
        let min_level = if quiet {
            LogLevel::Error
        } else if verbose {
            LogLevel::Verbose
        } else if !debug_tags.is_empty() {
            LogLevel::Debug
        } else {
            LogLevel::Info
        };

        Self {
            min_level,
            debug_tags,
            file_logging: !quiet,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut current) = LOGGER_CONFIG.write() {
        *current = config;
    }
}

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

pub(super) fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config().debug_tags.contains(tag)
}
