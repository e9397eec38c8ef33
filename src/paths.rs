//! Path resolution for tokendash
//!
//! Logs live under the platform data directory:
//! - **macOS**: `~/Library/Application Support/tokendash/`
//! - **Windows**: `%LOCALAPPDATA%\tokendash\`
//! - **Linux**: `$XDG_DATA_HOME/tokendash/` (fallback `~/.local/share/tokendash/`)
//!
//! The configuration document and the token database are resolved relative to
//! the working directory, the same way the dashboard always located them.

use once_cell::sync::Lazy;
use std::path::PathBuf;

const APP_DIR: &str = "tokendash";

/// Default configuration document, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(dir) = dirs::data_dir() {
        return dir.join(APP_DIR);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(APP_DIR);
    }

    PathBuf::from(APP_DIR)
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
    BASE_DIRECTORY.join("logs")
}

/// Ensure every directory tokendash writes into exists
pub fn ensure_all_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_directory())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_directory_not_empty() {
        assert!(!BASE_DIRECTORY.as_os_str().is_empty());
    }

    #[test]
    fn test_logs_directory_is_subdir() {
        let logs = get_logs_directory();
        assert!(logs.starts_with(BASE_DIRECTORY.as_path()));
        assert_eq!(logs.file_name().unwrap(), "logs");
    }
}
