/// Configuration utilities - loading, validation, denylist edits and saving
///
/// The configuration is an explicit value handed to each component; nothing
/// here keeps global state. Saving writes a sibling temp file and renames it
/// over the document so a crash never leaves a half-written config behind.
use super::schemas::{Config, MAX_UPDATE_INTERVAL_SECS, MIN_UPDATE_INTERVAL_SECS};
use crate::errors::ConfigError;
use crate::logger::{self, LogTag};
use std::io::Write;
use std::path::Path;

/// Load and validate the configuration document
///
/// A missing or malformed document is an error; there are no fallback values
/// for the required keys.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ConfigError::FileNotFound { path: display });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: display.clone(),
        error: e.to_string(),
    })?;

    let config = serde_json::from_str::<Config>(&contents).map_err(|e| ConfigError::Parse {
        path: display.clone(),
        error: e.to_string(),
    })?;

    validate_config(&config)?;

    logger::debug(
        LogTag::Config,
        &format!(
            "Loaded config from {} ({} denylisted coins, {} denylisted devs)",
            display,
            config.blacklist.coins.len(),
            config.blacklist.devs.len()
        ),
    );

    Ok(config)
}

/// Reject inverted or out-of-range settings
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let settings = &config.settings;

    // Negated comparison so NaN bounds are rejected too
    if !(settings.min_liquidity <= settings.max_liquidity) {
        return Err(ConfigError::InvalidBounds {
            field: "liquidity".to_string(),
            min: settings.min_liquidity,
            max: settings.max_liquidity,
        });
    }

    if !(settings.min_market_cap <= settings.max_market_cap) {
        return Err(ConfigError::InvalidBounds {
            field: "market_cap".to_string(),
            min: settings.min_market_cap,
            max: settings.max_market_cap,
        });
    }

    if !(MIN_UPDATE_INTERVAL_SECS..=MAX_UPDATE_INTERVAL_SECS)
        .contains(&settings.update_interval_secs)
    {
        return Err(ConfigError::InvalidValue {
            field: "settings.update_interval_secs".to_string(),
            reason: format!(
                "must be between {} and {} seconds, got {}",
                MIN_UPDATE_INTERVAL_SECS, MAX_UPDATE_INTERVAL_SECS, settings.update_interval_secs
            ),
        });
    }

    if settings.request_timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "settings.request_timeout_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(())
}

/// Split free text into list entries, one per line
///
/// No trimming, dedup or validation: `"A\nB\n"` becomes `["A", "B", ""]`.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

impl Config {
    /// Replace both denylists from user-submitted text
    ///
    /// Lists are replaced in full, never merged.
    pub fn replace_blacklists(&mut self, coins_text: &str, devs_text: &str) {
        self.blacklist.coins = split_lines(coins_text);
        self.blacklist.devs = split_lines(devs_text);
    }

    pub fn is_coin_blacklisted(&self, identifier: &str) -> bool {
        self.blacklist.coins.iter().any(|c| c == identifier)
    }

    pub fn is_dev_blacklisted(&self, address: &str) -> bool {
        self.blacklist.devs.iter().any(|d| d == address)
    }
}

/// Write the whole configuration document to `path`
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let display = path.display().to_string();
    let write_error = |error: String| ConfigError::Write {
        path: display.clone(),
        error,
    };

    let json = serde_json::to_string_pretty(config).map_err(|e| write_error(e.to_string()))?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
    temp.write_all(json.as_bytes())
        .map_err(|e| write_error(e.to_string()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| write_error(e.to_string()))?;
    temp.persist(path)
        .map_err(|e| write_error(e.error.to_string()))?;

    logger::debug(LogTag::Config, &format!("Saved config to {}", display));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schemas::{ChatTarget, Settings, DEFAULT_BONKBOT_API_URL};
    use serde_json::Value;

    const BASE_DOCUMENT: &str = r#"{
        "dex_api_url": "https://api.dexscreener.com/latest/dex/tokens/",
        "database_name": "tokens.db",
        "telegram_bot_token": "123:abc",
        "telegram_chat_id": "42",
        "bonkbot_api_key": "secret",
        "blacklist": { "coins": ["OLD"], "devs": [] },
        "theme": "dark"
    }"#;

    fn write_document(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.json");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_required_keys_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(&dir, BASE_DOCUMENT);

        let config = load_config(&path).unwrap();
        assert_eq!(config.database_name, "tokens.db");
        assert_eq!(config.telegram_chat_id, ChatTarget::Name("42".to_string()));
        assert_eq!(config.blacklist.coins, vec!["OLD"]);
        assert_eq!(config.bonkbot_api_url, DEFAULT_BONKBOT_API_URL);
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_missing_required_key_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(&dir, r#"{ "dex_api_url": "x" }"#);
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut document: Value = serde_json::from_str(BASE_DOCUMENT).unwrap();
        document["settings"] = serde_json::json!({
            "min_liquidity": 500.0,
            "max_liquidity": 100.0
        });
        let path = write_document(&dir, &document.to_string());

        let err = load_config(&path).unwrap_err();
        match err {
            ConfigError::InvalidBounds { field, min, max } => {
                assert_eq!(field, "liquidity");
                assert_eq!(min, 500.0);
                assert_eq!(max, 100.0);
            }
            other => panic!("expected InvalidBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_update_interval_out_of_range_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut document: Value = serde_json::from_str(BASE_DOCUMENT).unwrap();
        document["settings"] = serde_json::json!({ "update_interval_secs": 5 });
        let path = write_document(&dir, &document.to_string());

        assert!(matches!(
            load_config(&path).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn test_blacklist_update_persists_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(&dir, BASE_DOCUMENT);

        let mut config = load_config(&path).unwrap();
        config.replace_blacklists("A\nB\nC", "X\nY");
        save_config(&config, &path).unwrap();

        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded.blacklist.coins, vec!["A", "B", "C"]);
        assert_eq!(reloaded.blacklist.devs, vec!["X", "Y"]);

        let mut config = reloaded;
        config.replace_blacklists("A\nB\n", "X\nY");
        save_config(&config, &path).unwrap();

        let reloaded = load_config(&path).unwrap();
        assert_eq!(reloaded.blacklist.coins, vec!["A", "B", ""]);
    }

    #[test]
    fn test_trailing_newline_keeps_empty_entry() {
        assert_eq!(split_lines("A\nB\n"), vec!["A", "B", ""]);
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines(" A \nA"), vec![" A ", "A"]);
    }

    #[test]
    fn test_save_preserves_unknown_keys_and_omits_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(&dir, BASE_DOCUMENT);

        let config = load_config(&path).unwrap();
        save_config(&config, &path).unwrap();

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["telegram_chat_id"], "42");
        assert!(raw.get("settings").is_none());
        assert!(raw.get("bonkbot_api_url").is_none());
    }

    #[test]
    fn test_blacklist_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_document(&dir, BASE_DOCUMENT);
        let mut config = load_config(&path).unwrap();
        config.replace_blacklists("COIN1", "DEV1\n");

        assert!(config.is_coin_blacklisted("COIN1"));
        assert!(!config.is_coin_blacklisted("OLD"));
        assert!(config.is_dev_blacklisted("DEV1"));
        assert!(!config.is_dev_blacklisted("DEV2"));
    }
}
