/// Configuration schemas
///
/// The document is JSON. The top-level keys the dashboard has always required
/// stay required (no defaults); everything added since is optional and only
/// written back when it differs from its default. Unknown keys round-trip
/// through `extra`.
use crate::config_struct;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const DEFAULT_BONKBOT_API_URL: &str = "https://api.bonkbot.com/trade";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org/";

/// Allowed range for the watch-mode refresh interval
pub const MIN_UPDATE_INTERVAL_SECS: u64 = 60;
pub const MAX_UPDATE_INTERVAL_SECS: u64 = 600;

// ============================================================================
// SETTINGS
// ============================================================================

config_struct! {
    /// Screening bounds and request pacing
    pub struct Settings {
        /// Liquidity bounds in USD
        min_liquidity: f64 = 10_000.0,
        max_liquidity: f64 = 1_000_000.0,

        /// Market-cap bounds in USD
        min_market_cap: f64 = 50_000.0,
        max_market_cap: f64 = 10_000_000.0,

        /// Refresh interval for `fetch --watch`
        update_interval_secs: u64 = 300,

        /// Per-request HTTP timeout
        request_timeout_secs: u64 = 30,
    }
}

// ============================================================================
// DENYLISTS
// ============================================================================

/// Token identifiers and developer addresses excluded from consideration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blacklist {
    pub coins: Vec<String>,
    pub devs: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// TELEGRAM CHAT TARGET
// ============================================================================

/// Chat id exactly as written in the document, number or string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatTarget {
    Id(i64),
    Name(String),
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{}", id),
            ChatTarget::Name(name) => f.write_str(name),
        }
    }
}

// ============================================================================
// ROOT DOCUMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Price API base; the token identifier is appended verbatim
    pub dex_api_url: String,
    /// SQLite file holding the `tokens` table
    pub database_name: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: ChatTarget,
    pub bonkbot_api_key: String,
    pub blacklist: Blacklist,

    #[serde(
        default = "default_bonkbot_api_url",
        skip_serializing_if = "is_default_bonkbot_api_url"
    )]
    pub bonkbot_api_url: String,

    #[serde(
        default = "default_telegram_api_url",
        skip_serializing_if = "is_default_telegram_api_url"
    )]
    pub telegram_api_url: String,

    #[serde(default, skip_serializing_if = "is_default_settings")]
    pub settings: Settings,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_bonkbot_api_url() -> String {
    DEFAULT_BONKBOT_API_URL.to_string()
}

fn is_default_bonkbot_api_url(url: &String) -> bool {
    url == DEFAULT_BONKBOT_API_URL
}

fn default_telegram_api_url() -> String {
    DEFAULT_TELEGRAM_API_URL.to_string()
}

fn is_default_telegram_api_url(url: &String) -> bool {
    url == DEFAULT_TELEGRAM_API_URL
}

fn is_default_settings(settings: &Settings) -> bool {
    *settings == Settings::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.min_liquidity, 10_000.0);
        assert_eq!(settings.max_market_cap, 10_000_000.0);
        assert_eq!(settings.update_interval_secs, 300);
    }

    #[test]
    fn test_partial_settings_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"min_liquidity": 5.0}"#).unwrap();
        assert_eq!(settings.min_liquidity, 5.0);
        assert_eq!(settings.max_liquidity, 1_000_000.0);
    }

    #[test]
    fn test_chat_target_keeps_json_type() {
        let numeric: ChatTarget = serde_json::from_str("-100123").unwrap();
        let named: ChatTarget = serde_json::from_str(r#""@alerts""#).unwrap();
        assert_eq!(numeric, ChatTarget::Id(-100123));
        assert_eq!(named, ChatTarget::Name("@alerts".to_string()));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "-100123");
    }
}
