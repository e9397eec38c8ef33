/// Error handling for tokendash
///
/// One top-level error wrapping a structured enum per concern. Network and
/// parse failures are per-action and recoverable; configuration failures at
/// startup are fatal.
use thiserror::Error;

// =============================================================================
// MAIN ERROR TYPE
// =============================================================================

#[derive(Debug, Error)]
pub enum TokenDashError {
    #[error("Configuration Error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Fetch Error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Trade Error: {0}")]
    Trade(#[from] TradeError),

    #[error("Notification Error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Database Error: {0}")]
    Store(#[from] StoreError),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

// =============================================================================
// CONFIGURATION ERROR TYPES
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read config file '{path}': {error}")]
    Read { path: String, error: String },

    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: String, error: String },

    #[error("Invalid bounds for '{field}': min {min} is greater than max {max}")]
    InvalidBounds { field: String, min: f64, max: f64 },

    #[error("Invalid config field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to write config file '{path}': {error}")]
    Write { path: String, error: String },
}

// =============================================================================
// MARKET DATA ERROR TYPES
// =============================================================================

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for token {identifier}")]
    Status { identifier: String, status: u16 },

    #[error("Request for token {identifier} failed: {error}")]
    Transport { identifier: String, error: String },

    #[error("Unexpected response shape for token {identifier}: {error}")]
    Malformed { identifier: String, error: String },

    #[error("No pair returned for token {identifier}")]
    NotFound { identifier: String },
}

impl FetchError {
    pub fn identifier(&self) -> &str {
        match self {
            FetchError::Status { identifier, .. }
            | FetchError::Transport { identifier, .. }
            | FetchError::Malformed { identifier, .. }
            | FetchError::NotFound { identifier } => identifier,
        }
    }

    /// Message shown inline on the dashboard; the detail goes to the log
    pub fn user_message(&self) -> String {
        format!("Failed to fetch data for token: {}", self.identifier())
    }
}

// =============================================================================
// TRADE ERROR TYPES
// =============================================================================

#[derive(Debug, Error)]
pub enum TradeError {
    #[error("Trading API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Trading API request failed: {0}")]
    Transport(String),
}

// =============================================================================
// NOTIFICATION ERROR TYPES
// =============================================================================

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid Telegram API URL '{url}': {error}")]
    InvalidApiUrl { url: String, error: String },

    #[error("Telegram rejected the message: {0}")]
    Rejected(String),

    #[error("Telegram request failed: {0}")]
    Transport(String),
}

// =============================================================================
// DATABASE ERROR TYPES
// =============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open database '{path}': {error}")]
    Open { path: String, error: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
