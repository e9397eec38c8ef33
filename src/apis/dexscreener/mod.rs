/// DexScreener-style price API client
///
/// One endpoint: `GET {base_url}{token_identifier}`, answering with
/// `{"pair": {"baseToken": {...}, "priceUsd": ..., "marketCap": ..., "liquidity": {"usd": ...}}}`.
/// The identifier is appended verbatim; callers decide what they send.
pub mod types;

pub use self::types::{BaseTokenRaw, DexScreenerPairRaw, LiquidityRaw, PairResponse};

use crate::apis::client::build_http_client;
use crate::config::Config;
use crate::errors::FetchError;
use crate::logger::{self, LogTag};
use crate::tokens::types::Snapshot;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

pub struct DexScreenerClient {
    client: Client,
    base_url: String,
}

impl DexScreenerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, String> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, String> {
        Self::new(
            config.dex_api_url.clone(),
            Duration::from_secs(config.settings.request_timeout_secs),
        )
    }

    pub fn token_url(&self, identifier: &str) -> String {
        format!("{}{}", self.base_url, identifier)
    }

    /// Fetch one token and project it into a [`Snapshot`]
    ///
    /// Only HTTP 200 counts as an answer. Any failure is scoped to this
    /// identifier; callers fetching a batch carry on with the next one.
    pub async fn fetch(&self, identifier: &str) -> Result<Snapshot, FetchError> {
        let url = self.token_url(identifier);
        logger::debug(
            LogTag::Api,
            &format!("[DEXSCREENER] Fetching token: {}", url),
        );

        let start = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                identifier: identifier.to_string(),
                error: e.to_string(),
            })?;

        let status = response.status();
        logger::debug(
            LogTag::Api,
            &format!(
                "[DEXSCREENER] HTTP {} for {} in {}ms",
                status.as_u16(),
                identifier,
                start.elapsed().as_millis()
            ),
        );

        if status != StatusCode::OK {
            return Err(FetchError::Status {
                identifier: identifier.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FetchError::Transport {
            identifier: identifier.to_string(),
            error: e.to_string(),
        })?;
        logger::verbose(
            LogTag::Api,
            &format!("[DEXSCREENER] {} response body: {} bytes", identifier, body.len()),
        );

        parse_snapshot(identifier, &body)
    }
}

/// Project a 200 response body into a [`Snapshot`]
pub fn parse_snapshot(identifier: &str, body: &[u8]) -> Result<Snapshot, FetchError> {
    let response: PairResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed {
            identifier: identifier.to_string(),
            error: e.to_string(),
        })?;

    let pair = response.pair.ok_or_else(|| FetchError::NotFound {
        identifier: identifier.to_string(),
    })?;

    Ok(pair.into_snapshot(identifier, Utc::now()))
}
