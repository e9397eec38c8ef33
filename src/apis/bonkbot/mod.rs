/// BonkBot-style trading API client
///
/// A trade is a single authenticated POST. There is no quoting, sizing or
/// slippage; the remote service decides everything past the intent.
pub mod types;

pub use self::types::{TradeAction, TradeIntent, TradeRequest};

use crate::apis::client::build_http_client;
use crate::config::Config;
use crate::errors::TradeError;
use crate::logger::{self, LogTag};
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

pub struct BonkBotClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl BonkBotClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, String> {
        Ok(Self {
            client: build_http_client(timeout)?,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, String> {
        Self::new(
            config.bonkbot_api_url.clone(),
            config.bonkbot_api_key.clone(),
            Duration::from_secs(config.settings.request_timeout_secs),
        )
    }

    /// Submit the intent; true only when the API answers HTTP 200
    pub async fn execute(&self, intent: &TradeIntent) -> bool {
        match self.try_execute(intent).await {
            Ok(()) => true,
            Err(e) => {
                logger::error(
                    LogTag::Trader,
                    &format!(
                        "Trade {} for {} failed: {}",
                        intent.action, intent.token_address, e
                    ),
                );
                false
            }
        }
    }

    pub async fn try_execute(&self, intent: &TradeIntent) -> Result<(), TradeError> {
        logger::info(
            LogTag::Trader,
            &format!(
                "Submitting {} for token {}",
                intent.action, intent.token_address
            ),
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&TradeRequest::from(intent))
            .send()
            .await
            .map_err(|e| TradeError::Transport(e.to_string()))?;

        let status = response.status();
        logger::debug(
            LogTag::Trader,
            &format!(
                "Trading API answered HTTP {} in {}ms",
                status.as_u16(),
                start.elapsed().as_millis()
            ),
        );

        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown".to_string());
            return Err(TradeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        logger::info(
            LogTag::Trader,
            &format!(
                "Executed {} for token {}",
                intent.action, intent.token_address
            ),
        );
        Ok(())
    }
}
