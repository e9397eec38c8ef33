/// Trade request types for the trading API
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (token, action) pair submitted by the user. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeIntent {
    pub token_address: String,
    pub action: TradeAction,
}

impl TradeIntent {
    pub fn new(token_address: impl Into<String>, action: TradeAction) -> Self {
        Self {
            token_address: token_address.into(),
            action,
        }
    }
}

/// JSON body of the trade POST
#[derive(Debug, Serialize)]
pub struct TradeRequest<'a> {
    pub token_address: &'a str,
    pub action: TradeAction,
}

impl<'a> From<&'a TradeIntent> for TradeRequest<'a> {
    fn from(intent: &'a TradeIntent) -> Self {
        Self {
            token_address: &intent.token_address,
            action: intent.action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let intent = TradeIntent::new("T1", TradeAction::Sell);
        let body = serde_json::to_value(TradeRequest::from(&intent)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "token_address": "T1", "action": "sell" })
        );
    }
}
