//! Shared fixtures for unit tests: a baseline config and local HTTP stubs

use crate::config::{Blacklist, ChatTarget, Config, Settings};
use crate::config::schemas::{DEFAULT_BONKBOT_API_URL, DEFAULT_TELEGRAM_API_URL};
use axum::Router;
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;

pub fn sample_config(dex_api_url: &str) -> Config {
    Config {
        dex_api_url: dex_api_url.to_string(),
        database_name: "tokens.db".to_string(),
        telegram_bot_token: "123:abc".to_string(),
        telegram_chat_id: ChatTarget::Id(42),
        bonkbot_api_key: "KEY".to_string(),
        blacklist: Blacklist::default(),
        bonkbot_api_url: DEFAULT_BONKBOT_API_URL.to_string(),
        telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        settings: Settings::default(),
        extra: Map::new(),
    }
}

/// Minimal price API body for `identifier`
pub fn pair_body(identifier: &str, price_usd: &str) -> Value {
    json!({
        "pair": {
            "baseToken": { "name": format!("Name {}", identifier), "symbol": identifier },
            "priceUsd": price_usd,
            "marketCap": 250000.0,
            "liquidity": { "usd": 75000.0 }
        }
    })
}

/// Serve `router` on an ephemeral localhost port, returning `http://127.0.0.1:PORT`
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
