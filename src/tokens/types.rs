/// Token data types shared by the fetcher, the store and the dashboard
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Flat projection of one token's market fields at a point in time
///
/// Values are kept exactly as the price API returned them: `price_usd` stays
/// text, the numeric fields are not rounded or rescaled. `None` means the key
/// was present but `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub identifier: String,
    pub name: String,
    pub symbol: String,
    pub price_usd: Option<String>,
    pub market_cap: Option<f64>,
    pub liquidity_usd: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}

/// One row of the `tokens` table
///
/// Every column other than `id` is nullable in the schema, so each is an
/// `Option` here. The six risk flags are stored as 0/1 integers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TokenRecord {
    pub id: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub price_usd: Option<f64>,
    pub market_cap: Option<f64>,
    pub liquidity: Option<f64>,
    pub volume_24h: Option<f64>,
    pub is_cex_listed: Option<bool>,
    pub is_tier1: Option<bool>,
    pub is_rugged: Option<bool>,
    pub is_pumped: Option<bool>,
    pub dev_address: Option<String>,
    pub is_fake_volume: Option<bool>,
    pub is_bundled_supply: Option<bool>,
    pub rugcheck_status: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl TokenRecord {
    /// Build a row from a fetched snapshot
    ///
    /// Fields the price API does not provide (volume, risk flags, developer,
    /// rugcheck status) stay empty. A price that is not a number is dropped.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            id: snapshot.identifier.clone(),
            name: Some(snapshot.name.clone()),
            symbol: Some(snapshot.symbol.clone()),
            price_usd: snapshot
                .price_usd
                .as_deref()
                .and_then(|p| p.trim().parse::<f64>().ok()),
            market_cap: snapshot.market_cap,
            liquidity: snapshot.liquidity_usd,
            timestamp: Some(snapshot.fetched_at),
            ..Self::default()
        }
    }

    /// Names of the risk flags that are set
    pub fn raised_flags(&self) -> Vec<&'static str> {
        [
            ("cex_listed", self.is_cex_listed),
            ("tier1", self.is_tier1),
            ("rugged", self.is_rugged),
            ("pumped", self.is_pumped),
            ("fake_volume", self.is_fake_volume),
            ("bundled_supply", self.is_bundled_supply),
        ]
        .into_iter()
        .filter(|(_, flag)| *flag == Some(true))
        .map(|(name, _)| name)
        .collect()
    }
}
