/// Raw response shapes of the price API
///
/// Only the fields the dashboard projects are modelled. Keys must be present:
/// a missing key fails deserialization, while an explicit `null` becomes `None`.
use crate::tokens::types::Snapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Require the key but allow `null`
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// `priceUsd` is normally a string; accept a bare number and keep its text
fn required_price_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceText {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<PriceText>::deserialize(deserializer)?.map(|price| match price {
            PriceText::Text(text) => text,
            PriceText::Number(number) => number.to_string(),
        }),
    )
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairResponse {
    #[serde(deserialize_with = "required_nullable")]
    pub pair: Option<DexScreenerPairRaw>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DexScreenerPairRaw {
    #[serde(rename = "baseToken")]
    pub base_token: BaseTokenRaw,
    #[serde(rename = "priceUsd", deserialize_with = "required_price_text")]
    pub price_usd: Option<String>,
    #[serde(rename = "marketCap", deserialize_with = "required_nullable")]
    pub market_cap: Option<f64>,
    pub liquidity: LiquidityRaw,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseTokenRaw {
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityRaw {
    #[serde(deserialize_with = "required_nullable")]
    pub usd: Option<f64>,
}

impl DexScreenerPairRaw {
    pub fn into_snapshot(self, identifier: &str, fetched_at: DateTime<Utc>) -> Snapshot {
        Snapshot {
            identifier: identifier.to_string(),
            name: self.base_token.name,
            symbol: self.base_token.symbol,
            price_usd: self.price_usd,
            market_cap: self.market_cap,
            liquidity_usd: self.liquidity.usd,
            fetched_at,
        }
    }
}
