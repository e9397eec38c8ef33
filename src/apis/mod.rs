//! Clients for the external HTTP APIs
//!
//! - `dexscreener`: market snapshots from the price API
//! - `bonkbot`: trade submission

pub mod bonkbot;
pub mod client;
pub mod dexscreener;

pub use bonkbot::{BonkBotClient, TradeAction, TradeIntent};
pub use dexscreener::DexScreenerClient;
