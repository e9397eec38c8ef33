/// Display-only screening of tokens against the denylists and configured bounds
///
/// Nothing here blocks a fetch, a store write or a trade; the verdict is shown
/// next to the data so the user can act on it.
use crate::config::{Config, Settings};
use crate::tokens::types::{Snapshot, TokenRecord};

/// Where a value falls relative to an inclusive `[min, max]` range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundCheck {
    Within,
    Below { min: f64 },
    Above { max: f64 },
    /// The value was not reported
    Unknown,
}

impl BoundCheck {
    pub fn evaluate(value: Option<f64>, min: f64, max: f64) -> Self {
        match value {
            None => BoundCheck::Unknown,
            Some(v) if v < min => BoundCheck::Below { min },
            Some(v) if v > max => BoundCheck::Above { max },
            Some(_) => BoundCheck::Within,
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, BoundCheck::Below { .. } | BoundCheck::Above { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningReport {
    pub coin_denylisted: bool,
    pub dev_denylisted: bool,
    pub liquidity: BoundCheck,
    pub market_cap: BoundCheck,
}

impl ScreeningReport {
    pub fn passes(&self) -> bool {
        !self.coin_denylisted
            && !self.dev_denylisted
            && !self.liquidity.is_violation()
            && !self.market_cap.is_violation()
    }

    /// Short human-readable reasons, empty when the token passes
    pub fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        if self.coin_denylisted {
            reasons.push("token is denylisted".to_string());
        }
        if self.dev_denylisted {
            reasons.push("developer is denylisted".to_string());
        }
        push_bound_reason(&mut reasons, "liquidity", self.liquidity);
        push_bound_reason(&mut reasons, "market cap", self.market_cap);
        reasons
    }
}

fn push_bound_reason(reasons: &mut Vec<String>, label: &str, check: BoundCheck) {
    match check {
        BoundCheck::Below { min } => reasons.push(format!("{} below minimum {}", label, min)),
        BoundCheck::Above { max } => reasons.push(format!("{} above maximum {}", label, max)),
        BoundCheck::Within | BoundCheck::Unknown => {}
    }
}

fn check_bounds(
    settings: &Settings,
    liquidity: Option<f64>,
    market_cap: Option<f64>,
) -> (BoundCheck, BoundCheck) {
    (
        BoundCheck::evaluate(liquidity, settings.min_liquidity, settings.max_liquidity),
        BoundCheck::evaluate(market_cap, settings.min_market_cap, settings.max_market_cap),
    )
}

/// Screen a freshly fetched snapshot (the price API reports no developer)
pub fn screen_snapshot(snapshot: &Snapshot, config: &Config) -> ScreeningReport {
    let (liquidity, market_cap) =
        check_bounds(&config.settings, snapshot.liquidity_usd, snapshot.market_cap);
    ScreeningReport {
        coin_denylisted: config.is_coin_blacklisted(&snapshot.identifier),
        dev_denylisted: false,
        liquidity,
        market_cap,
    }
}

/// Screen a stored row, including its developer address
pub fn screen_record(record: &TokenRecord, config: &Config) -> ScreeningReport {
    let (liquidity, market_cap) = check_bounds(&config.settings, record.liquidity, record.market_cap);
    ScreeningReport {
        coin_denylisted: config.is_coin_blacklisted(&record.id),
        dev_denylisted: record
            .dev_address
            .as_deref()
            .map_or(false, |dev| config.is_dev_blacklisted(dev)),
        liquidity,
        market_cap,
    }
}
