/// Dashboard controller
///
/// Maps each user action onto exactly one kind of external call and returns a
/// structured outcome for `render` to print. Actions run sequentially; a failure
/// in one never aborts the rest of a batch.
pub mod render;

use crate::apis::{BonkBotClient, DexScreenerClient, TradeIntent};
use crate::config::{save_config, split_lines, Config};
use crate::errors::{ConfigError, FetchError, NotifyError, StoreError, TokenDashError};
use crate::logger::{self, LogTag};
use crate::telegram::{Notifier, TelegramNotifier};
use crate::tokens::{screen_snapshot, ScreeningReport, Snapshot, TokenDatabase, TokenRecord};
use chrono::{DateTime, Local};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// Illustrative entries shown by "view notifications"; nothing is retrieved
pub const PLACEHOLDER_NOTIFICATIONS: [&str; 2] = [
    "Bought TOKEN_ADDRESS_1 at $0.50",
    "Sold TOKEN_ADDRESS_2 at $1.00",
];

// =============================================================================
// OUTCOMES
// =============================================================================

/// Result of fetching one identifier
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched {
        snapshot: Snapshot,
        screening: ScreeningReport,
    },
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            FetchOutcome::Fetched { snapshot, .. } => Some(snapshot),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchOutcome::Fetched { .. })
    }
}

#[derive(Debug)]
pub struct TradeOutcome {
    pub intent: TradeIntent,
    pub executed: bool,
    /// `None` when no notification was attempted (failed trade)
    pub notification: Option<Result<(), NotifyError>>,
}

/// Confirmation text sent after a successful trade
pub fn trade_confirmation(intent: &TradeIntent, at: DateTime<Local>) -> String {
    format!(
        "✅ Executed {} for token {} at {}.",
        intent.action,
        intent.token_address,
        at.format("%Y-%m-%d %H:%M:%S%.6f")
    )
}

/// Identifiers as typed, one per line, in order; duplicates and blanks kept
pub fn identifiers_from_text(text: &str) -> Vec<String> {
    split_lines(text)
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct Dashboard {
    config: Config,
    config_path: PathBuf,
    fetcher: DexScreenerClient,
    trader: BonkBotClient,
    notifier: Box<dyn Notifier>,
}

impl Dashboard {
    pub fn new(
        config: Config,
        config_path: impl Into<PathBuf>,
        fetcher: DexScreenerClient,
        trader: BonkBotClient,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            config_path: config_path.into(),
            fetcher,
            trader,
            notifier,
        }
    }

    /// Build every collaborator from the loaded document
    pub fn from_config(
        config: Config,
        config_path: impl Into<PathBuf>,
    ) -> Result<Self, TokenDashError> {
        let fetcher = DexScreenerClient::from_config(&config).map_err(TokenDashError::Client)?;
        let trader = BonkBotClient::from_config(&config).map_err(TokenDashError::Client)?;
        let notifier = TelegramNotifier::from_config(&config)?;
        Ok(Self::new(
            config,
            config_path,
            fetcher,
            trader,
            Box::new(notifier),
        ))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace both denylists and persist the whole document
    ///
    /// The in-memory config only changes once the write has succeeded.
    pub fn update_blacklists(&mut self, coins_text: &str, devs_text: &str) -> Result<(), ConfigError> {
        let mut updated = self.config.clone();
        updated.replace_blacklists(coins_text, devs_text);
        save_config(&updated, &self.config_path)?;

        logger::info(
            LogTag::Blacklist,
            &format!(
                "Blacklists updated: {} coins, {} devs",
                updated.blacklist.coins.len(),
                updated.blacklist.devs.len()
            ),
        );
        self.config = updated;
        Ok(())
    }

    /// Fetch each identifier in order; one outcome per input entry
    pub async fn fetch_tokens(&self, identifiers: &[String]) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::with_capacity(identifiers.len());

        for identifier in identifiers {
            match self.fetcher.fetch(identifier).await {
                Ok(snapshot) => {
                    let screening = screen_snapshot(&snapshot, &self.config);
                    outcomes.push(FetchOutcome::Fetched {
                        snapshot,
                        screening,
                    });
                }
                Err(e) => {
                    logger::warning(LogTag::Api, &e.to_string());
                    outcomes.push(FetchOutcome::Failed(e));
                }
            }
        }

        logger::debug(
            LogTag::Dashboard,
            &format!(
                "Fetched {}/{} tokens",
                outcomes.iter().filter(|o| o.is_fetched()).count(),
                outcomes.len()
            ),
        );
        outcomes
    }

    /// Submit the trade; notify only when it went through
    pub async fn execute_trade(&self, intent: TradeIntent) -> TradeOutcome {
        if !self.trader.execute(&intent).await {
            return TradeOutcome {
                intent,
                executed: false,
                notification: None,
            };
        }

        let message = trade_confirmation(&intent, Local::now());
        let notification = self.notifier.notify(&message).await;
        if let Err(e) = &notification {
            logger::warning(
                LogTag::Telegram,
                &format!("Trade notification failed: {}", e),
            );
        }

        TradeOutcome {
            intent,
            executed: true,
            notification: Some(notification),
        }
    }

    /// Fixed placeholder list; performs no network call
    pub fn view_notifications(&self) -> Vec<String> {
        PLACEHOLDER_NOTIFICATIONS
            .iter()
            .map(|entry| entry.to_string())
            .collect()
    }

    pub fn open_database(&self) -> Result<TokenDatabase, StoreError> {
        TokenDatabase::init(&self.config.database_name)
    }

    /// Every row of the `tokens` table, in insertion order
    pub fn view_database(&self, database: &TokenDatabase) -> Result<Vec<TokenRecord>, StoreError> {
        database.read_all()
    }

    /// Write the fetched snapshots into the `tokens` table; returns rows written
    pub fn archive_snapshots(
        &self,
        database: &TokenDatabase,
        outcomes: &[FetchOutcome],
    ) -> Result<usize, StoreError> {
        let mut written = 0;
        for snapshot in outcomes.iter().filter_map(FetchOutcome::snapshot) {
            database.upsert(&TokenRecord::from_snapshot(snapshot))?;
            written += 1;
        }
        logger::info(
            LogTag::Database,
            &format!("Archived {} snapshots", written),
        );
        Ok(written)
    }

    /// Repeat the fetch batch every `update_interval_secs` until `shutdown` resolves
    ///
    /// The first round runs immediately. Each finished round is handed to
    /// `on_round` together with its 1-based number.
    pub async fn watch<S, F>(
        &self,
        identifiers: &[String],
        database: Option<&TokenDatabase>,
        shutdown: S,
        mut on_round: F,
    ) -> Result<u64, StoreError>
    where
        S: Future<Output = ()>,
        F: FnMut(u64, &[FetchOutcome]),
    {
        let period = Duration::from_secs(self.config.settings.update_interval_secs);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        logger::info(
            LogTag::Dashboard,
            &format!(
                "Watching {} tokens every {}s",
                identifiers.len(),
                period.as_secs()
            ),
        );

        let mut rounds = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let outcomes = self.fetch_tokens(identifiers).await;
                    if let Some(database) = database {
                        self.archive_snapshots(database, &outcomes)?;
                    }
                    rounds += 1;
                    on_round(rounds, &outcomes);
                }
            }
        }

        logger::info(
            LogTag::Dashboard,
            &format!("Watch stopped after {} rounds", rounds),
        );
        Ok(rounds)
    }
}
