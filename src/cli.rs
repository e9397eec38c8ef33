/// Command-line interface
///
/// Each subcommand is one dashboard action. Global flags control the config
/// location and logging; `--debug-<tag>` enables Debug output for one tag.
use crate::apis::TradeAction;
use crate::logger::{LogTag, LoggerConfig};
use crate::paths::DEFAULT_CONFIG_FILE;
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tokendash", version)]
#[command(about = "Token monitoring and trade execution dashboard", long_about = None)]
pub struct Cli {
    /// Configuration document
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(flatten)]
    pub logging: LoggingArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct LoggingArgs {
    /// Show every log level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Errors only, no log file
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub debug_system: bool,

    #[arg(long, global = true)]
    pub debug_config: bool,

    #[arg(long, global = true)]
    pub debug_api: bool,

    #[arg(long, global = true)]
    pub debug_trader: bool,

    #[arg(long, global = true)]
    pub debug_telegram: bool,

    #[arg(long, global = true)]
    pub debug_database: bool,

    #[arg(long, global = true)]
    pub debug_blacklist: bool,

    #[arg(long, global = true)]
    pub debug_dashboard: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or replace the coin and developer denylists
    Blacklist {
        /// New coin list, one entry per line; keeps the current list when omitted
        #[arg(long)]
        coins: Option<String>,

        /// New developer list, one entry per line; keeps the current list when omitted
        #[arg(long)]
        devs: Option<String>,
    },

    /// Fetch market snapshots for one or more tokens
    Fetch {
        /// Token identifiers, fetched in the order given
        identifiers: Vec<String>,

        /// Read identifiers from a file, one per line
        #[arg(long)]
        file: Option<PathBuf>,

        /// Also write the snapshots into the tokens table
        #[arg(long)]
        store: bool,

        /// Repeat every `settings.update_interval_secs` until Ctrl+C
        #[arg(long)]
        watch: bool,
    },

    /// Submit a buy or sell for one token
    Trade {
        token_address: String,

        #[arg(value_enum)]
        action: TradeAction,
    },

    /// Show the latest notifications
    Notifications,

    /// Show every row of the tokens table
    Database,
}

impl LoggingArgs {
    /// Whether `--debug-<tag>` was given for `tag`
    pub fn debug_enabled(&self, tag: LogTag) -> bool {
        match tag {
            LogTag::System => self.debug_system,
            LogTag::Config => self.debug_config,
            LogTag::Api => self.debug_api,
            LogTag::Trader => self.debug_trader,
            LogTag::Telegram => self.debug_telegram,
            LogTag::Database => self.debug_database,
            LogTag::Blacklist => self.debug_blacklist,
            LogTag::Dashboard => self.debug_dashboard,
        }
    }

    pub fn debug_tags(&self) -> HashSet<LogTag> {
        LogTag::ALL
            .into_iter()
            .filter(|tag| self.debug_enabled(*tag))
            .collect()
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig::from_flags(self.verbose, self.quiet, self.debug_tags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::LogLevel;

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::try_parse_from(["tokendash", "fetch", "T1", "T2"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.json"));
        match cli.command {
            Command::Fetch {
                identifiers,
                file,
                store,
                watch,
            } => {
                assert_eq!(identifiers, vec!["T1", "T2"]);
                assert!(file.is_none());
                assert!(!store && !watch);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_trade_action_parsing() {
        let cli = Cli::try_parse_from(["tokendash", "trade", "T1", "sell"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Trade { action: TradeAction::Sell, .. }
        ));
        assert!(Cli::try_parse_from(["tokendash", "trade", "T1", "hold"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tokendash",
            "database",
            "--config",
            "other.json",
            "--debug-database",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.json"));

        let logger = cli.logging.logger_config();
        assert_eq!(logger.min_level, LogLevel::Debug);
        assert!(logger.debug_tags.contains(&LogTag::Database));
        assert!(logger.file_logging);
    }

    #[test]
    fn test_every_tag_has_a_debug_flag() {
        for tag in LogTag::ALL {
            let flag = format!("--debug-{}", tag.to_debug_key());
            let cli = Cli::try_parse_from(["tokendash", "database", flag.as_str()])
                .unwrap_or_else(|e| panic!("{} rejected: {}", flag, e));
            assert_eq!(cli.logging.debug_tags(), HashSet::from([tag]));
        }
    }

    #[test]
    fn test_quiet_disables_file_logging() {
        let cli = Cli::try_parse_from(["tokendash", "-q", "notifications"]).unwrap();
        let logger = cli.logging.logger_config();
        assert_eq!(logger.min_level, LogLevel::Error);
        assert!(!logger.file_logging);
        assert!(Cli::try_parse_from(["tokendash", "-q", "-v", "notifications"]).is_err());
    }

    #[test]
    fn test_blacklist_text_keeps_newlines() {
        let cli =
            Cli::try_parse_from(["tokendash", "blacklist", "--coins", "A\nB\nC"]).unwrap();
        match cli.command {
            Command::Blacklist { coins, devs } => {
                assert_eq!(coins.as_deref(), Some("A\nB\nC"));
                assert!(devs.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
