// Subcommand dispatch: load config, build the dashboard, run one action

use crate::{
    apis::TradeIntent,
    cli::{Cli, Command},
    config::load_config,
    dashboard::{identifiers_from_text, render, Dashboard},
    logger::{self, LogTag},
};
use anyhow::{bail, Context};
use std::path::Path;

/// Run the parsed command line to completion
///
/// A config that cannot be loaded is fatal. Per-token and per-call failures
/// are rendered inline and do not fail the process.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    logger::info(
        LogTag::Config,
        &format!("Loaded configuration from {}", cli.config.display()),
    );

    let mut dashboard = Dashboard::from_config(config, cli.config.clone())?;

    match cli.command {
        Command::Blacklist { coins, devs } => {
            if coins.is_none() && devs.is_none() {
                let blacklist = &dashboard.config().blacklist;
                println!("Coin Blacklist:\n{}", blacklist.coins.join("\n"));
                println!("Dev Blacklist:\n{}", blacklist.devs.join("\n"));
                return Ok(());
            }

            let coins = coins.unwrap_or_else(|| dashboard.config().blacklist.coins.join("\n"));
            let devs = devs.unwrap_or_else(|| dashboard.config().blacklist.devs.join("\n"));
            dashboard
                .update_blacklists(&coins, &devs)
                .context("Failed to update blacklists")?;
            println!("Blacklists updated!");
        }

        Command::Fetch {
            mut identifiers,
            file,
            store,
            watch,
        } => {
            if let Some(file) = file {
                identifiers.extend(read_identifiers(&file)?);
            }
            if identifiers.is_empty() {
                bail!("No token identifiers given; pass them as arguments or with --file");
            }

            let database = if store {
                Some(dashboard.open_database()?)
            } else {
                None
            };

            if watch {
                dashboard
                    .watch(
                        &identifiers,
                        database.as_ref(),
                        async {
                            if let Err(e) = tokio::signal::ctrl_c().await {
                                logger::error(
                                    LogTag::System,
                                    &format!("Failed to listen for Ctrl+C: {}", e),
                                );
                            }
                        },
                        |round, outcomes| {
                            println!("=== Round {} ===", round);
                            render::print_fetch_outcomes(outcomes);
                        },
                    )
                    .await?;
            } else {
                let outcomes = dashboard.fetch_tokens(&identifiers).await;
                if let Some(database) = &database {
                    dashboard.archive_snapshots(database, &outcomes)?;
                }
                render::print_fetch_outcomes(&outcomes);
            }
        }

        Command::Trade {
            token_address,
            action,
        } => {
            let outcome = dashboard
                .execute_trade(TradeIntent::new(token_address, action))
                .await;
            render::print_trade_outcome(&outcome);
        }

        Command::Notifications => {
            println!(
                "{}",
                render::format_notifications(&dashboard.view_notifications())
            );
        }

        Command::Database => {
            let database = dashboard.open_database()?;
            let records = dashboard.view_database(&database)?;
            render::print_database(&records, dashboard.config());
        }
    }

    Ok(())
}

fn read_identifiers(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read identifiers from {}", path.display()))?;
    let text = text.strip_suffix('\n').unwrap_or(&text);
    Ok(identifiers_from_text(text))
}
