/// Terminal rendering of dashboard outcomes
///
/// `format_*` functions build plain strings; the `print_*` wrappers add color
/// and write to stdout. Logs go to stderr, so stdout carries only results.
use crate::config::Config;
use crate::dashboard::{FetchOutcome, TradeOutcome};
use crate::tokens::{screen_record, ScreeningReport, Snapshot, TokenRecord};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

const MISSING: &str = "N/A";

fn dollars<T: ToString>(value: Option<T>) -> String {
    match value {
        Some(v) => format!("${}", v.to_string()),
        None => MISSING.to_string(),
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| v.to_string())
}

fn flag(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

// =============================================================================
// FETCH
// =============================================================================

pub fn format_snapshot(snapshot: &Snapshot) -> String {
    format!(
        "Token: {} ({})\nPrice (USD): {}\nMarket Cap: {}\nLiquidity: {}\n---",
        snapshot.name,
        snapshot.symbol,
        dollars(snapshot.price_usd.as_deref()),
        dollars(snapshot.market_cap),
        dollars(snapshot.liquidity_usd),
    )
}

pub fn format_screening(report: &ScreeningReport) -> String {
    if report.passes() {
        "Screening: passed".to_string()
    } else {
        format!("Screening: flagged ({})", report.reasons().join(", "))
    }
}

pub fn print_fetch_outcomes(outcomes: &[FetchOutcome]) {
    for outcome in outcomes {
        match outcome {
            FetchOutcome::Fetched {
                snapshot,
                screening,
            } => {
                let verdict = format_screening(screening);
                if screening.passes() {
                    println!("{}", verdict.green());
                } else {
                    println!("{}", verdict.yellow());
                }
                println!("{}", format_snapshot(snapshot));
            }
            FetchOutcome::Failed(e) => println!("{}", e.user_message().red()),
        }
    }
}

// =============================================================================
// TRADE
// =============================================================================

pub fn format_trade_outcome(outcome: &TradeOutcome) -> Vec<String> {
    let intent = &outcome.intent;
    if !outcome.executed {
        return vec![format!(
            "Failed to execute {} for token {}.",
            intent.action, intent.token_address
        )];
    }

    let mut lines = vec![format!(
        "Successfully executed {} for token {}.",
        intent.action, intent.token_address
    )];
    if let Some(Err(_)) = outcome.notification {
        lines.push("Failed to send Telegram notification.".to_string());
    }
    lines
}

pub fn print_trade_outcome(outcome: &TradeOutcome) {
    for (index, line) in format_trade_outcome(outcome).iter().enumerate() {
        if index == 0 && outcome.executed {
            println!("{}", line.green());
        } else {
            println!("{}", line.red());
        }
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

pub fn format_notifications(entries: &[String]) -> String {
    let mut out = String::from("Latest Notifications:");
    for entry in entries {
        out.push_str("\n- ");
        out.push_str(entry);
    }
    out
}

// =============================================================================
// DATABASE
// =============================================================================

/// Verdict plus the risk flags the row itself raises
fn screening_cell(record: &TokenRecord, screening: &ScreeningReport) -> String {
    let verdict = if screening.passes() {
        "ok".to_string()
    } else {
        screening.reasons().join("; ")
    };
    let flags = record.raised_flags();
    if flags.is_empty() {
        verdict
    } else {
        format!("{} | flags: {}", verdict, flags.join(", "))
    }
}

pub fn format_database_table(records: &[TokenRecord], config: &Config) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header([
        "ID",
        "Name",
        "Symbol",
        "Price (USD)",
        "Market Cap",
        "Liquidity",
        "Volume 24h",
        "CEX",
        "Tier 1",
        "Rugged",
        "Pumped",
        "Dev",
        "Fake Vol",
        "Bundled",
        "Rugcheck",
        "Timestamp",
        "Screening",
    ]);

    for record in records {
        let screening = screen_record(record, config);
        table.add_row(vec![
            record.id.clone(),
            optional(record.name.as_deref()),
            optional(record.symbol.as_deref()),
            optional(record.price_usd),
            optional(record.market_cap),
            optional(record.liquidity),
            optional(record.volume_24h),
            flag(record.is_cex_listed).to_string(),
            flag(record.is_tier1).to_string(),
            flag(record.is_rugged).to_string(),
            flag(record.is_pumped).to_string(),
            optional(record.dev_address.as_deref()),
            flag(record.is_fake_volume).to_string(),
            flag(record.is_bundled_supply).to_string(),
            optional(record.rugcheck_status.as_deref()),
            optional(record.timestamp.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())),
            screening_cell(record, &screening),
        ]);
    }

    table.to_string()
}

pub fn print_database(records: &[TokenRecord], config: &Config) {
    if records.is_empty() {
        println!("{}", "No tokens stored yet.".dimmed());
        return;
    }
    println!("{}", format_database_table(records, config));
    println!("{}", format!("{} rows", records.len()).dimmed());
}
