// Token database persistence module.
use crate::errors::StoreError;
use crate::logger::{self, LogTag};
use crate::tokens::types::TokenRecord;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};
use std::path::Path;

// =============================================================================
// TOKEN DATABASE (SQLite)
// =============================================================================

/// Table layout shared with databases created by earlier versions of the dashboard
const CREATE_TOKENS_TABLE: &str = "CREATE TABLE IF NOT EXISTS tokens (
    id TEXT PRIMARY KEY,
    name TEXT,
    symbol TEXT,
    price_usd REAL,
    market_cap REAL,
    liquidity REAL,
    volume_24h REAL,
    is_cex_listed INTEGER,
    is_tier1 INTEGER,
    is_rugged INTEGER,
    is_pumped INTEGER,
    dev_address TEXT,
    is_fake_volume INTEGER,
    is_bundled_supply INTEGER,
    rugcheck_status TEXT,
    timestamp DATETIME
)";

const TOKEN_COLUMNS: &str = "id, name, symbol, price_usd, market_cap, liquidity, volume_24h, \
    is_cex_listed, is_tier1, is_rugged, is_pumped, dev_address, is_fake_volume, \
    is_bundled_supply, rugcheck_status, timestamp";

fn table_exists(connection: &Connection, table: &str) -> rusqlite::Result<bool> {
    let mut stmt =
        connection.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name = ?1")?;
    let mut rows = stmt.query([table])?;
    let row = rows.next()?;
    Ok(row.is_some())
}

/// Configure database connection for interactive single-user access
fn configure_database_connection(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.pragma_update(None, "temp_store", "memory")?;
    connection.busy_timeout(std::time::Duration::from_millis(5_000))?;
    Ok(())
}

/// SQLite store holding the latest snapshot and risk flags per token
///
/// The connection is opened per dashboard invocation and never pooled.
pub struct TokenDatabase {
    connection: Connection,
}

impl TokenDatabase {
    /// Open the database file and create the `tokens` table if it is absent
    ///
    /// Safe to call repeatedly against the same file.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(|e| StoreError::Open {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        configure_database_connection(&connection)?;

        let existed = table_exists(&connection, "tokens")?;
        connection.execute(CREATE_TOKENS_TABLE, [])?;

        if existed {
            logger::debug(
                LogTag::Database,
                &format!("Opened token database {}", path.display()),
            );
        } else {
            logger::info(
                LogTag::Database,
                &format!("Created tokens table in {}", path.display()),
            );
        }

        Ok(Self { connection })
    }

    /// Every row, in insertion order, with no filtering or pagination
    pub fn read_all(&self) -> Result<Vec<TokenRecord>, StoreError> {
        let sql = format!("SELECT {} FROM tokens ORDER BY rowid", TOKEN_COLUMNS);
        let mut stmt = self.connection.prepare(&sql)?;
        let records = stmt
            .query_map([], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        logger::debug(
            LogTag::Database,
            &format!("Read {} token rows", records.len()),
        );
        Ok(records)
    }

    /// Insert a row, or overwrite every column of the row with the same id
    pub fn upsert(&self, record: &TokenRecord) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO tokens ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                symbol = excluded.symbol,
                price_usd = excluded.price_usd,
                market_cap = excluded.market_cap,
                liquidity = excluded.liquidity,
                volume_24h = excluded.volume_24h,
                is_cex_listed = excluded.is_cex_listed,
                is_tier1 = excluded.is_tier1,
                is_rugged = excluded.is_rugged,
                is_pumped = excluded.is_pumped,
                dev_address = excluded.dev_address,
                is_fake_volume = excluded.is_fake_volume,
                is_bundled_supply = excluded.is_bundled_supply,
                rugcheck_status = excluded.rugcheck_status,
                timestamp = excluded.timestamp",
            TOKEN_COLUMNS
        );

        self.connection.execute(
            &sql,
            params![
                record.id,
                record.name,
                record.symbol,
                record.price_usd,
                record.market_cap,
                record.liquidity,
                record.volume_24h,
                record.is_cex_listed,
                record.is_tier1,
                record.is_rugged,
                record.is_pumped,
                record.dev_address,
                record.is_fake_volume,
                record.is_bundled_supply,
                record.rugcheck_status,
                record.timestamp.map(|t| t.to_rfc3339()),
            ],
        )?;

        logger::debug(LogTag::Database, &format!("Upserted token {}", record.id));
        Ok(())
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .connection
            .query_row("SELECT COUNT(*) FROM tokens", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Decode one row without trusting the column types
///
/// SQLite only applies affinity, so rows written by other tools can hold text
/// in numeric columns or a NULL id. Values that do not convert read as `None`
/// instead of failing the whole read.
fn record_from_row(row: &Row<'_>) -> rusqlite::Result<TokenRecord> {
    let column = |index: usize| row.get::<_, Value>(index);

    let id = match text_value(column(0)?) {
        Some(id) => id,
        None => {
            logger::warning(
                LogTag::Database,
                "Row without id in tokens table, shown with an empty id",
            );
            String::new()
        }
    };

    Ok(TokenRecord {
        id,
        name: text_value(column(1)?),
        symbol: text_value(column(2)?),
        price_usd: real_value(column(3)?),
        market_cap: real_value(column(4)?),
        liquidity: real_value(column(5)?),
        volume_24h: real_value(column(6)?),
        is_cex_listed: flag_value(column(7)?),
        is_tier1: flag_value(column(8)?),
        is_rugged: flag_value(column(9)?),
        is_pumped: flag_value(column(10)?),
        dev_address: text_value(column(11)?),
        is_fake_volume: flag_value(column(12)?),
        is_bundled_supply: flag_value(column(13)?),
        rugcheck_status: text_value(column(14)?),
        timestamp: parse_timestamp(column(15)?),
    })
}

fn text_value(value: Value) -> Option<String> {
    match value {
        Value::Text(text) => Some(text),
        Value::Integer(number) => Some(number.to_string()),
        Value::Real(number) => Some(number.to_string()),
        Value::Null | Value::Blob(_) => None,
    }
}

fn real_value(value: Value) -> Option<f64> {
    match value {
        Value::Real(number) => Some(number),
        Value::Integer(number) => Some(number as f64),
        Value::Text(text) => text.trim().parse::<f64>().ok(),
        Value::Null | Value::Blob(_) => None,
    }
}

fn flag_value(value: Value) -> Option<bool> {
    match value {
        Value::Integer(number) => Some(number != 0),
        Value::Real(number) => Some(number != 0.0),
        Value::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Some(true),
            "0" | "false" | "no" => Some(false),
            _ => None,
        },
        Value::Null | Value::Blob(_) => None,
    }
}

/// Interpret the `timestamp` column, whatever form an earlier writer used
///
/// Accepts RFC 3339 text, `YYYY-MM-DD HH:MM:SS[.f]` text (taken as UTC) and
/// integer unix seconds. Anything else reads as `None`.
fn parse_timestamp(value: Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Text(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(&text) {
                return Some(parsed.with_timezone(&Utc));
            }
            ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(&text, format).ok())
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        Value::Integer(seconds) => Utc.timestamp_opt(seconds, 0).single(),
        Value::Real(seconds) => Utc.timestamp_opt(seconds as i64, 0).single(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(id: &str) -> TokenRecord {
        TokenRecord {
            id: id.to_string(),
            name: Some("Token".to_string()),
            symbol: Some("TKN".to_string()),
            price_usd: Some(0.5),
            market_cap: Some(120_000.0),
            liquidity: Some(40_000.0),
            volume_24h: Some(9_000.0),
            is_cex_listed: Some(false),
            is_tier1: Some(false),
            is_rugged: Some(false),
            is_pumped: Some(true),
            dev_address: Some("DEV1".to_string()),
            is_fake_volume: None,
            is_bundled_supply: None,
            rugcheck_status: Some("Good".to_string()),
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).single(),
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.db");

        let first = TokenDatabase::init(&path).unwrap();
        first.upsert(&sample_record("T1")).unwrap();
        drop(first);

        let second = TokenDatabase::init(&path).unwrap();
        assert_eq!(second.count().unwrap(), 1);

        let tables: i64 = second
            .connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='tokens'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 1);
    }

    #[test]
    fn test_empty_database_reads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let db = TokenDatabase::init(dir.path().join("tokens.db")).unwrap();
        assert!(db.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db = TokenDatabase::init(dir.path().join("tokens.db")).unwrap();

        let record = sample_record("T1");
        db.upsert(&record).unwrap();

        assert_eq!(db.read_all().unwrap(), vec![record]);
    }

    #[test]
    fn test_upsert_overwrites_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let db = TokenDatabase::init(dir.path().join("tokens.db")).unwrap();

        db.upsert(&sample_record("T1")).unwrap();
        db.upsert(&sample_record("T2")).unwrap();

        let mut updated = sample_record("T1");
        updated.price_usd = Some(0.75);
        updated.is_rugged = Some(true);
        updated.rugcheck_status = None;
        db.upsert(&updated).unwrap();

        let rows = db.read_all().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], updated);
        assert_eq!(rows[1].id, "T2");
    }

    #[test]
    fn test_reads_rows_written_by_other_writers() {
        let dir = tempfile::tempdir().unwrap();
        let db = TokenDatabase::init(dir.path().join("tokens.db")).unwrap();

        db.connection
            .execute(
                "INSERT INTO tokens (id, is_rugged, timestamp) VALUES ('LEGACY', 1, '2024-05-01 12:30:00.123456')",
                [],
            )
            .unwrap();
        db.connection
            .execute("INSERT INTO tokens (id, timestamp) VALUES ('EPOCH', 1700000000)", [])
            .unwrap();

        let rows = db.read_all().unwrap();
        assert_eq!(rows[0].id, "LEGACY");
        assert_eq!(rows[0].is_rugged, Some(true));
        assert_eq!(
            rows[0].timestamp.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
            Some("2024-05-01 12:30:00".to_string())
        );
        assert!(rows[0].name.is_none());
        assert_eq!(rows[1].timestamp, Utc.timestamp_opt(1_700_000_000, 0).single());
    }

    #[test]
    fn test_mistyped_values_do_not_hide_other_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db = TokenDatabase::init(dir.path().join("tokens.db")).unwrap();

        db.upsert(&sample_record("GOOD")).unwrap();
        db.connection
            .execute(
                "INSERT INTO tokens (id, is_rugged, is_tier1) VALUES ('TEXTFLAG', 'yes', 'maybe')",
                [],
            )
            .unwrap();
        db.connection
            .execute("INSERT INTO tokens (id, price_usd) VALUES ('P', '$0.5')", [])
            .unwrap();
        db.connection
            .execute("INSERT INTO tokens (name) VALUES ('no id')", [])
            .unwrap();

        let rows = db.read_all().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], sample_record("GOOD"));

        assert_eq!(rows[1].id, "TEXTFLAG");
        assert_eq!(rows[1].is_rugged, Some(true));
        assert_eq!(rows[1].is_tier1, None);

        assert_eq!(rows[2].id, "P");
        assert_eq!(rows[2].price_usd, None);

        assert_eq!(rows[3].id, "");
        assert_eq!(rows[3].name.as_deref(), Some("no id"));
    }
}
