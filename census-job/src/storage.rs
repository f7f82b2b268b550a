//! Helper structures for persisting summaries into SQLite.

use anyhow::{anyhow, Error};
use rusqlite::{params, Connection};
use tracing::debug;

use common::Summary;

use crate::config::StorageConfig;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS census_data (
    occupation TEXT NOT NULL,
    min_income INTEGER NOT NULL,
    max_income INTEGER NOT NULL,
    min_family_size INTEGER NOT NULL,
    max_family_size INTEGER NOT NULL
)";

/// A handle to the summary table.
///
/// Owns the connection for the duration of one run; dropping the client
/// closes it. Summaries from every aggregation task funnel through a
/// single client, so the connection is never shared across writers.
pub struct Client {
    conn: Connection,
}

impl Client {
    /// Open the database described by the given config and make sure the
    /// summary table exists.
    pub fn from_conf(cfg: &StorageConfig) -> Result<Self, Error> {
        let conn = Connection::open(&cfg.path)
            .map_err(|e| anyhow!("unable to open database `{}`: {}", cfg.path, e))?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, Error> {
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    /// Insert one summary row. Rows append across runs; nothing here
    /// dedupes earlier output for the same occupation.
    pub fn insert_summary(&self, summary: &Summary) -> Result<(), Error> {
        self.conn
            .execute(
                "INSERT INTO census_data (occupation, min_income, max_income, min_family_size, max_family_size) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    summary.occupation,
                    summary.min_income,
                    summary.max_income,
                    summary.min_family_size,
                    summary.max_family_size
                ],
            )
            .map_err(|e| anyhow!("failed to insert summary for `{}`: {}", summary.occupation, e))?;

        debug!("persisted summary for `{}`", summary.occupation);
        Ok(())
    }

    /// Count rows currently in the summary table.
    pub fn count_rows(&self) -> Result<i64, Error> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM census_data", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Read back every summary row, ordered by occupation.
    pub fn all_summaries(&self) -> Result<Vec<Summary>, Error> {
        let mut stmt = self.conn.prepare(
            "SELECT occupation, min_income, max_income, min_family_size, max_family_size \
             FROM census_data ORDER BY occupation",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Summary {
                occupation: row.get(0)?,
                min_income: row.get(1)?,
                max_income: row.get(2)?,
                min_family_size: row.get(3)?,
                max_family_size: row.get(4)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
