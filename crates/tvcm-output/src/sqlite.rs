//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `positions`, `contacts` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{ContactRow, OutputResult, PositionRow, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS positions (
                 tick      INTEGER NOT NULL,
                 time_secs REAL    NOT NULL,
                 node_id   INTEGER NOT NULL,
                 x         REAL    NOT NULL,
                 y         REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS contacts (
                 tick      INTEGER NOT NULL,
                 time_secs REAL    NOT NULL,
                 node_a    INTEGER NOT NULL,
                 node_b    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick          INTEGER PRIMARY KEY,
                 time_secs     REAL    NOT NULL,
                 contact_count INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO positions (tick, time_secs, node_id, x, y) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.time_secs,
                    row.node_id,
                    row.x,
                    row.y
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_contacts(&mut self, rows: &[ContactRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO contacts (tick, time_secs, node_a, node_b) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.tick, row.time_secs, row.node_a, row.node_b])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, time_secs, contact_count) \
             VALUES (?1, ?2, ?3)",
            rusqlite::params![row.tick, row.time_secs, row.contact_count],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
