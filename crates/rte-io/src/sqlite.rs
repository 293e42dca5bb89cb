//! SQLite output backend (feature `sqlite`).
//!
//! Writes a `route_results` table whose columns match the CSV backend,
//! unit suffixes included.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::ResultWriter;
use crate::{IoResult, ResultRow, Units};

/// Writes route results to an SQLite database.
pub struct SqliteResultWriter {
    conn:     Connection,
    insert:   String,
    finished: bool,
}

impl SqliteResultWriter {
    /// Open (or create) the database at `path` and initialise the schema.
    ///
    /// An existing `route_results` table is dropped first so each run starts
    /// from an empty table.
    pub fn new(path: &Path, units: Units) -> IoResult<Self> {
        let conn = Connection::open(path)?;
        let [o, d, routable, sd, ft, spt, fpd, failure] = units.headers();

        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS route_results;
             CREATE TABLE route_results (
                 {o}        TEXT    NOT NULL,
                 {d}        TEXT    NOT NULL,
                 {routable} INTEGER NOT NULL,
                 {sd}       REAL,
                 {ft}       REAL,
                 {spt}      REAL,
                 {fpd}      REAL,
                 {failure}  TEXT
             );"
        ))?;

        let insert = format!(
            "INSERT INTO route_results ({o}, {d}, {routable}, {sd}, {ft}, {spt}, {fpd}, {failure}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        );

        Ok(Self { conn, insert, finished: false })
    }
}

impl ResultWriter for SqliteResultWriter {
    fn write_rows(&mut self, rows: &[ResultRow]) -> IoResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(&self.insert)?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.origin_id,
                    row.destination_id,
                    row.routable as i64,
                    row.shortest_distance,
                    row.fastest_time,
                    row.shortest_path_time,
                    row.fastest_path_distance,
                    row.failure,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
