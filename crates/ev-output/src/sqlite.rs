//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `agent_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

pub const DB_FILE: &str = "output.db";

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DB_FILE))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 tick           INTEGER NOT NULL,
                 unix_time_secs INTEGER NOT NULL,
                 agent_id       INTEGER NOT NULL,
                 activity       TEXT    NOT NULL,
                 status         TEXT    NOT NULL,
                 location       TEXT    NOT NULL,
                 place          TEXT,
                 charge_pct     REAL    NOT NULL,
                 recharged_kwh  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick              INTEGER PRIMARY KEY,
                 unix_time_secs    INTEGER NOT NULL,
                 idle              INTEGER NOT NULL,
                 driving           INTEGER NOT NULL,
                 recharging        INTEGER NOT NULL,
                 stranded          INTEGER NOT NULL,
                 energy_kwh        REAL    NOT NULL,
                 charging_power_kw REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (tick, unix_time_secs, agent_id, activity, status, location, place, \
                  charge_pct, recharged_kwh) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                // En-route agents have no place.
                let place = (!row.place.is_empty()).then_some(row.place.as_str());
                stmt.execute(rusqlite::params![
                    row.tick,
                    row.unix_time_secs,
                    row.agent_id,
                    row.activity,
                    row.status,
                    row.location,
                    place,
                    row.charge_pct,
                    row.recharged_kwh,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, unix_time_secs, idle, driving, recharging, stranded, energy_kwh, \
              charging_power_kw) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.tick,
                row.unix_time_secs,
                row.idle,
                row.driving,
                row.recharging,
                row.stranded,
                row.energy_kwh,
                row.charging_power_kw,
            ],
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
