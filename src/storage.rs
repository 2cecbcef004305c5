use crate::errors::StoreError;
use crate::models::TimeEntry;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::{path::Path, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS hours (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    date       TEXT NOT NULL,
    hours      REAL NOT NULL CHECK (hours > 0),
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_hours_date ON hours (date);
";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Handle to the `hours` table. Clones share one connection.
#[derive(Clone)]
pub struct HoursStore {
    conn: Arc<Mutex<Connection>>,
}

impl HoursStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// All entries, newest date first, then newest creation first.
    pub async fn list(&self) -> Result<Vec<TimeEntry>, StoreError> {
        let conn = self.conn.lock().await;
        select_all(&conn)
    }

    /// Inserts a new entry and returns the id the database assigned to it.
    pub async fn insert(&self, date: NaiveDate, hours: f64) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO hours (date, hours) VALUES (?1, ?2)",
            params![date.format(DATE_FORMAT).to_string(), hours],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, %date, hours, "inserted entry");
        Ok(id)
    }

    /// Removes the entry if present. Unknown ids are not an error.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        let removed = conn.execute("DELETE FROM hours WHERE id = ?1", params![id])?;
        debug!(id, removed, "deleted entry");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) async fn drop_table(&self) {
        let conn = self.conn.lock().await;
        conn.execute_batch("DROP TABLE hours").unwrap();
    }
}

fn select_all(conn: &Connection) -> Result<Vec<TimeEntry>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, date, hours, created_at FROM hours
         ORDER BY date DESC, created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map([], raw_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(parse_row(row?)?);
    }
    Ok(out)
}

type RawRow = (i64, String, f64, String);

fn raw_row(row: &Row) -> rusqlite::Result<RawRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn parse_row((id, date, hours, created_at): RawRow) -> Result<TimeEntry, StoreError> {
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
        .map_err(|_| StoreError::Corrupt(format!("entry {id} has invalid date {date:?}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| {
            StoreError::Corrupt(format!("entry {id} has invalid created_at {created_at:?}"))
        })?;

    Ok(TimeEntry {
        id,
        date,
        hours,
        created_at,
    })
}
