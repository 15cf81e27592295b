//! Durable prediction records
//!
//! Append-only SQLite store: one row per scored request, addressed by an
//! auto-incrementing identifier. Each call opens its own connection, so
//! concurrent writers serialize at SQLite's transaction granularity and no
//! application-level locking is needed. Records are never updated or
//! deleted.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::validate::ScreeningInput;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS predictions (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  created_at TEXT NOT NULL,
  input_json TEXT NOT NULL,
  prob REAL NOT NULL,
  result INTEGER NOT NULL CHECK (result IN (0, 1))
)";

/// One scored request as persisted: input snapshot, probability and the
/// thresholded result (0/1), stamped with UTC creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
  pub id: i64,
  pub created_at: String,
  pub input: ScreeningInput,
  pub prob: f64,
  pub result: i64,
}

#[derive(Debug, Clone)]
pub struct RecordStore {
  db_path: PathBuf,
}

impl RecordStore {
  /// Open the store at `db_path`, creating the schema if needed.
  pub fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
    let store = Self { db_path: db_path.into() };

    if let Some(parent) = store.db_path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
          .with_context(|| format!("failed to create store directory {}", parent.display()))?;
      }
    }

    let conn = store.connect()?;
    conn.execute(SCHEMA, [])?;

    Ok(store)
  }

  pub fn db_path(&self) -> &std::path::Path {
    &self.db_path
  }

  /// Persist one scored request. The insert commits before the identifier is
  /// returned, so a returned id is always readable - including after a
  /// process restart against the same path.
  pub fn create(&self, input: &ScreeningInput, prob: f64, result: bool) -> Result<i64> {
    let conn = self.connect()?;

    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let input_json = serde_json::to_string(input)?;

    conn.execute(
      "INSERT INTO predictions (created_at, input_json, prob, result) VALUES (?1, ?2, ?3, ?4)",
      params![created_at, input_json, prob, i64::from(result)],
    )?;

    let id = conn.last_insert_rowid();
    debug!(id, prob, result, "prediction record stored");

    Ok(id)
  }

  /// Point lookup by identifier. `None` when no such record exists.
  pub fn get(&self, id: i64) -> Result<Option<PredictionRecord>> {
    let conn = self.connect()?;

    let row = conn
      .query_row(
        "SELECT id, created_at, input_json, prob, result FROM predictions WHERE id = ?1",
        params![id],
        |row| {
          Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, f64>(3)?,
            row.get::<_, i64>(4)?,
          ))
        },
      )
      .optional()?;

    match row {
      Some((id, created_at, input_json, prob, result)) => {
        let input = serde_json::from_str(&input_json)
          .with_context(|| format!("corrupt input snapshot for record {id}"))?;
        Ok(Some(PredictionRecord { id, created_at, input, prob, result }))
      }
      None => Ok(None),
    }
  }

  fn connect(&self) -> Result<Connection> {
    Connection::open(&self.db_path)
      .with_context(|| format!("failed to open prediction store at {}", self.db_path.display()))
  }
}
