//! SQLite review store
//!
//! One row per card in `review_state`, keyed by card id, plus an `app_state`
//! key/value table holding the study streak.

use super::ReviewStore;
use crate::error::{Result, StudyError};
use crate::models::{ReviewState, StudyStreak};
use log::info;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

const STREAK_KEY: &str = "study_streak";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and its tables.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StudyError::StorageUnavailable(format!("{}: {}", parent.display(), e))
            })?;
        }
        let conn = Connection::open(path)?;
        info!("Opened review database at {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        // Review state for the SM-2 algorithm; dates are stored as YYYY-MM-DD
        conn.execute(
            "CREATE TABLE IF NOT EXISTS review_state (
                card_id TEXT PRIMARY KEY,
                ease_factor REAL NOT NULL DEFAULT 2.5,
                interval_days INTEGER NOT NULL DEFAULT 0,
                repetitions INTEGER NOT NULL DEFAULT 0,
                next_review_date TEXT NOT NULL
            )",
            (),
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;

        Ok(Self { conn })
    }
}

fn state_from_row(row: &Row<'_>) -> rusqlite::Result<ReviewState> {
    Ok(ReviewState {
        card_id: row.get(0)?,
        ease_factor: row.get(1)?,
        interval: row.get(2)?,
        repetitions: row.get(3)?,
        next_review_date: row.get(4)?,
    })
}

fn upsert_state(conn: &Connection, state: &ReviewState) -> Result<()> {
    conn.execute(
        "INSERT INTO review_state
            (card_id, ease_factor, interval_days, repetitions, next_review_date)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(card_id) DO UPDATE SET
            ease_factor = excluded.ease_factor,
            interval_days = excluded.interval_days,
            repetitions = excluded.repetitions,
            next_review_date = excluded.next_review_date",
        params![
            state.card_id,
            state.ease_factor,
            state.interval,
            state.repetitions,
            state.next_review_date
        ],
    )?;
    Ok(())
}

fn write_streak(conn: &Connection, streak: &StudyStreak) -> Result<()> {
    let value = serde_json::to_string(streak)
        .map_err(|e| StudyError::StorageUnavailable(e.to_string()))?;
    conn.execute(
        "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
        params![STREAK_KEY, value],
    )?;
    Ok(())
}

impl ReviewStore for SqliteStore {
    fn load(&self, card_id: &str) -> Result<Option<ReviewState>> {
        let state = self
            .conn
            .query_row(
                "SELECT card_id, ease_factor, interval_days, repetitions, next_review_date
                 FROM review_state WHERE card_id = ?1",
                params![card_id],
                state_from_row,
            )
            .optional()?;
        Ok(state)
    }

    fn save(&mut self, state: &ReviewState) -> Result<()> {
        upsert_state(&self.conn, state)
    }

    fn load_all(&self) -> Result<Vec<ReviewState>> {
        let mut stmt = self.conn.prepare(
            "SELECT card_id, ease_factor, interval_days, repetitions, next_review_date
             FROM review_state ORDER BY card_id",
        )?;
        let states = stmt
            .query_map([], state_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(states)
    }

    fn load_streak(&self) -> Result<Option<StudyStreak>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![STREAK_KEY],
                |row| row.get(0),
            )
            .optional()?;

        raw.map(|value| {
            serde_json::from_str(&value)
                .map_err(|e| StudyError::StorageUnavailable(format!("corrupt streak record: {e}")))
        })
        .transpose()
    }

    fn save_streak(&mut self, streak: &StudyStreak) -> Result<()> {
        write_streak(&self.conn, streak)
    }

    /// Both writes land in one transaction, or neither does.
    fn save_review(&mut self, state: &ReviewState, streak: Option<&StudyStreak>) -> Result<()> {
        let tx = self.conn.transaction()?;
        upsert_state(&tx, state)?;
        if let Some(streak) = streak {
            write_streak(&tx, streak)?;
        }
        tx.commit()?;
        Ok(())
    }
}
