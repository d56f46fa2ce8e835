use std::fmt;
use std::path::Path;

use board_core::unix_millis;
use contracts::{AppState, STORAGE_KEY};
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug)]
pub enum PersistenceError {
    Sqlite(rusqlite::Error),
    Serde(serde_json::Error),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::Serde(err) => write!(f, "serde error: {err}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Single-row key/value store holding the serialized [`AppState`]
/// under [`STORAGE_KEY`] — the durable-local-storage analog. Each save
/// overwrites the prior payload wholesale.
#[derive(Debug)]
pub struct SqliteStateStore {
    conn: Connection,
}

impl SqliteStateStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.configure()?;
        store.migrate()?;
        Ok(store)
    }

    pub fn save_state(&self, state: &AppState) -> Result<(), PersistenceError> {
        let payload_json = serde_json::to_string(state)?;
        self.conn.execute(
            "INSERT INTO app_state (storage_key, payload_json, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(storage_key) DO UPDATE SET
                payload_json = excluded.payload_json,
                updated_at = excluded.updated_at",
            params![STORAGE_KEY, payload_json, millis_stamp()],
        )?;
        Ok(())
    }

    /// `Ok(None)` when nothing has been stored yet. A stored payload
    /// that fails to parse surfaces as `Serde`; the facade treats that
    /// as a recoverable discard-and-default condition.
    pub fn load_state(&self) -> Result<Option<AppState>, PersistenceError> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload_json FROM app_state WHERE storage_key = ?1",
                params![STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(raw) => Ok(Some(serde_json::from_str::<AppState>(&raw)?)),
            None => Ok(None),
        }
    }

    /// Remove the stored entry entirely, not overwrite it with a default.
    pub fn delete_state(&self) -> Result<(), PersistenceError> {
        self.conn.execute(
            "DELETE FROM app_state WHERE storage_key = ?1",
            params![STORAGE_KEY],
        )?;
        Ok(())
    }

    fn configure(&mut self) -> Result<(), PersistenceError> {
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(())
    }

    fn migrate(&mut self) -> Result<(), PersistenceError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS app_state (
                storage_key TEXT PRIMARY KEY,
                payload_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        self.conn.execute(
            "INSERT OR IGNORE INTO schema_migrations(version, name, applied_at)
             VALUES(1, 'initial_v1', ?1)",
            params![millis_stamp()],
        )?;

        Ok(())
    }
}

fn millis_stamp() -> String {
    format!("ms-{:013}", unix_millis())
}
