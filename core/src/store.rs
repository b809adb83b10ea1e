use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const GAMIFICATION_KEY: &str = "fitfeast_gamification";
pub const WELLNESS_KEY: &str = "fitfeast_wellness";
pub const SAVED_RECIPES_KEY: &str = "fitfeast_saved_recipes";
pub const SAVED_WORKOUTS_KEY: &str = "fitfeast_saved_workouts";

/// Current envelope version written by [`set`].
pub const SCHEMA_VERSION: u32 = 1;

/// Raw string-keyed persistence. Values are JSON documents.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    data: serde_json::Value,
}

/// Outcome of reading one key.
#[derive(Debug, PartialEq)]
pub enum Loaded<T> {
    Found(T),
    Missing,
    /// Something is stored but could not be used: a read error, bad JSON, or
    /// a newer schema version.
    Unusable,
}

/// Load `key`. Problems are logged; the caller decides the fallback.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Loaded<T> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Loaded::Missing,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored value, using default");
            return Loaded::Unusable;
        }
    };

    match decode(&raw) {
        Ok(Some(value)) => Loaded::Found(value),
        Ok(None) => {
            tracing::warn!(key, "stored value has a newer schema version, using default");
            Loaded::Unusable
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to parse stored value, using default");
            Loaded::Unusable
        }
    }
}

/// Load `key`, falling back to `default` when nothing is stored or the stored
/// value cannot be decoded. Never fails.
pub fn get_or_default<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match load(store, key) {
        Loaded::Found(value) => value,
        Loaded::Missing | Loaded::Unusable => default,
    }
}

/// Decode a stored document. Bare documents without an envelope are legacy
/// version 0 and are read as-is. `Ok(None)` means the version is unknown.
fn decode<T: DeserializeOwned>(raw: &str) -> Result<Option<T>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let is_envelope = value
        .as_object()
        .is_some_and(|o| o.len() == 2 && o.contains_key("version") && o.contains_key("data"));

    if !is_envelope {
        return Ok(Some(serde_json::from_value(value)?));
    }

    let envelope: Envelope = serde_json::from_value(value)?;
    if envelope.version > SCHEMA_VERSION {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(envelope.data)?))
}

/// Persist `value` under `key`. Failures are logged and swallowed; the
/// caller's in-memory value stays authoritative until the next write.
pub fn set<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let envelope = EnvelopeRef {
        version: SCHEMA_VERSION,
        data: value,
    };
    let json = match serde_json::to_string(&envelope) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to serialize value");
            return;
        }
    };
    if let Err(e) = store.write(key, &json) {
        tracing::warn!(key, error = %e, "failed to persist value");
    } else {
        tracing::debug!(key, bytes = json.len(), "persisted value");
    }
}

// --- SQLite backend ---

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let store = SqliteStore { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = SqliteStore { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            self.conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );

                PRAGMA user_version = 1;",
            )?;
        }

        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(rows > 0)
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv_store WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }
}

// --- In-memory backend ---

#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.insert_raw(key, value);
        Ok(())
    }
}
