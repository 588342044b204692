//! Storage layer for flightlookup.
//!
//! A small `SQLite` database holding string values keyed by `(profile, key)`.
//! Saved flights live here; each profile stands in for one browser's local
//! storage.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::saved::KeyValueStore;

/// `SQLite` storage engine.
#[derive(Debug)]
pub struct Storage {
    path: PathBuf,
    conn: Connection,
}

impl Storage {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get(&self, profile: &str, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE profile = ?1 AND key = ?2",
                params![profile, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn set(&self, profile: &str, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO kv (profile, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT (profile, key) DO UPDATE
            SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![profile, key, value],
        )?;
        debug!(profile, key, "Stored value");
        Ok(())
    }

    /// Delete a value. Returns `true` if something was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, profile: &str, key: &str) -> Result<bool> {
        let affected = self.conn.execute(
            "DELETE FROM kv WHERE profile = ?1 AND key = ?2",
            params![profile, key],
        )?;
        Ok(affected > 0)
    }

    /// Profiles that hold at least one value, most recently written first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn profiles(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT profile FROM kv
            GROUP BY profile
            ORDER BY MAX(updated_at) DESC, profile ASC
            ",
        )?;
        let profiles = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(profiles)
    }

    /// A view of this database restricted to one profile.
    #[must_use]
    pub fn profile<'a>(&'a self, profile: &str) -> ProfileStore<'a> {
        ProfileStore {
            storage: self,
            profile: profile.to_string(),
        }
    }

    /// Database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let (total_values, total_profiles): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COUNT(DISTINCT profile) FROM kv",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let last: Option<String> = self
            .conn
            .query_row("SELECT MAX(updated_at) FROM kv", [], |row| row.get(0))?;
        let last_updated = last
            .and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").ok())
            .map(|naive| naive.and_utc());

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_values,
            total_profiles,
            last_updated,
            db_size_bytes,
        })
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of stored values.
    pub total_values: i64,
    /// Number of profiles with at least one value.
    pub total_profiles: i64,
    /// Time of the most recent write.
    pub last_updated: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

/// One profile's slice of a [`Storage`].
#[derive(Debug)]
pub struct ProfileStore<'a> {
    storage: &'a Storage,
    profile: String,
}

impl ProfileStore<'_> {
    /// The profile name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile
    }
}

impl KeyValueStore for ProfileStore<'_> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get(&self.profile, key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set(&self.profile, key, value)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        self.storage.delete(&self.profile, key)
    }
}
