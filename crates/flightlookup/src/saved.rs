//! Saved flights.
//!
//! The saved set is a list of flight numbers stored as one JSON array under
//! [`SAVED_FLIGHTS_KEY`]. Every mutation reads the current set, changes it
//! and writes the whole set back; concurrent writers are last-write-wins.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Key the saved set is stored under.
pub const SAVED_FLIGHTS_KEY: &str = "savedFlights";

/// A string key-value store.
pub trait KeyValueStore {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Returns `true` if one was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn delete(&self, key: &str) -> Result<bool>;
}

/// In-process [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| Error::internal("memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::internal("memory store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
    fn delete(&self, key: &str) -> Result<bool> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::internal("memory store lock poisoned"))?;
        Ok(values.remove(key).is_some())
    }
}

/// The saved-flights set over some [`KeyValueStore`].
#[derive(Debug)]
pub struct SavedFlights<S> {
    store: S,
}

impl<S: KeyValueStore> SavedFlights<S> {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All saved flight numbers in insertion order.
    ///
    /// A value that is not a JSON array of strings is logged and read as
    /// an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list(&self) -> Result<Vec<String>> {
        let Some(raw) = self.store.get(SAVED_FLIGHTS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(flights) => Ok(flights),
            Err(e) => {
                warn!("Ignoring unreadable saved flights ({e}); treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Whether a flight number is saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_saved(&self, flight_number: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|f| f == flight_number))
    }

    /// Add the flight if absent, remove it if present.
    ///
    /// Returns whether the flight is saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn toggle(&self, flight_number: &str) -> Result<bool> {
        let mut flights = self.list()?;
        let before = flights.len();
        // Drop every copy; another writer may have stored duplicates
        flights.retain(|f| f != flight_number);
        let saved = flights.len() == before;
        if saved {
            flights.push(flight_number.to_string());
        }
        self.persist(&flights)?;
        debug!(flight_number, saved, "Toggled saved flight");
        Ok(saved)
    }

    /// Save a flight. Returns `false` if it was already saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn add(&self, flight_number: &str) -> Result<bool> {
        let mut flights = self.list()?;
        if flights.iter().any(|f| f == flight_number) {
            return Ok(false);
        }
        flights.push(flight_number.to_string());
        self.persist(&flights)?;
        Ok(true)
    }

    /// Unsave a flight. Returns `false` if it was not saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn remove(&self, flight_number: &str) -> Result<bool> {
        let mut flights = self.list()?;
        let before = flights.len();
        flights.retain(|f| f != flight_number);
        if flights.len() == before {
            return Ok(false);
        }
        self.persist(&flights)?;
        Ok(true)
    }

    /// Forget every saved flight. Returns `false` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<bool> {
        let cleared = self.store.delete(SAVED_FLIGHTS_KEY)?;
        debug!(cleared, "Cleared saved flights");
        Ok(cleared)
    }

    fn persist(&self, flights: &[String]) -> Result<()> {
        let json = serde_json::to_string(flights)?;
        self.store.set(SAVED_FLIGHTS_KEY, &json)
    }
}
