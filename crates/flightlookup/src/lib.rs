//! `flightlookup` - Flight search and tracking on top of an aviation-data provider
//!
//! This library interprets free-text flight searches, queries the provider
//! with bounded timeouts, normalizes its loosely-shaped flight records, keeps
//! a per-profile list of saved flights, and serves all of it as a JSON API.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod airports;
pub mod cli;
pub mod config;
pub mod error;
pub mod flight;
pub mod generation;
pub mod logging;
pub mod mock;
pub mod query;
pub mod render;
pub mod saved;
pub mod server;
pub mod service;
pub mod storage;
pub mod tracker;
pub mod upstream;

pub use config::Config;
pub use error::{Error, Result};
pub use flight::{FlightRecord, StatusColor, StatusFilter};
pub use logging::init_logging;
pub use query::FlightQuery;
pub use saved::{KeyValueStore, MemoryStore, SavedFlights};
pub use service::{FlightService, Source};
pub use storage::{Storage, StorageStats};
pub use upstream::{Envelope, FlightSource, UpstreamClient};
