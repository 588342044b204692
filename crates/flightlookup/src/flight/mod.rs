//! Canonical flight records.
//!
//! Provider JSON is read leniently into [`RawFlight`] and then resolved into
//! a [`FlightRecord`], whose fields are always plain strings (or numbers for
//! live telemetry) so display code never has to null-check.

mod normalize;
pub mod raw;
pub mod schedule;
mod status;

use serde::{Deserialize, Serialize};

pub use normalize::{normalize, normalize_value, normalize_with_fallback};
pub use raw::{NamedRef, RawFlight};
pub use status::{StatusColor, StatusFilter};

/// Placeholder for unknown flight numbers and airport codes.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for an unknown status.
pub const UNKNOWN_STATUS: &str = "unknown";

/// Placeholder for an unresolvable airline name.
pub const UNKNOWN_AIRLINE: &str = "Unknown Airline";

/// Placeholder for an unresolvable airport name.
pub const UNKNOWN_AIRPORT: &str = "Unknown Airport";

/// A normalized flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// IATA designator, e.g. `AA123`.
    pub flight_number: String,
    /// Airline display name.
    pub airline: String,
    /// Departure leg.
    pub departure: Endpoint,
    /// Arrival leg.
    pub arrival: Endpoint,
    /// Status label, e.g. `scheduled`, `active`, `landed`.
    pub status: String,
    /// Aircraft details.
    pub aircraft: Aircraft,
    /// Live telemetry, present only for tracked flights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<LiveTelemetry>,
}

/// One end of a normalized flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Airport display name.
    pub airport_name: String,
    /// IATA airport code.
    pub iata_code: String,
    /// Scheduled time (RFC 3339) or empty.
    pub scheduled_time: String,
    /// Estimated time (RFC 3339) or empty.
    pub estimated_time: String,
    /// Actual time (RFC 3339) or empty.
    pub actual_time: String,
    /// Gate, or empty.
    pub gate: String,
    /// Terminal, or empty.
    pub terminal: String,
}

/// Aircraft details of a normalized flight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aircraft {
    /// Tail number.
    pub registration: String,
    /// IATA type code, e.g. `B738`.
    pub type_code: String,
    /// ICAO type code.
    pub icao_code: String,
}

/// Real-time position of a flight in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveTelemetry {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Altitude in feet.
    pub altitude_feet: f64,
    /// Horizontal ground speed.
    pub ground_speed: f64,
    /// Track in degrees.
    pub heading_degrees: f64,
}

impl FlightRecord {
    /// A short `DEP → ARR` description of the route.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{} → {}", self.departure.iata_code, self.arrival.iata_code)
    }
}
