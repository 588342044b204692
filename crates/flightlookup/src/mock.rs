//! Built-in sample flights served when the provider is unavailable.
//!
//! Records use the flattened shape (`flight_number`, string `airline` and
//! `airport`) so they go through the same normalizer as live data.

use serde_json::{json, Value};

/// Message attached to responses that carry sample data.
pub const MOCK_MESSAGE: &str = "Using sample data - API temporarily unavailable";

/// The sample record for a flight number.
///
/// Known demo flights get their own record; anything else gets a generic
/// record carrying the requested number.
#[must_use]
pub fn mock_flight(flight_number: &str) -> Value {
    match flight_number {
        "AA123" => json!({
            "flight_number": "AA123",
            "airline": "American Airlines",
            "departure": endpoint(
                "John F Kennedy International", "JFK",
                "2024-01-15T10:30:00+00:00", "2024-01-15T10:30:00+00:00", "2024-01-15T10:35:00+00:00",
                "A12", "8",
            ),
            "arrival": endpoint(
                "Los Angeles International", "LAX",
                "2024-01-15T13:45:00+00:00", "2024-01-15T13:45:00+00:00", "",
                "B7", "4",
            ),
            "flight_status": "active",
            "aircraft": aircraft("N123AA", "B738"),
            "live": live(39.8283, -98.5795, 35000, 850, 270),
        }),
        "DL456" => json!({
            "flight_number": "DL456",
            "airline": "Delta Air Lines",
            "departure": endpoint(
                "Chicago O'Hare International", "ORD",
                "2024-01-15T14:00:00+00:00", "2024-01-15T14:20:00+00:00", "2024-01-15T14:25:00+00:00",
                "C15", "2",
            ),
            "arrival": endpoint(
                "Miami International", "MIA",
                "2024-01-15T17:30:00+00:00", "2024-01-15T17:50:00+00:00", "",
                "D3", "N",
            ),
            "flight_status": "active",
            "aircraft": aircraft("N456DL", "A320"),
            "live": live(28.4267, -84.2833, 37000, 780, 180),
        }),
        "UA789" => json!({
            "flight_number": "UA789",
            "airline": "United Airlines",
            "departure": endpoint(
                "San Francisco International", "SFO",
                "2024-01-15T23:15:00+00:00", "2024-01-15T23:15:00+00:00", "",
                "G14", "3",
            ),
            "arrival": endpoint(
                "Narita International", "NRT",
                "2024-01-16T15:45:00+00:00", "2024-01-16T15:45:00+00:00", "",
                "A5", "1",
            ),
            "flight_status": "boarding",
            "aircraft": aircraft("N789UA", "B777"),
            "live": live(37.6213, -122.379, 0, 0, 0),
        }),
        other => json!({
            "flight_number": other,
            "airline": "Sample Airlines",
            "departure": endpoint(
                "Sample Departure Airport", "DEP",
                "2024-01-15T10:00:00+00:00", "2024-01-15T10:00:00+00:00", "",
                "A1", "1",
            ),
            "arrival": endpoint(
                "Sample Arrival Airport", "ARR",
                "2024-01-15T14:00:00+00:00", "2024-01-15T14:00:00+00:00", "",
                "B2", "2",
            ),
            "flight_status": "scheduled",
            "aircraft": aircraft("N000XX", "B737"),
            "live": live(40.0, -100.0, 35000, 800, 90),
        }),
    }
}

#[allow(clippy::too_many_arguments)]
fn endpoint(
    airport: &str,
    iata: &str,
    scheduled: &str,
    estimated: &str,
    actual: &str,
    gate: &str,
    terminal: &str,
) -> Value {
    json!({
        "airport": airport,
        "iata": iata,
        "scheduled": scheduled,
        "estimated": estimated,
        "actual": actual,
        "gate": gate,
        "terminal": terminal,
    })
}

fn aircraft(registration: &str, type_code: &str) -> Value {
    json!({"registration": registration, "iata": type_code, "icao": type_code})
}

fn live(latitude: f64, longitude: f64, altitude: u32, speed: u32, direction: u32) -> Value {
    json!({
        "latitude": latitude,
        "longitude": longitude,
        "altitude": altitude,
        "speed_horizontal": speed,
        "direction": direction,
    })
}
