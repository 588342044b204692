//! Resolution of raw provider flights into [`FlightRecord`]s.
//!
//! Each output field has one resolver. A resolver prefers the flattened
//! string form, then the nested reference object, then the documented
//! placeholder.

use serde_json::Value;

use super::raw::{NamedRef, RawAircraft, RawEndpoint, RawFlight, RawLive};
use super::{
    Aircraft, Endpoint, FlightRecord, LiveTelemetry, NOT_AVAILABLE, UNKNOWN_AIRLINE,
    UNKNOWN_AIRPORT, UNKNOWN_STATUS,
};

/// Normalize a raw flight.
#[must_use]
pub fn normalize(raw: &RawFlight) -> FlightRecord {
    FlightRecord {
        flight_number: flight_number(raw),
        airline: airline(raw.airline.as_ref()),
        departure: endpoint(raw.departure.as_ref()),
        arrival: endpoint(raw.arrival.as_ref()),
        status: non_empty(raw.flight_status.as_deref())
            .unwrap_or(UNKNOWN_STATUS)
            .to_string(),
        aircraft: aircraft(raw.aircraft.as_ref()),
        live: raw.live.as_ref().map(live),
    }
}

/// Normalize arbitrary JSON. Never fails.
#[must_use]
pub fn normalize_value(value: &Value) -> FlightRecord {
    normalize(&RawFlight::from_value(value))
}

/// Normalize the answer to a lookup by flight number.
///
/// When the provider omits the designator, the number that was asked for is
/// used instead of the placeholder.
#[must_use]
pub fn normalize_with_fallback(value: &Value, requested: &str) -> FlightRecord {
    let mut record = normalize_value(value);
    if record.flight_number == NOT_AVAILABLE && !requested.is_empty() {
        record.flight_number = requested.to_string();
    }
    record
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn flight_number(raw: &RawFlight) -> String {
    non_empty(raw.flight.as_ref().and_then(|f| f.iata.as_deref()))
        .or_else(|| non_empty(raw.flight_number.as_deref()))
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn airline(airline: Option<&NamedRef>) -> String {
    airline
        .and_then(NamedRef::name)
        .unwrap_or(UNKNOWN_AIRLINE)
        .to_string()
}

fn endpoint(endpoint: Option<&RawEndpoint>) -> Endpoint {
    let Some(raw) = endpoint else {
        return Endpoint {
            airport_name: UNKNOWN_AIRPORT.to_string(),
            iata_code: NOT_AVAILABLE.to_string(),
            ..Endpoint::default()
        };
    };

    let airport = raw.airport.as_ref();
    let scheduled = text(raw.scheduled.as_ref());
    let estimated = non_empty(raw.estimated.as_deref())
        .map_or_else(|| scheduled.clone(), str::to_string);

    Endpoint {
        airport_name: airport
            .and_then(NamedRef::name)
            .unwrap_or(UNKNOWN_AIRPORT)
            .to_string(),
        iata_code: non_empty(raw.iata.as_deref())
            .or_else(|| airport.and_then(NamedRef::iata))
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        scheduled_time: scheduled,
        estimated_time: estimated,
        actual_time: text(raw.actual.as_ref()),
        gate: text(raw.gate.as_ref()),
        terminal: text(raw.terminal.as_ref()),
    }
}

fn aircraft(aircraft: Option<&RawAircraft>) -> Aircraft {
    aircraft.map_or_else(Aircraft::default, |raw| Aircraft {
        registration: text(raw.registration.as_ref()),
        type_code: text(raw.iata.as_ref()),
        icao_code: text(raw.icao.as_ref()),
    })
}

fn live(raw: &RawLive) -> LiveTelemetry {
    LiveTelemetry {
        latitude: raw.latitude.unwrap_or_default(),
        longitude: raw.longitude.unwrap_or_default(),
        altitude_feet: raw.altitude.unwrap_or_default(),
        ground_speed: raw.speed_horizontal.unwrap_or_default(),
        heading_degrees: raw.direction.unwrap_or_default(),
    }
}
