//! Free-text search interpretation.
//!
//! Turns whatever the user typed into the search box into exactly one
//! provider query shape. Rules are applied in order and the first match wins:
//!
//! 1. A route (`JFK to LAX`, `JFK → LAX`).
//! 2. A three-letter uppercase airport code (`JFK`).
//! 3. A flight designator, two uppercase letters then digits (`AA123`).
//! 4. Anything else is an airline name (`Delta`).
//!
//! The airport and flight rules are case-sensitive while the route split is
//! not, so `jfk` is looked up as an airline name.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Splits a route on the arrow or on `to`, ignoring case.
static ROUTE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)→|to").expect("route separator pattern is valid"));

static AIRPORT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("airport code pattern is valid"));

static FLIGHT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2}\d+$").expect("flight code pattern is valid"));

/// One interpreted search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlightQuery {
    /// Flights from one airport to another.
    Route {
        /// Departure airport, as typed.
        dep: String,
        /// Arrival airport, as typed.
        arr: String,
    },
    /// Flights departing an airport.
    AirportDeparture {
        /// IATA airport code.
        code: String,
    },
    /// A single flight designator.
    FlightNumber {
        /// IATA flight designator.
        code: String,
    },
    /// Flights whose airline name matches.
    AirlineName {
        /// The name fragment.
        text: String,
    },
    /// The unfiltered listing, used when a route could not be split cleanly.
    Listing,
}

impl FlightQuery {
    /// Interpret a search string.
    ///
    /// The input is trimmed first; callers are expected to reject blank
    /// input before getting here.
    #[must_use]
    pub fn interpret(input: &str) -> Self {
        let input = input.trim();

        if input.contains('→') || input.to_lowercase().contains("to") {
            return Self::route(input);
        }

        if input.len() == 3 && AIRPORT_CODE.is_match(input) {
            return Self::AirportDeparture {
                code: input.to_string(),
            };
        }

        if FLIGHT_CODE.is_match(input) {
            return Self::FlightNumber {
                code: input.to_string(),
            };
        }

        Self::AirlineName {
            text: input.to_string(),
        }
    }

    fn route(input: &str) -> Self {
        let parts: Vec<&str> = ROUTE_SEPARATOR.split(input).map(str::trim).collect();

        match parts.as_slice() {
            [dep, arr] if !dep.is_empty() && !arr.is_empty() => Self::Route {
                dep: (*dep).to_string(),
                arr: (*arr).to_string(),
            },
            _ => Self::Listing,
        }
    }

    /// Provider query parameters for this search, excluding the access key
    /// and the limit.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Route { dep, arr } => vec![("dep_iata", dep.clone()), ("arr_iata", arr.clone())],
            Self::AirportDeparture { code } => vec![("dep_iata", code.clone())],
            Self::FlightNumber { code } => vec![("flight_iata", code.clone())],
            Self::AirlineName { text } => vec![("airline_name", text.clone())],
            Self::Listing => Vec::new(),
        }
    }
}

impl fmt::Display for FlightQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route { dep, arr } => write!(f, "route {dep} → {arr}"),
            Self::AirportDeparture { code } => write!(f, "departures from {code}"),
            Self::FlightNumber { code } => write!(f, "flight {code}"),
            Self::AirlineName { text } => write!(f, "airline \"{text}\""),
            Self::Listing => write!(f, "all flights"),
        }
    }
}
