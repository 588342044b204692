//! Flight lookups shared by the HTTP server and the CLI.
//!
//! Each operation builds the provider parameters, applies its own time
//! budget and decides what a failure means. Only [`FlightService::flight_details`]
//! swallows failures, replacing them with sample data.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use crate::mock;
use crate::query::FlightQuery;
use crate::upstream::{Envelope, FlightSource, UpstreamClient};

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The provider.
    Api,
    /// Built-in sample data.
    Mock,
    /// Nothing; the request failed.
    Error,
}

/// Which side of an airport to explore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Flights leaving the airport.
    #[default]
    Departure,
    /// Flights arriving at the airport.
    Arrival,
}

impl Direction {
    /// Provider parameter selecting this side.
    #[must_use]
    pub fn param(self) -> &'static str {
        match self {
            Self::Departure => "dep_iata",
            Self::Arrival => "arr_iata",
        }
    }
}

impl FromStr for Direction {
    type Err = std::convert::Infallible;

    /// Only `departure` selects departures; any other value means arrivals.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s == "departure" {
            Self::Departure
        } else {
            Self::Arrival
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Departure => "departure",
            Self::Arrival => "arrival",
        })
    }
}

/// Outcome of a live lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveLookup {
    /// Every matching flight.
    pub flights: Vec<Value>,
    /// The first flight's `live` block, if it had one.
    pub live_data: Option<Value>,
}

/// A flight answered by [`FlightService::flight_details`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlightDetails {
    /// The raw flight record.
    pub flight: Value,
    /// [`Source::Api`] or [`Source::Mock`].
    pub source: Source,
}

/// The flight lookup use cases.
#[derive(Debug, Clone)]
pub struct FlightService {
    source: Arc<dyn FlightSource>,
    config: UpstreamConfig,
}

impl FlightService {
    /// Create a service over any flight source.
    #[must_use]
    pub fn new(source: Arc<dyn FlightSource>, config: UpstreamConfig) -> Self {
        Self { source, config }
    }

    /// Create a service talking to the configured provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let client = UpstreamClient::new(config)?;
        Ok(Self::new(Arc::new(client), config.clone()))
    }

    /// The upstream configuration in use.
    #[must_use]
    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Free-text search.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a blank query, or the upstream error.
    pub async fn search(&self, query: &str) -> Result<(FlightQuery, Envelope)> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::validation("Search query is required"));
        }

        let interpreted = FlightQuery::interpret(query);
        info!(%interpreted, "Searching flights");

        let mut params = vec![("limit", self.config.search_limit.to_string())];
        params.extend(interpreted.params());

        let envelope = self
            .source
            .fetch(&params, self.config.timeouts.search())
            .await?;
        Ok((interpreted, envelope))
    }

    /// Flights departing or arriving at an airport.
    ///
    /// Without an airport this is the unfiltered listing.
    ///
    /// # Errors
    ///
    /// Returns the upstream error.
    pub async fn explore(
        &self,
        airport: Option<&str>,
        direction: Direction,
        limit: Option<u32>,
    ) -> Result<Envelope> {
        let limit = limit.unwrap_or(self.config.explore_limit);
        let mut params = vec![("limit", limit.to_string())];

        if let Some(airport) = airport.map(str::trim).filter(|a| !a.is_empty()) {
            params.push((direction.param(), airport.to_string()));
        }

        info!(?airport, %direction, limit, "Exploring flights");
        self.source
            .fetch(&params, self.config.timeouts.explore())
            .await
    }

    /// Detail lookup that never fails.
    ///
    /// Any failure, including an empty answer, yields the sample record for
    /// the flight number.
    pub async fn flight_details(&self, flight_number: &str) -> FlightDetails {
        let params = [("flight_iata", flight_number.to_string())];

        match self
            .source
            .fetch(&params, self.config.timeouts.flight_details())
            .await
        {
            Ok(envelope) => {
                if let Some(flight) = envelope.data.into_iter().next() {
                    info!(flight_number, "Fetched flight details");
                    return FlightDetails {
                        flight,
                        source: Source::Api,
                    };
                }
                warn!(flight_number, "Flight not found upstream; using sample data");
            }
            Err(e) => {
                warn!(flight_number, error = %e, "Flight details lookup failed; using sample data");
            }
        }

        FlightDetails {
            flight: mock::mock_flight(flight_number),
            source: Source::Mock,
        }
    }

    /// Strict detail lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the provider has no such flight, or the
    /// upstream error.
    pub async fn flight(&self, flight_number: &str) -> Result<Value> {
        let params = [("flight_iata", flight_number.to_string())];
        let envelope = self
            .source
            .fetch(&params, self.config.timeouts.flight())
            .await?;

        envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(flight_number))
    }

    /// Live telemetry lookup.
    ///
    /// # Errors
    ///
    /// Returns the upstream error.
    pub async fn live(&self, flight_number: &str) -> Result<LiveLookup> {
        let params = [
            ("flight_iata", flight_number.to_string()),
            ("live", "1".to_string()),
        ];
        let envelope = self
            .source
            .fetch(&params, self.config.timeouts.live())
            .await?;

        let live_data = envelope
            .first()
            .and_then(|flight| flight.get("live"))
            .filter(|live| !live.is_null())
            .cloned();

        Ok(LiveLookup {
            flights: envelope.data,
            live_data,
        })
    }
}
