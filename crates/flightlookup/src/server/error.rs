//! JSON error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::error::Error;
use crate::service::Source;

/// A failed route, with the body each route promises its callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request itself is unusable.
    #[error("{message}")]
    BadRequest {
        /// Shown to the caller as `error`.
        message: String,
    },

    /// `/api/search` could not reach the provider.
    #[error("Failed to fetch flight data")]
    Search(#[source] Error),

    /// `/api/explore` could not reach the provider.
    #[error("Failed to fetch flights data")]
    Explore(#[source] Error),

    /// `/api/flights/{flightNumber}` found nothing.
    #[error("Flight not found")]
    FlightNotFound,

    /// `/api/flights/{flightNumber}` could not reach the provider.
    #[error("Failed to fetch flight details")]
    FlightDetails(#[source] Error),

    /// The provider rejected a live lookup.
    #[error("{0}")]
    LiveRejected(String),

    /// `/api/flights/live/{flightNumber}` could not reach the provider.
    #[error("Failed to fetch live flight data")]
    Live(#[source] Error),
}

impl ApiError {
    /// Wrap a service error from the strict detail route.
    #[must_use]
    pub fn flight_details(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => Self::FlightNotFound,
            Error::Validation { message } => Self::BadRequest { message },
            other => Self::FlightDetails(other),
        }
    }

    /// Wrap a service error from the live route.
    #[must_use]
    pub fn live(err: Error) -> Self {
        match err {
            Error::UpstreamApi { message } => Self::LiveRejected(message),
            Error::Validation { message } => Self::BadRequest { message },
            other => Self::Live(other),
        }
    }

    /// Wrap a service error from the search route.
    #[must_use]
    pub fn search(err: Error) -> Self {
        match err {
            Error::Validation { message } => Self::BadRequest { message },
            other => Self::Search(other),
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } | Self::LiveRejected(_) => StatusCode::BAD_REQUEST,
            Self::FlightNotFound => StatusCode::NOT_FOUND,
            Self::Search(_) | Self::Explore(_) | Self::FlightDetails(_) | Self::Live(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> Value {
        let message = self.to_string();
        match self {
            Self::Search(_) | Self::Explore(_) => json!({
                "error": message,
                "flights": [],
                "source": Source::Error,
            }),
            Self::FlightNotFound => json!({"error": message, "source": Source::Api}),
            Self::FlightDetails(_) => json!({"error": message, "source": Source::Error}),
            Self::BadRequest { .. } | Self::LiveRejected(_) | Self::Live(_) => {
                json!({"error": message})
            }
        }
    }

    fn cause(&self) -> Option<&Error> {
        match self {
            Self::Search(e) | Self::Explore(e) | Self::FlightDetails(e) | Self::Live(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.cause() {
            Some(cause) => error!(status = status.as_u16(), %cause, "{self}"),
            None => warn!(status = status.as_u16(), "{self}"),
        }

        (status, Json(self.body())).into_response()
    }
}
