//! Error types for flightlookup.
//!
//! This module defines all error types used throughout the flightlookup crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// The main error type for flightlookup operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Request Errors ===
    /// A required request parameter was missing or malformed.
    #[error("invalid request: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// The provider returned no flight for the requested number.
    #[error("flight not found: {flight_number}")]
    NotFound {
        /// The flight number that was looked up.
        flight_number: String,
    },

    // === Upstream Errors ===
    /// The provider did not answer within the call's budget.
    #[error("upstream request timed out after {}s", budget.as_secs_f64())]
    UpstreamTimeout {
        /// The budget that was exceeded.
        budget: Duration,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("upstream request failed with status {status}")]
    UpstreamHttp {
        /// The HTTP status code returned.
        status: u16,
    },

    /// The provider answered with an error envelope.
    #[error("upstream API error: {message}")]
    UpstreamApi {
        /// The message carried by the envelope.
        message: String,
    },

    /// The request could not be sent or the body could not be decoded.
    ///
    /// The URL is stripped on conversion since its query carries the
    /// access key.
    #[error("upstream transport error: {0}")]
    UpstreamTransport(#[source] reqwest::Error),

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or socket operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for flightlookup operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::UpstreamTransport(err.without_url())
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error.
    #[must_use]
    pub fn not_found(flight_number: impl Into<String>) -> Self {
        Self::NotFound {
            flight_number: flight_number.into(),
        }
    }

    /// Create a new upstream API error.
    #[must_use]
    pub fn upstream_api(message: impl Into<String>) -> Self {
        Self::UpstreamApi {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error came from talking to the provider.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout { .. }
                | Self::UpstreamHttp { .. }
                | Self::UpstreamApi { .. }
                | Self::UpstreamTransport(_)
        )
    }

    /// Check if this error is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::UpstreamTimeout { .. })
    }

    /// Check if this error means the flight does not exist upstream.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("AA123");
        assert_eq!(err.to_string(), "flight not found: AA123");

        let err = Error::validation("Search query is required");
        assert_eq!(
            err.to_string(),
            "invalid request: Search query is required"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::UpstreamTimeout {
            budget: Duration::from_secs(8),
        };
        assert_eq!(err.to_string(), "upstream request timed out after 8s");
    }

    #[test]
    fn test_upstream_http_display() {
        let err = Error::UpstreamHttp { status: 503 };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_upstream_api_display() {
        let err = Error::upstream_api("invalid_access_key");
        assert_eq!(err.to_string(), "upstream API error: invalid_access_key");
    }

    #[test]
    fn test_is_upstream() {
        assert!(Error::UpstreamHttp { status: 500 }.is_upstream());
        assert!(Error::upstream_api("x").is_upstream());
        assert!(Error::UpstreamTimeout {
            budget: Duration::from_secs(1)
        }
        .is_upstream());
        assert!(!Error::not_found("AA1").is_upstream());
        assert!(!Error::validation("x").is_upstream());
    }

    #[test]
    fn test_is_timeout() {
        assert!(Error::UpstreamTimeout {
            budget: Duration::from_millis(10)
        }
        .is_timeout());
        assert!(!Error::UpstreamHttp { status: 504 }.is_timeout());
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::not_found("UA789").is_not_found());
        assert!(!Error::internal("boom").is_not_found());
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("address in use"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<Vec<String>, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "search timeout must be greater than 0".to_string(),
        };
        assert!(err.to_string().contains("search timeout"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
