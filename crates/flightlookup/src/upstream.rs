//! Client for the aviation-data provider.
//!
//! Every call is a single `GET {base_url}/flights` carrying the access key
//! and the query parameters, bounded by a per-call time budget. There are
//! no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};

/// Message used when the provider reports an error without one.
pub const DEFAULT_API_ERROR: &str = "API Error";

/// Query parameters for one provider call.
pub type QueryParams = [(&'static str, String)];

/// The successful part of a provider response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Raw flight records.
    pub data: Vec<Value>,
    /// Provider pagination block, passed through untouched.
    pub pagination: Option<Value>,
}

impl Envelope {
    /// Interpret a decoded response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UpstreamApi`] if the body carries an `error` member.
    pub fn from_body(body: Value) -> Result<Self> {
        if let Some(error) = body.get("error").filter(|e| is_truthy(e)) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_API_ERROR);
            return Err(Error::upstream_api(message));
        }

        let Value::Object(mut body) = body else {
            return Ok(Self::default());
        };

        let data = match body.remove("data") {
            Some(Value::Array(data)) => data,
            _ => Vec::new(),
        };
        let pagination = body.remove("pagination").filter(|p| !p.is_null());

        Ok(Self { data, pagination })
    }

    /// The first flight, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.data.first()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Something that answers flight queries.
#[async_trait]
pub trait FlightSource: Send + Sync + std::fmt::Debug {
    /// Run one query within `budget`.
    ///
    /// # Errors
    ///
    /// Returns an upstream error on timeout, non-2xx status, a provider
    /// error envelope, or a transport failure.
    async fn fetch(&self, params: &QueryParams, budget: Duration) -> Result<Envelope>;
}

/// HTTP client for the provider.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl UpstreamClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("flightlookup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        if config.access_key.is_empty() {
            warn!("No upstream access key configured; provider calls will likely fail");
        }

        Ok(Self {
            http,
            endpoint: format!("{}/flights", config.base_url.trim_end_matches('/')),
            access_key: config.access_key.clone(),
        })
    }

    /// The full flights endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, params: &QueryParams) -> Result<Value> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("access_key", self.access_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamHttp {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FlightSource for UpstreamClient {
    async fn fetch(&self, params: &QueryParams, budget: Duration) -> Result<Envelope> {
        debug!(?params, budget_secs = budget.as_secs_f64(), "Querying provider");

        let body = tokio::time::timeout(budget, self.call(params))
            .await
            .map_err(|_| Error::UpstreamTimeout { budget })??;

        let envelope = Envelope::from_body(body)?;
        debug!(count = envelope.data.len(), "Provider answered");
        Ok(envelope)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn ok(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
        Json(json!({
            "pagination": {"limit": 100, "offset": 0, "count": 1, "total": 1},
            "data": [{"flight": {"iata": "AA123"}, "query": query}]
        }))
    }

    async fn slow() -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Json(json!({"data": []}))
    }

    async fn api_error() -> Json<Value> {
        Json(json!({"error": {"code": "invalid_access_key", "message": "Invalid access key"}}))
    }

    async fn bare_error() -> Json<Value> {
        Json(json!({"error": {"code": "oops"}}))
    }

    async fn server_error() -> impl IntoResponse {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }

    async fn no_data() -> Json<Value> {
        Json(json!({"pagination": null}))
    }

    async fn not_json() -> &'static str {
        "<html>maintenance</html>"
    }

    /// Start a fake provider on an ephemeral port.
    ///
    /// Each behaviour lives under its own prefix, so a base URL of
    /// `http://addr/slow` yields a provider that never answers in time.
    pub(crate) async fn spawn_fake_provider() -> SocketAddr {
        let router = Router::new()
            .route("/ok/flights", get(ok))
            .route("/slow/flights", get(slow))
            .route("/api-error/flights", get(api_error))
            .route("/bare-error/flights", get(bare_error))
            .route("/server-error/flights", get(server_error))
            .route("/no-data/flights", get(no_data))
            .route("/not-json/flights", get(not_json));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    pub(crate) fn client_for(addr: SocketAddr, behaviour: &str) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: format!("http://{addr}/{behaviour}/"),
            access_key: "test-key".to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap()
    }

    const BUDGET: Duration = Duration::from_secs(5);

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = UpstreamClient::new(&UpstreamConfig {
            base_url: "https://example.test/v1/".to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap();
        assert_eq!(client.endpoint(), "https://example.test/v1/flights");
    }

    #[test]
    fn test_envelope_defaults() {
        let envelope = Envelope::from_body(json!({})).unwrap();
        assert!(envelope.data.is_empty());
        assert!(envelope.pagination.is_none());

        let envelope = Envelope::from_body(json!({"data": "nope"})).unwrap();
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_envelope_error_message() {
        let err = Envelope::from_body(json!({"error": {"message": "Rate limited"}})).unwrap_err();
        assert!(matches!(err, Error::UpstreamApi { ref message } if message == "Rate limited"));

        let err = Envelope::from_body(json!({"error": {}})).unwrap_err();
        assert!(matches!(err, Error::UpstreamApi { ref message } if message == DEFAULT_API_ERROR));
    }

    #[test]
    fn test_envelope_falsy_error_is_ignored() {
        let envelope = Envelope::from_body(json!({"error": null, "data": [{}]})).unwrap();
        assert_eq!(envelope.data.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_success_sends_key_and_params() {
        let addr = spawn_fake_provider().await;
        let client = client_for(addr, "ok");

        let envelope = client
            .fetch(&[("flight_iata", "AA123".to_string())], BUDGET)
            .await
            .unwrap();

        assert_eq!(envelope.data.len(), 1);
        assert!(envelope.pagination.is_some());
        let query = &envelope.data[0]["query"];
        assert_eq!(query["access_key"], "test-key");
        assert_eq!(query["flight_iata"], "AA123");
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let addr = spawn_fake_provider().await;
        let client = client_for(addr, "slow");

        let err = client
            .fetch(&[], Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_fetch_api_error() {
        let addr = spawn_fake_provider().await;

        let err = client_for(addr, "api-error").fetch(&[], BUDGET).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamApi { ref message } if message == "Invalid access key"));

        let err = client_for(addr, "bare-error").fetch(&[], BUDGET).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamApi { ref message } if message == DEFAULT_API_ERROR));
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let addr = spawn_fake_provider().await;
        let err = client_for(addr, "server-error")
            .fetch(&[], BUDGET)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UpstreamHttp { status: 500 }));
    }

    #[tokio::test]
    async fn test_fetch_missing_data_is_empty() {
        let addr = spawn_fake_provider().await;
        let envelope = client_for(addr, "no-data").fetch(&[], BUDGET).await.unwrap();
        assert!(envelope.data.is_empty());
        assert!(envelope.pagination.is_none());
    }

    #[tokio::test]
    async fn test_fetch_unreadable_body_is_transport_error() {
        let addr = spawn_fake_provider().await;
        let err = client_for(addr, "not-json").fetch(&[], BUDGET).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamTransport(_)));
    }

    #[tokio::test]
    async fn test_transport_error_hides_access_key() {
        let client = UpstreamClient::new(&UpstreamConfig {
            base_url: "http://127.0.0.1:1/v1".to_string(),
            access_key: "SECRET-KEY-123".to_string(),
            ..UpstreamConfig::default()
        })
        .unwrap();

        let err = client.fetch(&[], BUDGET).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamTransport(_)));
        let text = err.to_string();
        assert!(!text.contains("SECRET-KEY-123"), "{text}");
        assert!(!text.contains("access_key"), "{text}");

        let addr = spawn_fake_provider().await;
        let err = client_for(addr, "not-json").fetch(&[], BUDGET).await.unwrap_err();
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn test_fetch_unknown_route_is_http_error() {
        let addr = spawn_fake_provider().await;
        let err = client_for(addr, "missing").fetch(&[], BUDGET).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamHttp { status: 404 }));
    }
}
