//! HTTP server exposing the flight lookups as JSON routes.

mod error;
mod routes;

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::info;

pub use error::ApiError;

use crate::error::{Error, Result};
use crate::service::FlightService;

/// Build the application router.
#[must_use]
pub fn router(service: FlightService, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/search", get(routes::search))
        .route("/api/explore", get(routes::explore))
        .route("/api/airports", get(routes::airports))
        .route("/api/flight/{flight_number}", get(routes::flight_with_fallback))
        .route("/api/flights/{flight_number}", get(routes::flight))
        .route("/api/flights/live/{flight_number}", get(routes::live))
        .layer(cors)
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(service)
}

/// Serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(service: FlightService, bind: SocketAddr, request_timeout: Duration) -> Result<()> {
    let app = router(service, request_timeout);

    let listener = TcpListener::bind(bind).await?;
    let local = listener.local_addr()?;
    info!("Server running on http://{local}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Io)?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::{json, Value};

    use crate::config::UpstreamConfig;
    use crate::service::tests::StubSource;

    async fn spawn(source: StubSource) -> SocketAddr {
        let service = FlightService::new(Arc::new(source), UpstreamConfig::default());
        let app = router(service, Duration::from_secs(5));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn get_json(url: &str) -> (u16, Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_routes_over_http() {
        let addr = spawn(StubSource::failing()).await;

        let (status, body) = get_json(&format!("http://{addr}/api/flights/UNKNOWN123")).await;
        assert_eq!(status, 500);
        assert_eq!(body["source"], "error");

        let (status, body) = get_json(&format!("http://{addr}/api/flight/UNKNOWN123")).await;
        assert_eq!(status, 200);
        assert_eq!(body["source"], "mock");

        let (status, body) = get_json(&format!("http://{addr}/api/search")).await;
        assert_eq!(status, 400);
        assert_eq!(body, json!({"error": "Search query is required"}));
    }

    #[tokio::test]
    async fn test_live_route_is_not_shadowed() {
        let addr = spawn(StubSource::returning(vec![json!({"live": {"altitude": 1}})])).await;

        let (status, body) = get_json(&format!("http://{addr}/api/flights/live/AA123")).await;
        assert_eq!(status, 200);
        assert_eq!(body["live_data"], json!({"altitude": 1}));
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let addr = spawn(StubSource::returning(vec![])).await;
        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("http://{addr}/api/airports"))
            .header("Origin", "http://example.test")
            .header("Access-Control-Request-Method", "GET")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
