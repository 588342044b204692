//! Route handlers.
//!
//! Successful responses pass the provider's raw flight records through
//! untouched; normalization is left to the caller.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::airports::MAJOR_AIRPORTS;
use crate::mock::MOCK_MESSAGE;
use crate::service::{Direction, FlightService, Source};

use super::error::ApiError;

/// `GET /api/search` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text search.
    pub query: Option<String>,
}

/// `GET /api/explore` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ExploreParams {
    /// IATA airport code; all flights when absent.
    pub airport: Option<String>,
    /// `departure` (default) or anything else for arrivals.
    #[serde(rename = "type")]
    pub direction: Option<String>,
    /// Result limit.
    pub limit: Option<String>,
}

pub async fn search(
    State(service): State<FlightService>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = params.query.unwrap_or_default();
    let (_, envelope) = service.search(&query).await.map_err(ApiError::search)?;

    Ok(Json(json!({
        "flights": envelope.data,
        "pagination": envelope.pagination,
        "source": Source::Api,
    })))
}

pub async fn explore(
    State(service): State<FlightService>,
    Query(params): Query<ExploreParams>,
) -> Result<impl IntoResponse, ApiError> {
    let direction: Direction = params
        .direction
        .as_deref()
        .unwrap_or("departure")
        .parse()
        .unwrap_or_default();

    let limit = match params.limit.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match raw.parse::<u32>() {
            Ok(limit) if limit > 0 => Some(limit),
            _ => {
                return Err(ApiError::BadRequest {
                    message: format!("Invalid limit: {raw}"),
                })
            }
        },
    };

    let envelope = service
        .explore(params.airport.as_deref(), direction, limit)
        .await
        .map_err(ApiError::Explore)?;

    Ok(Json(json!({
        "flights": envelope.data,
        "pagination": envelope.pagination,
        "source": Source::Api,
    })))
}

/// Never fails; falls back to sample data.
pub async fn flight_with_fallback(
    State(service): State<FlightService>,
    Path(flight_number): Path<String>,
) -> impl IntoResponse {
    let details = service.flight_details(&flight_number).await;

    match details.source {
        Source::Mock => Json(json!({
            "flight": details.flight,
            "source": Source::Mock,
            "message": MOCK_MESSAGE,
        })),
        _ => Json(json!({
            "flight": details.flight,
            "source": details.source,
        })),
    }
}

pub async fn flight(
    State(service): State<FlightService>,
    Path(flight_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let flight = service
        .flight(&flight_number)
        .await
        .map_err(ApiError::flight_details)?;

    Ok(Json(json!({
        "flight": flight,
        "source": Source::Api,
    })))
}

pub async fn live(
    State(service): State<FlightService>,
    Path(flight_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let live = service.live(&flight_number).await.map_err(ApiError::live)?;
    Ok(Json(live))
}

pub async fn airports() -> impl IntoResponse {
    Json(json!({ "airports": MAJOR_AIRPORTS }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::Response;
    use serde_json::Value;

    use crate::error::Error;
    use crate::service::tests::{service_with, StubSource};

    async fn read(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn respond<T: IntoResponse>(result: Result<T, ApiError>) -> (StatusCode, Value) {
        read(result.into_response()).await
    }

    #[tokio::test]
    async fn test_search_success() {
        let (service, _) = service_with(StubSource::returning(vec![json!({"flight": {"iata": "AA1"}})]));
        let (status, body) = respond(
            search(
                State(service),
                Query(SearchParams {
                    query: Some("AA1".to_string()),
                }),
            )
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "api");
        assert_eq!(body["flights"].as_array().unwrap().len(), 1);
        assert_eq!(body["pagination"]["count"], 1);
    }

    #[tokio::test]
    async fn test_search_missing_query() {
        let (service, _) = service_with(StubSource::returning(vec![]));
        let (status, body) =
            respond(search(State(service), Query(SearchParams::default())).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Search query is required"}));
    }

    #[tokio::test]
    async fn test_search_upstream_failure() {
        let (service, _) = service_with(StubSource::failing());
        let (status, body) = respond(
            search(
                State(service),
                Query(SearchParams {
                    query: Some("Delta".to_string()),
                }),
            )
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["source"], "error");
        assert_eq!(body["flights"], json!([]));
    }

    #[tokio::test]
    async fn test_explore_defaults() {
        let (service, source) = service_with(StubSource::returning(vec![]));
        let (status, body) = respond(
            explore(
                State(service),
                Query(ExploreParams {
                    airport: Some("JFK".to_string()),
                    ..ExploreParams::default()
                }),
            )
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "api");
        let params = source.last_params();
        assert!(params.contains(&("limit".to_string(), "100".to_string())));
        assert!(params.contains(&("dep_iata".to_string(), "JFK".to_string())));
    }

    #[tokio::test]
    async fn test_explore_other_type_means_arrivals() {
        let (service, source) = service_with(StubSource::returning(vec![]));
        respond(
            explore(
                State(service),
                Query(ExploreParams {
                    airport: Some("LAX".to_string()),
                    direction: Some("arrivals".to_string()),
                    limit: Some("25".to_string()),
                }),
            )
            .await,
        )
        .await;

        let params = source.last_params();
        assert!(params.contains(&("arr_iata".to_string(), "LAX".to_string())));
        assert!(params.contains(&("limit".to_string(), "25".to_string())));
    }

    #[tokio::test]
    async fn test_explore_rejects_bad_limit() {
        let (service, source) = service_with(StubSource::returning(vec![]));
        let (status, body) = respond(
            explore(
                State(service),
                Query(ExploreParams {
                    limit: Some("lots".to_string()),
                    ..ExploreParams::default()
                }),
            )
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("lots"));
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_explore_upstream_failure() {
        let (service, _) = service_with(StubSource::failing());
        let (status, body) =
            respond(explore(State(service), Query(ExploreParams::default())).await).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch flights data");
    }

    #[tokio::test]
    async fn test_unknown_flight_falls_back_to_mock() {
        let (service, _) = service_with(StubSource::failing());
        let response = flight_with_fallback(State(service), Path("UNKNOWN123".to_string()))
            .await
            .into_response();
        let (status, body) = read(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "mock");
        assert_eq!(body["message"], MOCK_MESSAGE);
        assert_eq!(body["flight"]["flight_number"], "UNKNOWN123");
    }

    #[tokio::test]
    async fn test_flight_with_fallback_from_api() {
        let (service, _) = service_with(StubSource::returning(vec![json!({"flight": {"iata": "AA123"}})]));
        let response = flight_with_fallback(State(service), Path("AA123".to_string()))
            .await
            .into_response();
        let (_, body) = read(response).await;

        assert_eq!(body["source"], "api");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_strict_flight_upstream_failure() {
        let (service, _) = service_with(StubSource::failing());
        let (status, body) =
            respond(flight(State(service), Path("UNKNOWN123".to_string())).await).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["source"], "error");
        assert_eq!(body["error"], "Failed to fetch flight details");
    }

    #[tokio::test]
    async fn test_strict_flight_not_found() {
        let (service, _) = service_with(StubSource::returning(vec![]));
        let (status, body) = respond(flight(State(service), Path("ZZ9".to_string())).await).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Flight not found", "source": "api"}));
    }

    #[tokio::test]
    async fn test_strict_flight_found() {
        let (service, _) = service_with(StubSource::returning(vec![json!({"flight": {"iata": "DL456"}})]));
        let (status, body) = respond(flight(State(service), Path("DL456".to_string())).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["flight"]["flight"]["iata"], "DL456");
        assert_eq!(body["source"], "api");
    }

    #[tokio::test]
    async fn test_live_success() {
        let (service, _) = service_with(StubSource::returning(vec![json!({"live": {"altitude": 100}})]));
        let (status, body) = respond(live(State(service), Path("AA123".to_string())).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["live_data"], json!({"altitude": 100}));
        assert_eq!(body["flights"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_live_without_data_is_null() {
        let (service, _) = service_with(StubSource::returning(vec![]));
        let (_, body) = respond(live(State(service), Path("AA123".to_string())).await).await;
        assert_eq!(body, json!({"flights": [], "live_data": null}));
    }

    #[tokio::test]
    async fn test_live_provider_error() {
        let (service, _) = service_with(StubSource::new(|| Err(Error::upstream_api("Invalid key"))));
        let (status, body) = respond(live(State(service), Path("AA123".to_string())).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid key"}));
    }

    #[tokio::test]
    async fn test_live_transport_failure() {
        let (service, _) = service_with(StubSource::failing());
        let (status, body) = respond(live(State(service), Path("AA123".to_string())).await).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to fetch live flight data"}));
    }

    #[tokio::test]
    async fn test_airports() {
        let (_, body) = read(airports().await.into_response()).await;
        let airports = body["airports"].as_array().unwrap();
        assert_eq!(airports.len(), 10);
        assert_eq!(airports[0]["code"], "JFK");
        assert_eq!(airports[0]["city"], "New York");
    }
}
