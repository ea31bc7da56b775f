//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::aggregator::{AggregateResult, SearchQuery};
use crate::error::Error;
use crate::geo::Coordinates;
use crate::provider::{ProviderInfo, ProviderKind};
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/locations", post(locations_handler))
        .route("/api/providers", get(providers_handler))
        .route("/api/status", get(status_handler))
        .fallback_service(ServeDir::new("static").append_index_html_on_directories(true))
        .with_state(state)
}

/// Location search request body
///
/// Optional fields default at the validation boundary: radius 5.0 miles,
/// max results 30, types = all registered providers.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Latitude of the query point
    pub lat: f64,
    /// Longitude of the query point
    pub lng: f64,
    /// Search radius in miles
    pub distance_miles: Option<f64>,
    /// Per-provider result cap
    pub max_results: Option<usize>,
    /// Accepted for schema compatibility; filtering does not consult it
    #[serde(default)]
    pub show_closed: bool,
    /// Providers to query
    pub types: Option<Vec<ProviderKind>>,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidRadius(_) => "INVALID_RADIUS",
            Error::InvalidMaxResults(_) => "INVALID_MAX_RESULTS",
            Error::UnknownProvider(_) => "UNKNOWN_PROVIDER",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Search for drive-thru locations
///
/// POST /api/locations
///
/// Always answers 200 once the request validates; individual provider
/// failures travel in the result's `errors` list next to whatever
/// locations the other providers produced.
async fn locations_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<AggregateResult>, ApiError> {
    let query = SearchQuery::build(
        Coordinates::new(req.lat, req.lng),
        req.distance_miles,
        req.max_results,
        req.types,
        state.aggregator().registry(),
    )
    .map_err(ApiError::from)?;

    let result = state.aggregator().aggregate(&query).await;

    Ok(Json(result))
}

/// Providers list response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProvidersResponse {
    pub providers: Vec<ProviderInfo>,
}

/// List registered providers
///
/// GET /api/providers
async fn providers_handler(State(state): State<Arc<AppState>>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: state.aggregator().registry().available(),
    })
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Number of registered providers
    pub providers: usize,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: state.aggregator().registry().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::provider::{mcdonalds::McDonalds, Provider, ProviderRegistry};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use http_body_util::BodyExt;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    const FIXTURE_BODY: &str = r#"{
        "features": [
            {
                "properties": {
                    "filterType": ["DRIVETHRU"],
                    "addressLine1": "1856 E JERICHO TPKE",
                    "driveTodayHours": "05:00 - 23:00"
                },
                "geometry": {"coordinates": [-73.3164, 40.8813]}
            }
        ]
    }"#;

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Config::default(),
            ProviderRegistry::with_defaults(),
        ))
    }

    async fn create_fixture_state() -> Arc<AppState> {
        let app = Router::new().route("/locator", get(|| async { FIXTURE_BODY }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut registry = ProviderRegistry::new();
        registry.register(Provider::Mcdonalds(McDonalds::with_base_url(format!(
            "http://{}/locator",
            addr
        ))));

        Arc::new(AppState::new(Config::default(), registry))
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let status: StatusResponse = serde_json::from_slice(&body).unwrap();

        assert!(status.running);
        assert_eq!(status.providers, 1);
    }

    #[tokio::test]
    async fn test_providers_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/providers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let providers: ProvidersResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(providers.providers.len(), 1);
        assert_eq!(providers.providers[0].name, "mcdonalds");
    }

    #[tokio::test]
    async fn test_locations_endpoint() {
        let app = create_router(create_fixture_state().await);

        let request_body = serde_json::json!({
            "lat": 40.8768,
            "lng": -73.3246,
            "types": ["mcdonalds"]
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/locations")
                    .header("Content-Type", "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let result: AggregateResult = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.locations.len(), 1);
        assert_eq!(result.locations[0].address, "1856 E Jericho Tpke");
        assert!(result.errors.is_empty());
    }

    #[tokio::test]
    async fn test_locations_invalid_coordinates() {
        let app = create_router(create_test_state());

        let request_body = serde_json::json!({
            "lat": 91.0,
            "lng": -73.3246
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/locations")
                    .header("Content-Type", "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(err.code, "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_locations_invalid_radius() {
        let app = create_router(create_test_state());

        let request_body = serde_json::json!({
            "lat": 40.8768,
            "lng": -73.3246,
            "distance_miles": 100.0
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/locations")
                    .header("Content-Type", "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();

        assert_eq!(err.code, "INVALID_RADIUS");
    }

    #[tokio::test]
    async fn test_locations_provider_failure_still_ok() {
        // Provider points at a dead port; the endpoint still answers 200
        // with the failure recorded in `errors`.
        let mut registry = ProviderRegistry::new();
        registry.register(Provider::Mcdonalds(McDonalds::with_base_url(
            "http://127.0.0.1:1/locator",
        )));
        let state = Arc::new(AppState::new(Config::default(), registry));
        let app = create_router(state);

        let request_body = serde_json::json!({
            "lat": 40.8768,
            "lng": -73.3246
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/locations")
                    .header("Content-Type", "application/json")
                    .body(Body::from(request_body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let result: AggregateResult = serde_json::from_slice(&body).unwrap();

        assert!(result.locations.is_empty());
        assert_eq!(result.errors.len(), 1);
    }
}
