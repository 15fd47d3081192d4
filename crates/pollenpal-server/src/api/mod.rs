mod pollen;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use pollenpal_scraper::PollenClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<PollenClient>,
    /// Country form value used when a request omits `?country=`.
    pub default_country: Arc<str>,
}

impl AppState {
    pub fn new(client: PollenClient, default_country: impl Into<Arc<str>>) -> Self {
        Self {
            client: Arc::new(client),
            default_country: default_country.into(),
        }
    }
}

/// Error body: `{"detail": "..."}` with the status carried separately.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ApiInfo {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    /// Path to description.
    endpoints: BTreeMap<&'static str, &'static str>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/health", get(health))
        .route("/pollen/{city}", get(pollen::get_pollen))
        .route("/pollen/{city}/current", get(pollen::get_current))
        .route("/pollen/{city}/forecast", get(pollen::get_forecast))
        .route("/pollen/{city}/advice", get(pollen::get_advice))
        .route("/pollen/{city}/detailed", get(pollen::get_detailed))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn info() -> Json<ApiInfo> {
    let endpoints = BTreeMap::from([
        ("/pollen/{city}", "Get current pollen data for a city"),
        ("/pollen/{city}/current", "Get today's pollen levels only"),
        ("/pollen/{city}/forecast", "Get 5-day pollen forecast"),
        ("/pollen/{city}/advice", "Get health advice based on pollen levels"),
        ("/pollen/{city}/detailed", "Get detailed breakdown by pollen type"),
        ("/health", "Health check"),
    ]);
    Json(ApiInfo {
        name: "PollenPal API",
        version: env!("CARGO_PKG_VERSION"),
        description: "UK Pollen Tracking API",
        endpoints,
    })
}

async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
