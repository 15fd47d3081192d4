use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use pollenpal_core::{advise, AdviceReport, Coordinates, DayEntry, DetailedBreakdown, PollenRecord};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct PollenQuery {
    country: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct CurrentView {
    location: String,
    #[serde(serialize_with = "pollenpal_core::types::serialize_current_day")]
    current_day: Option<DayEntry>,
    coordinates: Coordinates,
}

#[derive(Debug, Serialize)]
pub(super) struct ForecastView {
    location: String,
    forecast: Vec<DayEntry>,
    coordinates: Coordinates,
}

#[derive(Debug, Serialize)]
pub(super) struct DetailedView {
    location: String,
    detailed_breakdown: DetailedBreakdown,
    #[serde(serialize_with = "pollenpal_core::types::serialize_current_day")]
    current_day: Option<DayEntry>,
    coordinates: Coordinates,
}

/// Fetches and extracts the record for `city`, mapping transport failures to
/// 500 and an empty upstream body to 404.
async fn load_record(
    state: &AppState,
    req_id: &RequestId,
    city: &str,
    query: &PollenQuery,
) -> Result<PollenRecord, ApiError> {
    let country = query
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(&*state.default_country);

    match state.client.fetch_record(city, country).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(ApiError::not_found(format!(
            "No pollen data found for '{city}'. Please check the location and try again."
        ))),
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                city,
                country,
                error = %e,
                "pollen fetch failed"
            );
            Err(ApiError::internal(format!("Error fetching data: {e}")))
        }
    }
}

pub(super) async fn get_pollen(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(city): Path<String>,
    Query(query): Query<PollenQuery>,
) -> Result<Json<PollenRecord>, ApiError> {
    let record = load_record(&state, &req_id, &city, &query).await?;
    Ok(Json(record))
}

pub(super) async fn get_current(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(city): Path<String>,
    Query(query): Query<PollenQuery>,
) -> Result<Json<CurrentView>, ApiError> {
    let record = load_record(&state, &req_id, &city, &query).await?;
    let data = CurrentView {
        location: record.location,
        current_day: record.current_day,
        coordinates: record.coordinates,
    };
    Ok(Json(data))
}

pub(super) async fn get_forecast(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(city): Path<String>,
    Query(query): Query<PollenQuery>,
) -> Result<Json<ForecastView>, ApiError> {
    let record = load_record(&state, &req_id, &city, &query).await?;
    let data = ForecastView {
        location: record.location,
        forecast: record.forecast,
        coordinates: record.coordinates,
    };
    Ok(Json(data))
}

pub(super) async fn get_advice(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(city): Path<String>,
    Query(query): Query<PollenQuery>,
) -> Result<Json<AdviceReport>, ApiError> {
    let record = load_record(&state, &req_id, &city, &query).await?;
    Ok(Json(advise(Some(&record))))
}

pub(super) async fn get_detailed(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(city): Path<String>,
    Query(query): Query<PollenQuery>,
) -> Result<Json<DetailedView>, ApiError> {
    let record = load_record(&state, &req_id, &city, &query).await?;
    let data = DetailedView {
        location: record.location,
        detailed_breakdown: record.detailed_breakdown,
        current_day: record.current_day,
        coordinates: record.coordinates,
    };
    Ok(Json(data))
}
