use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::providers::Geocoder;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct ReverseResponse {
    pub label: Option<String>,
}

/// GET /geocode?q=
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<Coordinates>> {
    let coordinates = state.geocoder.search(&query.q).await?;
    Ok(Json(coordinates))
}

/// GET /geocode/reverse?lat=&lon=
pub async fn reverse(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<ReverseResponse>> {
    let at = Coordinates::new(query.lat, query.lon).map_err(AppError::InvalidRequest)?;
    let label = state.geocoder.reverse(&at).await?;
    Ok(Json(ReverseResponse { label }))
}
