use crate::constants::MAX_MARKER_COUNT;
use crate::error::{AppError, Result};
use crate::models::route::{
    validate_path, MarkersRequest, MarkersResponse, MeasureRequest, MeasureResponse,
    SnapshotRequest,
};
use crate::models::snapshot::SnapshotResponse;
use crate::models::{Route, RouteSnapshot};
use crate::services::route_generator;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /routes/measure
pub async fn measure_route(Json(request): Json<MeasureRequest>) -> Result<Json<MeasureResponse>> {
    validate_path(&request.coords).map_err(AppError::InvalidRequest)?;

    Ok(Json(MeasureResponse {
        distance_km: route_generator::measure(&request.coords),
    }))
}

/// POST /routes/markers
/// Place progress markers on an existing path without routing it again
pub async fn place_markers(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MarkersRequest>,
) -> Result<Json<MarkersResponse>> {
    validate_path(&request.coords).map_err(AppError::InvalidRequest)?;

    let count = request
        .count
        .unwrap_or(state.route_generator.config().marker_count);
    if count > MAX_MARKER_COUNT {
        return Err(AppError::InvalidRequest(format!(
            "count must be at most {}",
            MAX_MARKER_COUNT
        )));
    }

    Ok(Json(MarkersResponse {
        markers: route_generator::markers(&request.coords, request.shape, count),
    }))
}

/// POST /routes/snapshot
pub async fn create_snapshot(
    Json(request): Json<SnapshotRequest>,
) -> Result<Json<SnapshotResponse>> {
    let posted = request.route;
    validate_path(&posted.coords).map_err(AppError::InvalidRequest)?;
    if posted.coords.len() < 2 {
        return Err(AppError::InvalidRequest(
            "route needs at least two coordinates".to_string(),
        ));
    }

    let label = request
        .label
        .filter(|label| !label.trim().is_empty())
        .unwrap_or_else(|| posted.shape.label().to_string());

    // Distance always comes from the coordinates themselves
    let failed_legs = posted.failed_legs;
    let route = Route {
        distance_km: route_generator::measure(&posted.coords),
        ..posted
    }
    .with_failed_legs(failed_legs);

    let snapshot = RouteSnapshot::new(route, label)
        .map_err(|e| AppError::Internal(format!("Failed to format timestamp: {}", e)))?;
    let geojson = snapshot.to_geojson();

    tracing::debug!(
        id = %snapshot.id,
        points = snapshot.route.coords.len(),
        "Snapshot created: {}",
        snapshot.label
    );

    Ok(Json(SnapshotResponse { snapshot, geojson }))
}
