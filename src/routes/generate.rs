use crate::constants::MAX_MARKER_COUNT;
use crate::error::{AppError, Result};
use crate::models::route::{GenerateRouteRequest, LocationInput, RouteResponse};
use crate::models::{Coordinates, RouteRequest, RouteShape, RouteSummary};
use crate::services::providers::Geocoder;
use crate::services::route_generator;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /routes
/// Generate a circular, out-and-back or point-to-point running route
pub async fn create_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRouteRequest>,
) -> Result<Json<RouteResponse>> {
    let marker_count = request
        .marker_count
        .unwrap_or(state.route_generator.config().marker_count);
    if !(2..=MAX_MARKER_COUNT).contains(&marker_count) {
        return Err(AppError::InvalidRequest(format!(
            "marker_count must be between 2 and {}",
            MAX_MARKER_COUNT
        )));
    }

    let start = resolve_location(&state, &request.start).await?;

    // Circular routes never use an end; an end on the start is a round trip
    let end = match (&request.end, request.shape) {
        (Some(input), RouteShape::OutAndBack | RouteShape::PointToPoint) => {
            let end = resolve_location(&state, input).await?;
            (!end.same_place(&start)).then_some(end)
        }
        _ => None,
    };

    // A one-way course that ends where it starts is run as a loop
    let shape = match (request.shape, end) {
        (RouteShape::PointToPoint, None) if request.end.is_some() => {
            tracing::info!("Point-to-point end coincides with start, generating a loop instead");
            RouteShape::Circular
        }
        (shape, _) => shape,
    };

    tracing::info!(
        shape = %shape,
        start = %request.start,
        has_end = end.is_some(),
        distance_km = ?request.distance_km,
        "Route request: {} from '{}'",
        shape, request.start
    );

    let route_request = RouteRequest {
        center: start,
        target_distance_km: request.distance_km.unwrap_or(0.0),
        shape,
        end,
    };

    let mut rng = state.route_generator.rng();
    let route = state
        .route_generator
        .generate(&route_request, &mut rng)
        .await?;

    let markers = route_generator::markers(&route.coords, route.shape, marker_count);
    let summary = RouteSummary::from_route(&route);

    let label = match (&request.end, end) {
        (Some(end_input), Some(_)) => format!("{} → {}", request.start, end_input),
        _ => shape.label().to_string(),
    };

    Ok(Json(RouteResponse {
        label,
        route,
        markers,
        summary,
    }))
}

async fn resolve_location(state: &AppState, input: &LocationInput) -> Result<Coordinates> {
    match input {
        LocationInput::Point(point) => {
            point.validate().map_err(AppError::InvalidRequest)?;
            Ok(*point)
        }
        LocationInput::Query(text) => state.geocoder.search(text).await,
    }
}
