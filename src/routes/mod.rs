pub mod debug;
pub mod generate;
pub mod geocode;
pub mod measure;

use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes", post(generate::create_route))
        .route("/routes/measure", post(measure::measure_route))
        .route("/routes/markers", post(measure::place_markers))
        .route("/routes/snapshot", post(measure::create_snapshot))
        .route("/geocode", get(geocode::search))
        .route("/geocode/reverse", get(geocode::reverse))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
