use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Report service status and geocode cache usage
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let config = state.route_generator.config();
    let cache = state.geocoder.stats().await;

    Json(json!({
        "status": "ok",
        "checks": {
            "geocode_cache": cache,
            "route_generator": {
                "allow_mixed_profile": config.allow_mixed_profile,
                "park_enrichment": config.park_enrichment,
                "waypoint_count": config.waypoint_count,
                "seeded": config.random_seed.is_some(),
            }
        }
    }))
}
