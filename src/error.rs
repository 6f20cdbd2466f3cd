use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Location not found: {0}")]
    GeocodeNotFound(String),

    #[error("Geocoding API error: {0}")]
    GeocodingApi(String),

    #[error("Routing API error: {0}")]
    RoutingApi(String),

    #[error("Overpass API error: {0}")]
    OverpassApi(String),

    /// Every routing profile failed for a leg the shape cannot do without.
    #[error("Routing unavailable: {0}")]
    RoutingUnavailable(String),

    /// Stitching finished without a usable coordinate sequence.
    #[error("Empty route: {0}")]
    EmptyRoute(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::GeocodeNotFound(ref e) => {
                tracing::info!("Geocode miss: {}", e);
                (StatusCode::NOT_FOUND, e.as_str())
            }
            AppError::GeocodingApi(ref e) => {
                tracing::error!("Geocoding API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Geocoding service error")
            }
            AppError::RoutingApi(ref e) => {
                tracing::error!("Routing API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::OverpassApi(ref e) => {
                tracing::error!("Overpass API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Points-of-interest service error")
            }
            AppError::RoutingUnavailable(ref e) => {
                tracing::warn!("Routing unavailable: {}", e);
                (StatusCode::BAD_GATEWAY, e.as_str())
            }
            AppError::EmptyRoute(ref e) => {
                tracing::warn!("Empty route: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.as_str())
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::GeocodeNotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::RoutingUnavailable("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::EmptyRoute("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
