use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_NOMINATIM_BASE_URL, DEFAULT_USER_AGENT};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::providers::Geocoder;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
    user_agent: String,
    timeout: Duration,
}

impl NominatimClient {
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_NOMINATIM_BASE_URL.to_string(),
            DEFAULT_USER_AGENT.to_string(),
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
        )
    }

    pub fn with_config(base_url: String, user_agent: String, timeout: Duration) -> Self {
        NominatimClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent,
            timeout,
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .header(header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::GeocodingApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::GeocodingApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::GeocodingApi(format!("Failed to parse response: {}", e)))
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Coordinates> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidRequest("Location text is empty".to_string()));
        }

        let places: Vec<NominatimPlace> = self
            .get(
                "search",
                &[
                    ("format", "json".to_string()),
                    ("q", query.to_string()),
                    ("limit", "1".to_string()),
                    ("addressdetails", "1".to_string()),
                ],
            )
            .await?;

        let coordinates = first_coordinates(places)?
            .ok_or_else(|| AppError::GeocodeNotFound(format!("No match for '{}'", query)))?;

        tracing::debug!(
            query = query,
            lat = coordinates.lat,
            lon = coordinates.lon,
            "Geocoded '{}' to ({:.5}, {:.5})",
            query, coordinates.lat, coordinates.lon
        );
        Ok(coordinates)
    }

    async fn reverse(&self, at: &Coordinates) -> Result<Option<String>> {
        let place: NominatimReverse = self
            .get(
                "reverse",
                &[
                    ("format", "json".to_string()),
                    ("lat", at.lat.to_string()),
                    ("lon", at.lon.to_string()),
                    ("zoom", "18".to_string()),
                    ("addressdetails", "1".to_string()),
                ],
            )
            .await?;

        Ok(place.display_name)
    }
}

// Nominatim API response types

#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    // Nominatim encodes coordinates as strings
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    #[serde(default)]
    display_name: Option<String>,
}

/// Parse the first search hit, `None` when the result list is empty
pub fn first_coordinates(places: Vec<NominatimPlace>) -> Result<Option<Coordinates>> {
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let lat: f64 = place
        .lat
        .parse()
        .map_err(|_| AppError::GeocodingApi(format!("Invalid latitude '{}'", place.lat)))?;
    let lon: f64 = place
        .lon
        .parse()
        .map_err(|_| AppError::GeocodingApi(format!("Invalid longitude '{}'", place.lon)))?;

    Coordinates::new(lat, lon)
        .map(Some)
        .map_err(AppError::GeocodingApi)
}
