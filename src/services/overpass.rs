use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_OVERPASS_URL, OVERPASS_QUERY_TIMEOUT_SECONDS,
    UNNAMED_PARK,
};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Park};
use crate::services::providers::PoiProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl OverpassClient {
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_OVERPASS_URL.to_string(),
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
        )
    }

    pub fn with_config(endpoint: String, timeout: Duration) -> Self {
        OverpassClient {
            client: Client::new(),
            endpoint,
            timeout,
        }
    }

    /// Build Overpass QL for parks (ways and relations) around a point
    fn build_park_query(center: &Coordinates, radius_meters: f64) -> String {
        let around = format!(
            "(around:{:.0},{},{})",
            radius_meters, center.lat, center.lon
        );
        format!(
            "[out:json][timeout:{}];(way[\"leisure\"=\"park\"]{around};relation[\"leisure\"=\"park\"]{around};);out center;",
            OVERPASS_QUERY_TIMEOUT_SECONDS
        )
    }

    /// Query parks within a radius from a center point
    pub async fn query_parks(
        &self,
        center: &Coordinates,
        radius_meters: f64,
        limit: usize,
    ) -> Result<Vec<Park>> {
        let query = Self::build_park_query(center, radius_meters);
        tracing::debug!("Overpass park query: {}", query);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(format!("data={}", urlencoding::encode(&query)))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::OverpassApi("Request timed out".to_string())
                } else {
                    AppError::OverpassApi(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::OverpassApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let api_response: OverpassResponse = response
            .json()
            .await
            .map_err(|e| AppError::OverpassApi(format!("Failed to parse response: {}", e)))?;

        let parks = api_response.into_parks(limit);
        tracing::debug!(count = parks.len(), "Overpass returned {} parks", parks.len());
        Ok(parks)
    }
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PoiProvider for OverpassClient {
    async fn nearby_parks(
        &self,
        center: &Coordinates,
        radius_km: f64,
        limit: usize,
    ) -> Result<Vec<Park>> {
        self.query_parks(center, radius_km * 1000.0, limit).await
    }
}

// Overpass API response types

#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(default)]
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassResponse {
    /// Elements without a computed center are dropped; order is preserved
    pub fn into_parks(self, limit: usize) -> Vec<Park> {
        self.elements
            .into_iter()
            .filter_map(|element| {
                let center = element.center?;
                let coordinates = Coordinates::new(center.lat, center.lon).ok()?;
                let name = element
                    .tags
                    .get("name")
                    .cloned()
                    .unwrap_or_else(|| UNNAMED_PARK.to_string());
                Some(Park::new(name, coordinates))
            })
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_park_query() {
        let center = Coordinates::new(37.5, 127.0).unwrap();
        let query = OverpassClient::build_park_query(&center, 634.6);

        assert!(query.starts_with("[out:json][timeout:10];"));
        assert!(query.contains("way[\"leisure\"=\"park\"](around:635,37.5,127)"));
        assert!(query.contains("relation[\"leisure\"=\"park\"](around:635,37.5,127)"));
        assert!(query.ends_with("out center;"));
    }

    #[test]
    fn test_into_parks_filters_and_limits() {
        let response: OverpassResponse = serde_json::from_value(json!({
            "elements": [
                { "type": "way", "id": 1, "center": { "lat": 37.51, "lon": 127.01 }, "tags": { "name": "Olympic Park" } },
                { "type": "way", "id": 2, "tags": { "name": "No center" } },
                { "type": "relation", "id": 3, "center": { "lat": 37.52, "lon": 127.02 } },
                { "type": "way", "id": 4, "center": { "lat": 37.53, "lon": 127.03 }, "tags": {} },
                { "type": "way", "id": 5, "center": { "lat": 37.54, "lon": 127.04 }, "tags": {} }
            ]
        }))
        .unwrap();

        let parks = response.into_parks(3);
        assert_eq!(parks.len(), 3);
        assert_eq!(parks[0].name, "Olympic Park");
        assert_eq!(parks[1].name, "Park");
        assert_eq!(parks[1].coordinates.lat, 37.52);
        assert_eq!(parks[2].coordinates.lat, 37.53);
    }
}
