use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_OSRM_BASE_URL};
use crate::error::{AppError, Result};
use crate::models::route::Maneuver;
use crate::models::{Coordinates, PathSegment, RouteStep, RoutingProfile};
use crate::services::providers::RoutingProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OsrmClient {
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_OSRM_BASE_URL.to_string(),
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECONDS),
        )
    }

    pub fn with_config(base_url: String, timeout: Duration) -> Self {
        OsrmClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn route_url(&self, profile: RoutingProfile, start: &Coordinates, end: &Coordinates) -> String {
        // OSRM takes "lon,lat;lon,lat"
        format!(
            "{}/{}/{},{};{},{}",
            self.base_url,
            profile.osrm_profile(),
            start.lon,
            start.lat,
            end.lon,
            end.lat
        )
    }

    /// Get a single routed leg between two points
    pub async fn get_route(
        &self,
        profile: RoutingProfile,
        start: &Coordinates,
        end: &Coordinates,
    ) -> Result<PathSegment> {
        let url = self.route_url(profile, start, end);

        tracing::debug!(
            profile = %profile,
            "OSRM request: ({:.5}, {:.5}) -> ({:.5}, {:.5})",
            start.lat, start.lon, end.lat, end.lon
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::RoutingApi("Request timed out".to_string())
                } else {
                    AppError::RoutingApi(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                profile = %profile,
                "OSRM HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::RoutingApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: OsrmRouteResponse = response
            .json()
            .await
            .map_err(|e| AppError::RoutingApi(format!("Failed to parse response: {}", e)))?;

        let segment = body.into_segment()?;
        tracing::debug!(
            profile = %profile,
            path_points = segment.coords.len(),
            steps = segment.steps.len(),
            "OSRM response: {} path points, {} steps",
            segment.coords.len(), segment.steps.len()
        );
        Ok(segment)
    }
}

impl Default for OsrmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoutingProvider for OsrmClient {
    async fn route(
        &self,
        profile: RoutingProfile,
        start: &Coordinates,
        end: &Coordinates,
    ) -> Result<PathSegment> {
        self.get_route(profile, start, end).await
    }

    fn name(&self) -> &'static str {
        "osrm"
    }
}

// OSRM API response types

#[derive(Debug, Deserialize)]
pub struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>, // [lon, lat] pairs
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    #[serde(default)]
    name: String,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    mode: String,
    maneuver: OsrmManeuver,
}

#[derive(Debug, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    modifier: Option<String>,
    location: [f64; 2],
}

impl OsrmRouteResponse {
    /// Keep the first route, flipping every position to `(lat, lon)`
    pub fn into_segment(self) -> Result<PathSegment> {
        if self.code != "Ok" {
            return Err(AppError::RoutingApi(format!(
                "OSRM returned {}: {}",
                self.code,
                self.message.unwrap_or_default()
            )));
        }

        let route = self
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| AppError::RoutingApi("No routes found".to_string()))?;

        let coords: Vec<Coordinates> = route
            .geometry
            .coordinates
            .iter()
            .filter_map(|c| Coordinates::new(c[1], c[0]).ok())
            .collect();

        if coords.is_empty() {
            return Err(AppError::RoutingApi("Route has no geometry".to_string()));
        }

        let steps = route
            .legs
            .into_iter()
            .next()
            .map(|leg| leg.steps)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|step| {
                let location =
                    Coordinates::new(step.maneuver.location[1], step.maneuver.location[0]).ok()?;
                Some(RouteStep {
                    name: step.name,
                    distance_m: step.distance,
                    duration_s: step.duration,
                    mode: step.mode,
                    maneuver: Maneuver {
                        kind: step.maneuver.kind,
                        modifier: step.maneuver.modifier,
                        location,
                    },
                })
            })
            .collect();

        Ok(PathSegment { coords, steps })
    }
}
