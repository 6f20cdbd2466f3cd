use crate::constants::{ESTIMATED_PACE_KMH, KCAL_PER_KM, MAX_TARGET_DISTANCE_KM};
use crate::models::{Coordinates, Marker};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Overall form of a generated route
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteShape {
    /// Closed loop returning to the start
    #[default]
    Circular,
    /// Out to a turnaround point and back along the same path
    OutAndBack,
    /// One-way from start to end
    PointToPoint,
}

impl RouteShape {
    /// Short human-readable course name
    pub fn label(&self) -> &'static str {
        match self {
            RouteShape::Circular => "Loop course",
            RouteShape::OutAndBack => "Out-and-back course",
            RouteShape::PointToPoint => "One-way course",
        }
    }
}

impl fmt::Display for RouteShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteShape::Circular => write!(f, "circular"),
            RouteShape::OutAndBack => write!(f, "out-and-back"),
            RouteShape::PointToPoint => write!(f, "point-to-point"),
        }
    }
}

/// Travel mode requested from the routing service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProfile {
    Bike,
    Foot,
}

impl RoutingProfile {
    /// Profiles to try for one leg, in order
    pub fn fallback_chain(allow_mixed_profile: bool) -> &'static [RoutingProfile] {
        if allow_mixed_profile {
            &[RoutingProfile::Bike, RoutingProfile::Foot]
        } else {
            &[RoutingProfile::Foot]
        }
    }

    /// Returns the OSRM profile name for this mode
    pub fn osrm_profile(&self) -> &'static str {
        match self {
            RoutingProfile::Bike => "bike",
            RoutingProfile::Foot => "foot",
        }
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.osrm_profile())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Maneuver {
    /// e.g. "depart", "turn", "arrive"
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    pub location: Coordinates,
}

/// One instruction step of a routed leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteStep {
    pub name: String,
    pub distance_m: f64,
    pub duration_s: f64,
    pub mode: String,
    pub maneuver: Maneuver,
}

/// Result of a single routing call, in traversal order
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub coords: Vec<Coordinates>,
    pub steps: Vec<RouteStep>,
}

/// What the core needs to synthesize a route
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub center: Coordinates,
    pub target_distance_km: f64,
    pub shape: RouteShape,
    pub end: Option<Coordinates>,
}

impl RouteRequest {
    pub fn circular(center: Coordinates, target_distance_km: f64) -> Self {
        RouteRequest {
            center,
            target_distance_km,
            shape: RouteShape::Circular,
            end: None,
        }
    }

    pub fn out_and_back(center: Coordinates, target_distance_km: f64) -> Self {
        RouteRequest {
            center,
            target_distance_km,
            shape: RouteShape::OutAndBack,
            end: None,
        }
    }

    pub fn out_and_back_to(center: Coordinates, end: Coordinates) -> Self {
        RouteRequest {
            center,
            target_distance_km: 0.0,
            shape: RouteShape::OutAndBack,
            end: Some(end),
        }
    }

    pub fn point_to_point(center: Coordinates, end: Coordinates) -> Self {
        RouteRequest {
            center,
            target_distance_km: 0.0,
            shape: RouteShape::PointToPoint,
            end: Some(end),
        }
    }

    /// Whether `target_distance_km` drives the geometry of this request
    pub fn uses_target_distance(&self) -> bool {
        match self.shape {
            RouteShape::Circular => true,
            RouteShape::OutAndBack => self.end.is_none(),
            RouteShape::PointToPoint => false,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.center.validate()?;
        if let Some(end) = &self.end {
            end.validate()?;
        }

        if self.shape == RouteShape::PointToPoint && self.end.is_none() {
            return Err("point-to-point routes require an end location".to_string());
        }

        if self.uses_target_distance()
            && !(self.target_distance_km.is_finite()
                && self.target_distance_km > 0.0
                && self.target_distance_km <= MAX_TARGET_DISTANCE_KM)
        {
            return Err(format!(
                "distance_km must be greater than 0 and at most {}",
                MAX_TARGET_DISTANCE_KM
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub shape: RouteShape,
    /// Polyline in traversal order
    pub coords: Vec<Coordinates>,
    pub steps: Vec<RouteStep>,
    /// Haversine length of `coords`
    pub distance_km: f64,
    /// Some circular legs could not be routed and were skipped
    #[serde(default)]
    pub degraded: bool,
    #[serde(default)]
    pub failed_legs: usize,
}

impl Route {
    pub fn new(
        shape: RouteShape,
        distance_km: f64,
        coords: Vec<Coordinates>,
        steps: Vec<RouteStep>,
    ) -> Self {
        Route {
            id: Uuid::new_v4(),
            shape,
            coords,
            steps,
            distance_km,
            degraded: false,
            failed_legs: 0,
        }
    }

    pub fn with_failed_legs(mut self, failed_legs: usize) -> Self {
        self.failed_legs = failed_legs;
        self.degraded = failed_legs > 0;
        self
    }
}

/// Display figures derived from a finished route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    pub shape: RouteShape,
    pub course: String,
    /// Rounded to two decimals
    pub distance_km: f64,
    pub estimated_duration_minutes: u32,
    pub calories_kcal: u32,
    pub degraded: bool,
}

impl RouteSummary {
    pub fn from_route(route: &Route) -> Self {
        RouteSummary {
            shape: route.shape,
            course: route.shape.label().to_string(),
            distance_km: (route.distance_km * 100.0).round() / 100.0,
            estimated_duration_minutes: (route.distance_km / ESTIMATED_PACE_KMH * 60.0).round()
                as u32,
            calories_kcal: (route.distance_km * KCAL_PER_KM).round() as u32,
            degraded: route.degraded,
        }
    }
}

// Request/Response types for API endpoints

/// A location given either as coordinates or as free text to geocode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LocationInput {
    Point(Coordinates),
    Query(String),
}

impl fmt::Display for LocationInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationInput::Point(c) => write!(f, "{:.5}, {:.5}", c.lat, c.lon),
            LocationInput::Query(text) => f.write_str(text.trim()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRouteRequest {
    pub start: LocationInput,
    #[serde(default)]
    pub end: Option<LocationInput>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub shape: RouteShape,
    #[serde(default)]
    pub marker_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub label: String,
    pub route: Route,
    pub markers: Vec<Marker>,
    pub summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
pub struct MeasureRequest {
    pub coords: Vec<Coordinates>,
}

#[derive(Debug, Serialize)]
pub struct MeasureResponse {
    pub distance_km: f64,
}

#[derive(Debug, Deserialize)]
pub struct MarkersRequest {
    pub coords: Vec<Coordinates>,
    #[serde(default)]
    pub shape: RouteShape,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MarkersResponse {
    pub markers: Vec<Marker>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    pub route: Route,
    #[serde(default)]
    pub label: Option<String>,
}

/// Every coordinate of an incoming polyline must be in range
pub fn validate_path(coords: &[Coordinates]) -> Result<(), String> {
    coords.iter().try_for_each(Coordinates::validate)
}
