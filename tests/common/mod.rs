use async_trait::async_trait;
use runcourse::config::RouteGeneratorConfig;
use runcourse::models::{Coordinates, Park, PathSegment, RouteStep, RoutingProfile};
use runcourse::models::route::Maneuver;
use runcourse::services::providers::{Geocoder, PoiProvider, RoutingProvider};
use runcourse::{AppError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded routing attempt
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(dead_code)]
pub struct RouteCall {
    pub profile: RoutingProfile,
    pub start: Coordinates,
    pub end: Coordinates,
}

/// Routes every leg as a straight three-point line and records each attempt.
/// Profiles and individual attempts can be made to fail.
#[derive(Default)]
pub struct LineRouter {
    calls: Mutex<Vec<RouteCall>>,
    failing_profiles: Vec<RoutingProfile>,
    failing_attempts: Vec<usize>,
    unreachable: bool,
}

#[allow(dead_code)]
impl LineRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_profile(mut self, profile: RoutingProfile) -> Self {
        self.failing_profiles.push(profile);
        self
    }

    /// Fail the attempt with this 0-based position in the call log
    pub fn failing_attempt(mut self, index: usize) -> Self {
        self.failing_attempts.push(index);
        self
    }

    pub fn unreachable() -> Self {
        LineRouter {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RouteCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[allow(dead_code)]
pub fn midpoint(a: &Coordinates, b: &Coordinates) -> Coordinates {
    Coordinates::new((a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0).unwrap()
}

#[async_trait]
impl RoutingProvider for LineRouter {
    async fn route(
        &self,
        profile: RoutingProfile,
        start: &Coordinates,
        end: &Coordinates,
    ) -> Result<PathSegment> {
        let attempt = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RouteCall {
                profile,
                start: *start,
                end: *end,
            });
            calls.len() - 1
        };

        if self.unreachable
            || self.failing_profiles.contains(&profile)
            || self.failing_attempts.contains(&attempt)
        {
            return Err(AppError::RoutingApi(format!("no {} route", profile)));
        }

        let step = RouteStep {
            name: "Test Street".to_string(),
            distance_m: start.distance_to(end) * 1000.0,
            duration_s: 60.0,
            mode: profile.osrm_profile().to_string(),
            maneuver: Maneuver {
                kind: "depart".to_string(),
                modifier: None,
                location: *start,
            },
        };

        Ok(PathSegment {
            coords: vec![*start, midpoint(start, end), *end],
            steps: vec![step],
        })
    }

    fn name(&self) -> &'static str {
        "line"
    }
}

#[allow(dead_code)]
pub struct StaticParks(pub Vec<Park>);

#[async_trait]
impl PoiProvider for StaticParks {
    async fn nearby_parks(
        &self,
        _center: &Coordinates,
        _radius_km: f64,
        limit: usize,
    ) -> Result<Vec<Park>> {
        Ok(self.0.iter().take(limit).cloned().collect())
    }
}

#[allow(dead_code)]
pub struct FailingParks;

#[async_trait]
impl PoiProvider for FailingParks {
    async fn nearby_parks(
        &self,
        _center: &Coordinates,
        _radius_km: f64,
        _limit: usize,
    ) -> Result<Vec<Park>> {
        Err(AppError::OverpassApi("Overpass returned status 504".to_string()))
    }
}

/// Geocoder over a fixed gazetteer
#[derive(Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinates>,
    lookups: Mutex<usize>,
}

#[allow(dead_code)]
impl StaticGeocoder {
    pub fn new(places: &[(&str, Coordinates)]) -> Self {
        StaticGeocoder {
            places: places
                .iter()
                .map(|(name, at)| (name.to_string(), *at))
                .collect(),
            lookups: Mutex::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap()
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn search(&self, query: &str) -> Result<Coordinates> {
        *self.lookups.lock().unwrap() += 1;
        self.places
            .get(query)
            .copied()
            .ok_or_else(|| AppError::GeocodeNotFound(query.to_string()))
    }

    async fn reverse(&self, at: &Coordinates) -> Result<Option<String>> {
        Ok(self
            .places
            .iter()
            .find(|(_, place)| place.same_place(at))
            .map(|(name, _)| name.clone()))
    }
}

#[allow(dead_code)]
pub fn seoul() -> Coordinates {
    Coordinates::new(37.5, 127.0).unwrap()
}

/// Generator settings for tests: seeded, no park lookup unless a provider is given
#[allow(dead_code)]
pub fn test_config(seed: u64) -> RouteGeneratorConfig {
    RouteGeneratorConfig {
        random_seed: Some(seed),
        leg_timeout_secs: 2,
        ..RouteGeneratorConfig::default()
    }
}

/// Real-network tests only run when explicitly requested
#[allow(dead_code)]
pub fn should_run_real_api_tests() -> bool {
    std::env::var("RUN_REAL_API_TESTS").is_ok()
}
