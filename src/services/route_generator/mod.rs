pub mod geometry;
pub mod markers;
mod segment_resolver;
mod stitcher;
mod waypoint_planner;

use crate::config::RouteGeneratorConfig;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Marker, Route, RouteRequest, RouteShape};
use crate::services::providers::{PoiProvider, RoutingProvider};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub use segment_resolver::SegmentResolver;
pub use stitcher::{synthetic_turnaround, RouteStitcher, StitchedPath};
pub use waypoint_planner::{interleave_parks, LoopPlan, WaypointPlanner};

/// Route synthesis entry point: plan, stitch, measure
pub struct RouteGenerator {
    planner: WaypointPlanner,
    stitcher: RouteStitcher,
    config: RouteGeneratorConfig,
}

impl RouteGenerator {
    pub fn new(
        routing_provider: Arc<dyn RoutingProvider>,
        poi_provider: Option<Arc<dyn PoiProvider>>,
        config: RouteGeneratorConfig,
    ) -> Self {
        let resolver = SegmentResolver::new(routing_provider, config.leg_timeout());
        let stitcher = RouteStitcher::new(resolver, config.allow_mixed_profile);
        let planner = WaypointPlanner::new(poi_provider, config.clone());

        RouteGenerator {
            planner,
            stitcher,
            config,
        }
    }

    pub fn config(&self) -> &RouteGeneratorConfig {
        &self.config
    }

    /// Random source for one generation: seeded when configured, OS entropy otherwise
    pub fn rng(&self) -> StdRng {
        match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Synthesize a route for `request`.
    ///
    /// Circular requests tolerate individual leg failures (the result is then
    /// flagged `degraded`); out-and-back and point-to-point fail as soon as
    /// their single required leg cannot be routed.
    pub async fn generate<R: Rng + ?Sized>(
        &self,
        request: &RouteRequest,
        rng: &mut R,
    ) -> Result<Route> {
        request.validate().map_err(AppError::InvalidRequest)?;

        tracing::info!(
            shape = %request.shape,
            lat = request.center.lat,
            lon = request.center.lon,
            target_km = request.target_distance_km,
            "Generating {} route from ({:.5}, {:.5})",
            request.shape, request.center.lat, request.center.lon
        );

        let stitched = match request.shape {
            RouteShape::Circular => {
                let waypoints = self
                    .planner
                    .plan(&request.center, request.target_distance_km, rng)
                    .await;
                self.stitcher.circular(&request.center, &waypoints).await?
            }
            RouteShape::OutAndBack => {
                let turnaround = match request.end {
                    Some(end) => end,
                    None => synthetic_turnaround(&request.center, request.target_distance_km)?,
                };
                self.stitcher
                    .out_and_back(&request.center, &turnaround)
                    .await?
            }
            RouteShape::PointToPoint => {
                let end = request.end.ok_or_else(|| {
                    AppError::InvalidRequest(
                        "point-to-point routes require an end location".to_string(),
                    )
                })?;
                self.stitcher.point_to_point(&request.center, &end).await?
            }
        };

        let distance_km = measure(&stitched.coords);
        let route = Route::new(request.shape, distance_km, stitched.coords, stitched.steps)
            .with_failed_legs(stitched.failed_legs);

        tracing::info!(
            shape = %route.shape,
            distance_km = %format!("{:.2}", route.distance_km),
            points = route.coords.len(),
            degraded = route.degraded,
            "Route generated: {:.2}km, {} points",
            route.distance_km, route.coords.len()
        );

        Ok(route)
    }
}

/// Realized length of a path in kilometers
pub fn measure(coords: &[Coordinates]) -> f64 {
    geometry::total_distance(coords)
}

/// Progress markers for a path; usable on reloaded routes without re-routing
pub fn markers(coords: &[Coordinates], shape: RouteShape, count: usize) -> Vec<Marker> {
    markers::place_markers(coords, shape, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoRoute;

    #[async_trait::async_trait]
    impl RoutingProvider for NoRoute {
        async fn route(
            &self,
            _profile: crate::models::RoutingProfile,
            _start: &Coordinates,
            _end: &Coordinates,
        ) -> Result<crate::models::PathSegment> {
            Err(AppError::RoutingApi("offline".to_string()))
        }

        fn name(&self) -> &'static str {
            "none"
        }
    }

    fn generator(seed: Option<u64>) -> RouteGenerator {
        let config = RouteGeneratorConfig {
            random_seed: seed,
            ..RouteGeneratorConfig::default()
        };
        RouteGenerator::new(Arc::new(NoRoute), None, config)
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let generator = generator(Some(5));
        let a: u64 = generator.rng().random();
        let b: u64 = generator.rng().random();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_routing() {
        let center = Coordinates::new(37.5, 127.0).unwrap();
        let request = RouteRequest::circular(center, 0.0);
        let result = generator(None)
            .generate(&request, &mut StdRng::seed_from_u64(1))
            .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_unreachable_point_to_point_is_routing_unavailable() {
        let request = RouteRequest::point_to_point(
            Coordinates::new(37.5, 127.0).unwrap(),
            Coordinates::new(37.51, 127.01).unwrap(),
        );
        let result = generator(None)
            .generate(&request, &mut StdRng::seed_from_u64(1))
            .await;
        assert!(matches!(result, Err(AppError::RoutingUnavailable(_))));
    }

    #[test]
    fn test_measure_and_markers_on_saved_path() {
        let coords = vec![
            Coordinates::new(37.5, 127.0).unwrap(),
            Coordinates::new(37.51, 127.0).unwrap(),
        ];
        assert!((measure(&coords) - 1.112).abs() < 0.01);
        assert_eq!(markers(&coords, RouteShape::Circular, 10).len(), 10);
    }
}
