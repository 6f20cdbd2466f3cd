use super::geometry::km_to_degrees;
use super::segment_resolver::SegmentResolver;
use crate::constants::{TURNAROUND_LAT_FACTOR, TURNAROUND_LON_FACTOR};
use crate::error::{AppError, Result};
use crate::models::{Coordinates, RouteStep};

/// Concatenated legs before distance measurement
#[derive(Debug, Clone, Default)]
pub struct StitchedPath {
    pub coords: Vec<Coordinates>,
    pub steps: Vec<RouteStep>,
    /// Circular legs that could not be routed and were skipped
    pub failed_legs: usize,
}

/// Drives the resolver leg by leg and composes one continuous path per shape
pub struct RouteStitcher {
    resolver: SegmentResolver,
    allow_mixed_profile: bool,
}

impl RouteStitcher {
    pub fn new(resolver: SegmentResolver, allow_mixed_profile: bool) -> Self {
        Self {
            resolver,
            allow_mixed_profile,
        }
    }

    /// Visit every waypoint in order and close back at `center`.
    ///
    /// Legs run strictly in sequence because each leg starts where the last
    /// successful one ended. A failed leg is skipped and the next waypoint is
    /// approached from the last position actually reached; the loop only fails
    /// when no leg succeeds at all.
    pub async fn circular(
        &self,
        center: &Coordinates,
        waypoints: &[Coordinates],
    ) -> Result<StitchedPath> {
        let mut path = StitchedPath::default();
        let mut current = *center;

        let targets = waypoints.iter().chain(std::iter::once(center));
        let leg_count = waypoints.len() + 1;

        for (leg, target) in targets.enumerate() {
            match self
                .resolver
                .resolve(&current, target, self.allow_mixed_profile)
                .await
            {
                Some(segment) => {
                    path.coords.extend(segment.coords);
                    path.steps.extend(segment.steps);
                    current = *target;
                }
                None => {
                    path.failed_legs += 1;
                    tracing::warn!(
                        leg = leg + 1,
                        legs = leg_count,
                        "Loop leg {}/{} failed, continuing from last reached point",
                        leg + 1,
                        leg_count
                    );
                }
            }
        }

        if path.coords.len() < 2 {
            return Err(AppError::EmptyRoute(format!(
                "none of the {} loop legs could be routed",
                leg_count
            )));
        }

        if path.failed_legs > 0 {
            tracing::warn!(
                failed_legs = path.failed_legs,
                legs = leg_count,
                "Loop is degraded: {} of {} legs skipped",
                path.failed_legs,
                leg_count
            );
        }

        Ok(path)
    }

    /// Route out to `turnaround` and mirror the outbound geometry for the way back.
    /// Steps are those of the outbound leg only.
    pub async fn out_and_back(
        &self,
        start: &Coordinates,
        turnaround: &Coordinates,
    ) -> Result<StitchedPath> {
        let outbound = self
            .resolver
            .resolve(start, turnaround, self.allow_mixed_profile)
            .await
            .ok_or_else(|| {
                AppError::RoutingUnavailable("no path to the turnaround point".to_string())
            })?;

        let mut coords = outbound.coords;
        let back: Vec<Coordinates> = coords.iter().rev().copied().collect();
        coords.extend(back);

        Ok(StitchedPath {
            coords,
            steps: outbound.steps,
            failed_legs: 0,
        })
    }

    /// Exactly one leg from `start` to `end`
    pub async fn point_to_point(
        &self,
        start: &Coordinates,
        end: &Coordinates,
    ) -> Result<StitchedPath> {
        let segment = self
            .resolver
            .resolve(start, end, self.allow_mixed_profile)
            .await
            .ok_or_else(|| {
                AppError::RoutingUnavailable("no path between start and end".to_string())
            })?;

        if segment.coords.len() < 2 {
            return Err(AppError::EmptyRoute(
                "routing returned a single point".to_string(),
            ));
        }

        Ok(StitchedPath {
            coords: segment.coords,
            steps: segment.steps,
            failed_legs: 0,
        })
    }
}

/// Turnaround for an out-and-back without an explicit end: half the target
/// distance away along a fixed north-east-ish offset
pub fn synthetic_turnaround(center: &Coordinates, target_distance_km: f64) -> Result<Coordinates> {
    let half_deg = km_to_degrees(target_distance_km / 2.0);
    let lat = center.lat + TURNAROUND_LAT_FACTOR * half_deg;
    let lon = center.lon + TURNAROUND_LON_FACTOR * half_deg;

    Coordinates::new(lat, lon)
        .map_err(|e| AppError::InvalidRequest(format!("turnaround point out of range: {}", e)))
}
