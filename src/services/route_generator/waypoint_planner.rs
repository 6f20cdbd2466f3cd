use super::geometry::{km_to_degrees, offset_by_bearing};
use crate::config::RouteGeneratorConfig;
use crate::constants::{
    LOOP_POINT_JITTER, LOOP_RADIUS_FACTOR, LOOP_RADIUS_VARIATION, PARK_SEARCH_RADIUS_FACTOR,
};
use crate::models::{Coordinates, Park};
use crate::services::providers::PoiProvider;
use rand::Rng;
use std::f64::consts::TAU;
use std::sync::Arc;

/// Irregular polygon of loop waypoints before any park enrichment
#[derive(Debug, Clone)]
pub struct LoopPlan {
    pub waypoints: Vec<Coordinates>,
    /// Loop radius after the whole-loop variation, before per-point jitter
    pub base_radius_km: f64,
}

/// Plans the intermediate targets of a circular route
pub struct WaypointPlanner {
    poi_provider: Option<Arc<dyn PoiProvider>>,
    config: RouteGeneratorConfig,
}

impl WaypointPlanner {
    pub fn new(poi_provider: Option<Arc<dyn PoiProvider>>, config: RouteGeneratorConfig) -> Self {
        Self {
            poi_provider,
            config,
        }
    }

    /// Draw an irregular polygon around `center` with a random overall scale,
    /// a random start bearing and per-point radius jitter.
    pub fn base_waypoints<R: Rng + ?Sized>(
        &self,
        center: &Coordinates,
        target_distance_km: f64,
        rng: &mut R,
    ) -> LoopPlan {
        let num_points = self.config.waypoint_count;

        let variation = rng.random_range(LOOP_RADIUS_VARIATION.0..LOOP_RADIUS_VARIATION.1);
        let base_radius_km = (target_distance_km / TAU) * LOOP_RADIUS_FACTOR * variation;
        let base_radius_deg = km_to_degrees(base_radius_km);
        let start_bearing = rng.random_range(0.0..TAU);

        let mut waypoints = Vec::with_capacity(num_points);
        for i in 0..num_points {
            let bearing = start_bearing + (i as f64 / num_points as f64) * TAU;
            let jitter = rng.random_range(LOOP_POINT_JITTER.0..LOOP_POINT_JITTER.1);
            let (lat, lon) = offset_by_bearing(center, base_radius_deg * jitter, bearing);

            match Coordinates::new(lat, lon) {
                Ok(waypoint) => waypoints.push(waypoint),
                Err(_) => {
                    tracing::warn!(
                        index = i,
                        lat = lat,
                        lon = lon,
                        "Loop waypoint {} out of range ({}, {}), skipping",
                        i, lat, lon
                    );
                }
            }
        }

        tracing::debug!(
            waypoints = waypoints.len(),
            base_radius_km = %format!("{:.3}", base_radius_km),
            "Planned {} loop waypoints (base radius {:.3}km)",
            waypoints.len(), base_radius_km
        );

        LoopPlan {
            waypoints,
            base_radius_km,
        }
    }

    /// Full waypoint sequence for a loop, parks woven in when available.
    /// Enrichment problems never abort planning.
    pub async fn plan<R: Rng + ?Sized>(
        &self,
        center: &Coordinates,
        target_distance_km: f64,
        rng: &mut R,
    ) -> Vec<Coordinates> {
        let plan = self.base_waypoints(center, target_distance_km, rng);
        let parks = self.nearby_parks(center, target_distance_km).await;
        interleave_parks(plan.waypoints, &parks)
    }

    async fn nearby_parks(&self, center: &Coordinates, target_distance_km: f64) -> Vec<Park> {
        if !self.config.park_enrichment || self.config.max_parks == 0 {
            return Vec::new();
        }
        let Some(provider) = &self.poi_provider else {
            return Vec::new();
        };

        let radius_km = (target_distance_km / TAU) * PARK_SEARCH_RADIUS_FACTOR;
        let lookup = tokio::time::timeout(
            self.config.leg_timeout(),
            provider.nearby_parks(center, radius_km, self.config.max_parks),
        )
        .await;

        match lookup {
            Ok(Ok(parks)) if !parks.is_empty() => {
                tracing::info!(
                    count = parks.len(),
                    radius_km = %format!("{:.2}", radius_km),
                    "Weaving {} parks into loop",
                    parks.len()
                );
                parks.into_iter().take(self.config.max_parks).collect()
            }
            Ok(Ok(_)) => {
                tracing::warn!(
                    radius_km = %format!("{:.2}", radius_km),
                    "Planning degraded: no parks nearby, using base waypoints"
                );
                Vec::new()
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    "Planning degraded: park lookup failed, using base waypoints"
                );
                Vec::new()
            }
            Err(_) => {
                tracing::warn!("Planning degraded: park lookup timed out, using base waypoints");
                Vec::new()
            }
        }
    }
}

/// Insert park `i` right after waypoint `i`; the base order is never changed
pub fn interleave_parks(waypoints: Vec<Coordinates>, parks: &[Park]) -> Vec<Coordinates> {
    let mut mixed = Vec::with_capacity(waypoints.len() + parks.len());
    for (i, waypoint) in waypoints.into_iter().enumerate() {
        mixed.push(waypoint);
        if let Some(park) = parks.get(i) {
            mixed.push(park.coordinates);
        }
    }
    mixed
}
