//! Collaborator seams of the route synthesis core.
//!
//! Synthesis logic only talks to these traits, so the routing, geocoding and
//! points-of-interest vendors can be swapped without touching it.

use crate::error::Result;
use crate::models::{Coordinates, Park, PathSegment, RoutingProfile};
use async_trait::async_trait;

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Route one leg with the given travel profile.
    /// The returned geometry is in `(lat, lon)` order, traversable from `start` to `end`.
    async fn route(
        &self,
        profile: RoutingProfile,
        start: &Coordinates,
        end: &Coordinates,
    ) -> Result<PathSegment>;

    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve free text to a coordinate, `AppError::GeocodeNotFound` when nothing matches
    async fn search(&self, query: &str) -> Result<Coordinates>;

    /// Human-readable label for a coordinate, `None` when the service has no answer
    async fn reverse(&self, at: &Coordinates) -> Result<Option<String>>;
}

#[async_trait]
pub trait PoiProvider: Send + Sync {
    /// Up to `limit` parks within `radius_km` of `center`
    async fn nearby_parks(
        &self,
        center: &Coordinates,
        radius_km: f64,
        limit: usize,
    ) -> Result<Vec<Park>>;
}
