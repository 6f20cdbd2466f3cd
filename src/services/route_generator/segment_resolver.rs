use crate::models::{Coordinates, PathSegment, RoutingProfile};
use crate::services::providers::RoutingProvider;
use std::sync::Arc;
use std::time::Duration;

/// Routes one leg, falling back through travel profiles.
/// Failures are logged and reported as `None` so callers decide how to degrade.
#[derive(Clone)]
pub struct SegmentResolver {
    provider: Arc<dyn RoutingProvider>,
    attempt_timeout: Duration,
}

impl SegmentResolver {
    pub fn new(provider: Arc<dyn RoutingProvider>, attempt_timeout: Duration) -> Self {
        Self {
            provider,
            attempt_timeout,
        }
    }

    pub async fn resolve(
        &self,
        start: &Coordinates,
        end: &Coordinates,
        allow_mixed_profile: bool,
    ) -> Option<PathSegment> {
        for &profile in RoutingProfile::fallback_chain(allow_mixed_profile) {
            let attempt = tokio::time::timeout(
                self.attempt_timeout,
                self.provider.route(profile, start, end),
            )
            .await;

            match attempt {
                Ok(Ok(segment)) if !segment.coords.is_empty() => {
                    tracing::debug!(
                        provider = self.provider.name(),
                        profile = %profile,
                        points = segment.coords.len(),
                        "Leg resolved with {} profile",
                        profile
                    );
                    return Some(segment);
                }
                Ok(Ok(_)) => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        profile = %profile,
                        "Routing returned an empty path, trying next profile"
                    );
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        profile = %profile,
                        error = %e,
                        "Routing failed with {} profile: {}",
                        profile, e
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        provider = self.provider.name(),
                        profile = %profile,
                        timeout_ms = self.attempt_timeout.as_millis() as u64,
                        "Routing timed out with {} profile",
                        profile
                    );
                }
            }
        }

        tracing::warn!(
            "No routing profile could connect ({:.5}, {:.5}) -> ({:.5}, {:.5})",
            start.lat, start.lon, end.lat, end.lon
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Succeeds only for the listed profiles and records every attempt
    struct ProfileRouter {
        working: Vec<RoutingProfile>,
        attempts: Mutex<Vec<RoutingProfile>>,
        empty_geometry: bool,
    }

    impl ProfileRouter {
        fn new(working: &[RoutingProfile]) -> Self {
            Self {
                working: working.to_vec(),
                attempts: Mutex::new(Vec::new()),
                empty_geometry: false,
            }
        }
    }

    #[async_trait]
    impl RoutingProvider for ProfileRouter {
        async fn route(
            &self,
            profile: RoutingProfile,
            start: &Coordinates,
            end: &Coordinates,
        ) -> Result<PathSegment> {
            self.attempts.lock().unwrap().push(profile);
            if !self.working.contains(&profile) {
                return Err(AppError::RoutingApi(format!("{} down", profile)));
            }
            let coords = if self.empty_geometry {
                vec![]
            } else {
                vec![*start, *end]
            };
            Ok(PathSegment {
                coords,
                steps: vec![],
            })
        }

        fn name(&self) -> &'static str {
            "test"
        }
    }

    struct SlowRouter;

    #[async_trait]
    impl RoutingProvider for SlowRouter {
        async fn route(
            &self,
            _profile: RoutingProfile,
            start: &Coordinates,
            _end: &Coordinates,
        ) -> Result<PathSegment> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(PathSegment {
                coords: vec![*start],
                steps: vec![],
            })
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    fn points() -> (Coordinates, Coordinates) {
        (
            Coordinates::new(37.5, 127.0).unwrap(),
            Coordinates::new(37.51, 127.01).unwrap(),
        )
    }

    fn resolver(router: Arc<dyn RoutingProvider>) -> SegmentResolver {
        SegmentResolver::new(router, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn test_bike_failure_falls_back_to_foot() {
        let router = Arc::new(ProfileRouter::new(&[RoutingProfile::Foot]));
        let (a, b) = points();

        let segment = resolver(router.clone()).resolve(&a, &b, true).await;

        assert!(segment.is_some());
        assert_eq!(
            *router.attempts.lock().unwrap(),
            vec![RoutingProfile::Bike, RoutingProfile::Foot]
        );
    }

    #[tokio::test]
    async fn test_first_success_stops_the_chain() {
        let router = Arc::new(ProfileRouter::new(&[
            RoutingProfile::Bike,
            RoutingProfile::Foot,
        ]));
        let (a, b) = points();

        resolver(router.clone()).resolve(&a, &b, true).await.unwrap();

        assert_eq!(*router.attempts.lock().unwrap(), vec![RoutingProfile::Bike]);
    }

    #[tokio::test]
    async fn test_foot_only_when_mixed_disallowed() {
        let router = Arc::new(ProfileRouter::new(&[RoutingProfile::Bike]));
        let (a, b) = points();

        assert!(resolver(router.clone()).resolve(&a, &b, false).await.is_none());
        assert_eq!(*router.attempts.lock().unwrap(), vec![RoutingProfile::Foot]);
    }

    #[tokio::test]
    async fn test_empty_geometry_is_not_usable() {
        let mut router = ProfileRouter::new(&[RoutingProfile::Bike, RoutingProfile::Foot]);
        router.empty_geometry = true;
        let router = Arc::new(router);
        let (a, b) = points();

        assert!(resolver(router.clone()).resolve(&a, &b, true).await.is_none());
        assert_eq!(router.attempts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_slow_provider_times_out() {
        let resolver = SegmentResolver::new(Arc::new(SlowRouter), Duration::from_millis(20));
        let (a, b) = points();

        assert!(resolver.resolve(&a, &b, true).await.is_none());
    }
}
