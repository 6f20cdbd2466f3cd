use crate::cache::{geocode_cache_key, CacheStats};
use crate::error::Result;
use crate::models::Coordinates;
use crate::services::providers::Geocoder;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory forward-geocode cache backed by moka with TTL and bounded capacity.
/// Wraps any `Geocoder`; reverse lookups pass straight through.
pub struct CachedGeocoder {
    inner: Arc<dyn Geocoder>,
    entries: Cache<String, Coordinates>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedGeocoder {
    pub fn new(inner: Arc<dyn Geocoder>, ttl_seconds: u64, max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        CachedGeocoder {
            inner,
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub async fn stats(&self) -> CacheStats {
        self.entries.run_pending_tasks().await;

        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
            entries: self.entries.entry_count(),
        }
    }
}

#[async_trait]
impl Geocoder for CachedGeocoder {
    async fn search(&self, query: &str) -> Result<Coordinates> {
        let key = geocode_cache_key(query);

        if let Some(coordinates) = self.entries.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Geocode cache hit: {}", key);
            return Ok(coordinates);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Geocode cache miss: {}", key);

        // Errors, including not-found, are never cached
        let coordinates = self.inner.search(query).await?;
        self.entries.insert(key, coordinates).await;
        Ok(coordinates)
    }

    async fn reverse(&self, at: &Coordinates) -> Result<Option<String>> {
        self.inner.reverse(at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::atomic::AtomicUsize;

    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn search(&self, query: &str) -> Result<Coordinates> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query.contains("nowhere") {
                return Err(AppError::GeocodeNotFound(query.to_string()));
            }
            Ok(Coordinates::new(37.5, 127.0).unwrap())
        }

        async fn reverse(&self, _at: &Coordinates) -> Result<Option<String>> {
            Ok(Some("Seoul".to_string()))
        }
    }

    fn cached() -> (Arc<CountingGeocoder>, CachedGeocoder) {
        let inner = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let cache = CachedGeocoder::new(inner.clone(), 3600, 100);
        (inner, cache)
    }

    #[tokio::test]
    async fn test_repeated_queries_hit_the_cache() {
        let (inner, cache) = cached();

        cache.search("Seoul City Hall").await.unwrap();
        cache.search("  seoul city hall").await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert!((stats.hit_rate - 50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let (inner, cache) = cached();

        assert!(cache.search("nowhere land").await.is_err());
        assert!(cache.search("nowhere land").await.is_err());

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reverse_passes_through() {
        let (_inner, cache) = cached();
        let label = cache
            .reverse(&Coordinates::new(37.5, 127.0).unwrap())
            .await
            .unwrap();
        assert_eq!(label.as_deref(), Some("Seoul"));
    }

    #[tokio::test]
    async fn test_ttl_expiry() {
        let inner = Arc::new(CountingGeocoder {
            calls: AtomicUsize::new(0),
        });
        let cache = CachedGeocoder::new(inner.clone(), 1, 100); // 1 second TTL

        cache.search("Seoul").await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        cache.search("Seoul").await.unwrap();

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }
}
