mod memory;

pub use memory::CachedGeocoder;

use serde::Serialize;

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub entries: u64,
}

/// Normalize free-text location queries so trivially different spellings share an entry
pub fn geocode_cache_key(query: &str) -> String {
    let collapsed = query.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("geocode:{}", collapsed.to_lowercase())
}
