use crate::constants::*;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub osrm_base_url: String,
    pub nominatim_base_url: String,
    pub overpass_url: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    pub geocode_cache_ttl: u64,
    pub route_generator: RouteGeneratorConfig,
}

#[derive(Debug, Clone)]
pub struct RouteGeneratorConfig {
    /// Try the bike profile before falling back to foot for every leg
    pub allow_mixed_profile: bool,

    /// Look up nearby parks and weave them into circular routes
    pub park_enrichment: bool,

    /// Maximum number of parks interleaved into a loop
    pub max_parks: usize,

    /// Number of polygon vertices for a circular route
    pub waypoint_count: usize,

    /// Default number of progress markers
    pub marker_count: usize,

    /// Upper bound for one routing or POI attempt
    pub leg_timeout_secs: u64,

    /// Fixed seed for waypoint randomness; `None` draws from the OS
    pub random_seed: Option<u64>,
}

impl Default for RouteGeneratorConfig {
    fn default() -> Self {
        Self {
            allow_mixed_profile: true,
            park_enrichment: true,
            max_parks: DEFAULT_MAX_PARKS,
            waypoint_count: DEFAULT_LOOP_WAYPOINT_COUNT,
            marker_count: DEFAULT_MARKER_COUNT,
            leg_timeout_secs: DEFAULT_LEG_TIMEOUT_SECONDS,
            random_seed: None,
        }
    }
}

impl RouteGeneratorConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let random_seed = match env::var("ROUTE_RANDOM_SEED") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|_| "Invalid ROUTE_RANDOM_SEED".to_string())?,
            ),
            Err(_) => None,
        };

        let config = Self {
            allow_mixed_profile: env_or(
                "ROUTE_ALLOW_MIXED_PROFILE",
                defaults.allow_mixed_profile,
            )?,
            park_enrichment: env_or("ROUTE_PARK_ENRICHMENT", defaults.park_enrichment)?,
            max_parks: env_or("ROUTE_MAX_PARKS", defaults.max_parks)?,
            waypoint_count: env_or("ROUTE_WAYPOINT_COUNT", defaults.waypoint_count)?,
            marker_count: env_or("ROUTE_MARKER_COUNT", defaults.marker_count)?,
            leg_timeout_secs: env_or("ROUTE_LEG_TIMEOUT_SECS", defaults.leg_timeout_secs)?,
            random_seed,
        };

        if config.waypoint_count == 0 {
            return Err("ROUTE_WAYPOINT_COUNT must be at least 1".to_string());
        }
        if !(2..=MAX_MARKER_COUNT).contains(&config.marker_count) {
            return Err(format!(
                "ROUTE_MARKER_COUNT must be between 2 and {}",
                MAX_MARKER_COUNT
            ));
        }
        if config.leg_timeout_secs == 0 {
            return Err("ROUTE_LEG_TIMEOUT_SECS must be positive".to_string());
        }

        Ok(config)
    }

    pub fn leg_timeout(&self) -> Duration {
        Duration::from_secs(self.leg_timeout_secs)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let http_timeout_secs = env_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECONDS)?;
        if http_timeout_secs == 0 {
            return Err("HTTP_TIMEOUT_SECS must be positive".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            osrm_base_url: env::var("OSRM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OSRM_BASE_URL.to_string()),
            nominatim_base_url: env::var("NOMINATIM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_BASE_URL.to_string()),
            overpass_url: env::var("OVERPASS_URL")
                .unwrap_or_else(|_| DEFAULT_OVERPASS_URL.to_string()),
            user_agent: env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            http_timeout_secs,
            geocode_cache_ttl: env_or("GEOCODE_CACHE_TTL", DEFAULT_GEOCODE_CACHE_TTL_SECONDS)?,
            route_generator: RouteGeneratorConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| format!("Invalid {}", key)),
        Err(_) => Ok(default),
    }
}
