//! Stable application-wide constants.
//!
//! Values here are geometric coefficients of the route synthesis algorithm and
//! default fallbacks for env-var-based configuration. Knobs that are worth
//! changing at runtime live in
//! [`RouteGeneratorConfig`](crate::config::RouteGeneratorConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Provider endpoints ---

/// Public OSRM route service, profile and coordinates are appended.
pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org/route/v1";
/// Public Nominatim instance used for forward and reverse geocoding.
pub const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Overpass interpreter used for the nearby-park lookup.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
/// Nominatim's usage policy requires an identifying User-Agent.
pub const DEFAULT_USER_AGENT: &str = "RunCoursePlanner/1.0";
/// Per-request HTTP timeout for every provider client.
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 20;

// --- Geocode cache ---

/// Forward geocode results are kept for 24 hours. Overridden by `GEOCODE_CACHE_TTL`.
pub const DEFAULT_GEOCODE_CACHE_TTL_SECONDS: u64 = 86_400;
/// Upper bound on cached geocode entries.
pub const DEFAULT_GEOCODE_CACHE_MAX_ENTRIES: u64 = 1_000;

// --- Distance measurement ---

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Flat-earth conversion between kilometers and degrees of latitude.
pub const KM_PER_DEGREE: f64 = 111.0;

// --- Request limits ---

/// Longest target distance accepted for loop and synthetic out-and-back routes.
pub const MAX_TARGET_DISTANCE_KM: f64 = 100.0;

// --- Circular waypoint planning ---

/// Number of planned waypoints on the loop polygon.
pub const DEFAULT_LOOP_WAYPOINT_COUNT: usize = 4;
/// Fraction of the ideal circle radius (target / 2π) used for the polygon.
/// Road routing adds detours, so the polygon is drawn well inside the circle.
pub const LOOP_RADIUS_FACTOR: f64 = 0.55;
/// Whole-loop radius scale range `[min, max)`.
pub const LOOP_RADIUS_VARIATION: (f64, f64) = (0.85, 1.15);
/// Per-waypoint radius jitter range `[min, max)`.
pub const LOOP_POINT_JITTER: (f64, f64) = (0.9, 1.1);

// --- Park enrichment ---

/// Park search radius as a fraction of the ideal circle radius.
pub const PARK_SEARCH_RADIUS_FACTOR: f64 = 0.8;
/// At most this many parks are interleaved into a loop.
pub const DEFAULT_MAX_PARKS: usize = 3;
/// Server-side timeout embedded in the Overpass query.
pub const OVERPASS_QUERY_TIMEOUT_SECONDS: u64 = 10;
/// Name used for parks without a `name` tag.
pub const UNNAMED_PARK: &str = "Park";

// --- Out-and-back synthetic turnaround ---

/// Latitude share of the synthetic turnaround offset.
pub const TURNAROUND_LAT_FACTOR: f64 = 0.7;
/// Longitude share of the synthetic turnaround offset.
pub const TURNAROUND_LON_FACTOR: f64 = 0.5;

// --- Resolver ---

/// Upper bound for a single routing attempt.
pub const DEFAULT_LEG_TIMEOUT_SECONDS: u64 = 15;

// --- Markers ---

/// Number of progress markers placed along a finished route.
pub const DEFAULT_MARKER_COUNT: usize = 10;
/// Hard upper bound on markers a caller may request.
pub const MAX_MARKER_COUNT: usize = 100;

// --- Summary ---

/// Pace used for duration estimates.
pub const ESTIMATED_PACE_KMH: f64 = 8.0;
/// Rough energy cost of running one kilometer.
pub const KCAL_PER_KM: f64 = 60.0;
