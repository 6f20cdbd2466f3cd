use crate::constants::KM_PER_DEGREE;
use crate::models::Coordinates;

/// Great-circle distance between two points in kilometers
pub fn distance(a: &Coordinates, b: &Coordinates) -> f64 {
    a.distance_to(b)
}

/// Path length in kilometers, 0 for fewer than two points
pub fn total_distance(path: &[Coordinates]) -> f64 {
    path.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Running path length at each point: `[0, d01, d01 + d12, ...]`
pub fn cumulative_distances(path: &[Coordinates]) -> Vec<f64> {
    let mut dists = Vec::with_capacity(path.len());
    let mut running = 0.0;

    for (i, point) in path.iter().enumerate() {
        if i > 0 {
            running += distance(&path[i - 1], point);
        }
        dists.push(running);
    }

    dists
}

/// Linear lat/lon interpolation, `ratio` in [0, 1]
pub fn interpolate(start: &Coordinates, end: &Coordinates, ratio: f64) -> Coordinates {
    if ratio <= 0.0 {
        return *start;
    }
    if ratio >= 1.0 {
        return *end;
    }
    Coordinates {
        lat: start.lat + (end.lat - start.lat) * ratio,
        lon: start.lon + (end.lon - start.lon) * ratio,
    }
}

pub fn km_to_degrees(km: f64) -> f64 {
    km / KM_PER_DEGREE
}

/// Equirectangular offset from `origin`: `radius_deg` along `bearing_rad`
/// (0 = north, clockwise), widening longitude by 1/cos(lat).
/// Returns raw `(lat, lon)`; the caller validates ranges.
pub fn offset_by_bearing(origin: &Coordinates, radius_deg: f64, bearing_rad: f64) -> (f64, f64) {
    let lat = origin.lat + radius_deg * bearing_rad.cos();
    let lon = origin.lon + radius_deg * bearing_rad.sin() / origin.lat.to_radians().cos();
    (lat, lon)
}

/// Degree-space distance with longitude shrunk back by cos(lat); inverse of `offset_by_bearing`
pub fn corrected_degree_distance(origin: &Coordinates, point: &Coordinates) -> f64 {
    let dlat = point.lat - origin.lat;
    let dlon = (point.lon - origin.lon) * origin.lat.to_radians().cos();
    (dlat * dlat + dlon * dlon).sqrt()
}
