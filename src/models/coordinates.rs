use crate::constants::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lon
            ));
        }
        Ok(Coordinates { lat, lon })
    }

    /// Check the range invariant on values that arrived through deserialization
    pub fn validate(&self) -> Result<(), String> {
        Self::new(self.lat, self.lon).map(|_| ())
    }

    /// Calculate distance between two coordinates using Haversine formula
    /// Returns distance in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Round coordinates to specified decimal places
    pub fn round(&self, decimal_places: u32) -> Self {
        let multiplier = 10_f64.powi(decimal_places as i32);
        Coordinates {
            lat: (self.lat * multiplier).round() / multiplier,
            lon: (self.lon * multiplier).round() / multiplier,
        }
    }

    /// True when both points agree to ~1 cm; used to detect round trips
    pub fn same_place(&self, other: &Coordinates) -> bool {
        self.round(7) == other.round(7)
    }

    /// `[lon, lat]` position as used by GeoJSON and OSRM
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(37.5665, 126.978).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(Coordinates::new(0.0, 181.0).is_err()); // Invalid lon
        assert!(Coordinates { lat: -90.5, lon: 0.0 }.validate().is_err());
    }

    #[test]
    fn test_distance_calculation() {
        let seoul = Coordinates::new(37.5665, 126.978).unwrap();
        let busan = Coordinates::new(35.1796, 129.0756).unwrap();

        let distance = seoul.distance_to(&busan);
        // Seoul to Busan is approximately 325 km as the crow flies
        assert!((distance - 325.0).abs() < 10.0);
    }

    #[test]
    fn test_distance_is_symmetric_and_zero_on_self() {
        let a = Coordinates::new(37.5, 127.0).unwrap();
        let b = Coordinates::new(37.52, 127.03).unwrap();

        assert_eq!(a.distance_to(&b), b.distance_to(&a));
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinates::new(0.0, 0.0).unwrap();
        let b = Coordinates::new(1.0, 0.0).unwrap();
        assert!((a.distance_to(&b) - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_same_place() {
        let a = Coordinates::new(37.5, 127.0).unwrap();
        let b = Coordinates::new(37.500000001, 127.0).unwrap();
        let c = Coordinates::new(37.5001, 127.0).unwrap();

        assert!(a.same_place(&b));
        assert!(!a.same_place(&c));
    }
}
