use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Visual role of a progress marker
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerRole {
    Start,
    Finish,
    /// Lands exactly on the half-way distance of an out-and-back route
    Turnaround,
    /// Outbound half of an out-and-back route
    TurnaroundSideA,
    /// Return half of an out-and-back route
    TurnaroundSideB,
    Regular,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub position: Coordinates,
    /// 1-based
    pub index: usize,
    pub role: MarkerRole,
    pub distance_from_start_km: f64,
}
