use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A park found near a loop's center, used as an extra waypoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Park {
    pub name: String,
    pub coordinates: Coordinates,
}

impl Park {
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Park {
            name: name.into(),
            coordinates,
        }
    }
}
