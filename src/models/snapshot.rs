use crate::models::Route;
use geojson::{Feature, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// Immutable export of a generated route, handed to whatever persists it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSnapshot {
    pub id: Uuid,
    pub label: String,
    /// RFC 3339 generation timestamp
    pub created_at: String,
    pub route: Route,
}

impl RouteSnapshot {
    pub fn new(route: Route, label: impl Into<String>) -> Result<Self, time::error::Format> {
        Self::at(route, label, OffsetDateTime::now_utc())
    }

    pub fn at(
        route: Route,
        label: impl Into<String>,
        created_at: OffsetDateTime,
    ) -> Result<Self, time::error::Format> {
        Ok(RouteSnapshot {
            id: Uuid::new_v4(),
            label: label.into(),
            created_at: created_at.format(&Rfc3339)?,
            route,
        })
    }

    /// GeoJSON LineString feature in `[lon, lat]` order
    pub fn to_geojson(&self) -> Feature {
        let line = self
            .route
            .coords
            .iter()
            .map(|c| c.to_lon_lat().to_vec())
            .collect();

        let mut properties = JsonObject::new();
        properties.insert("label".to_string(), self.label.clone().into());
        properties.insert("shape".to_string(), self.route.shape.to_string().into());
        properties.insert("distance_km".to_string(), self.route.distance_km.into());
        properties.insert("created_at".to_string(), self.created_at.clone().into());

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(line))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub snapshot: RouteSnapshot,
    pub geojson: Feature,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinates, RouteShape};
    use time::macros::datetime;

    fn sample_route() -> Route {
        let coords = vec![
            Coordinates::new(37.5, 127.0).unwrap(),
            Coordinates::new(37.51, 127.01).unwrap(),
        ];
        Route::new(RouteShape::PointToPoint, 1.4, coords, vec![])
    }

    #[test]
    fn test_snapshot_timestamp_is_rfc3339() {
        let snapshot =
            RouteSnapshot::at(sample_route(), "Home → Park", datetime!(2024-05-01 06:30 UTC))
                .unwrap();
        assert_eq!(snapshot.created_at, "2024-05-01T06:30:00Z");
        assert_eq!(snapshot.label, "Home → Park");
    }

    #[test]
    fn test_geojson_uses_lon_lat_order() {
        let snapshot = RouteSnapshot::new(sample_route(), "x").unwrap();
        let feature = snapshot.to_geojson();

        match feature.geometry.map(|g| g.value) {
            Some(Value::LineString(line)) => {
                assert_eq!(line.len(), 2);
                assert_eq!(line[0], vec![127.0, 37.5]);
            }
            other => panic!("expected a LineString, got {:?}", other),
        }
        let props = feature.properties.unwrap();
        assert_eq!(props["shape"], "point-to-point");
    }
}
