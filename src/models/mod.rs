pub mod coordinates;
pub mod marker;
pub mod poi;
pub mod route;
pub mod snapshot;

pub use coordinates::Coordinates;
pub use marker::{Marker, MarkerRole};
pub use poi::Park;
pub use route::{
    PathSegment, Route, RouteRequest, RouteShape, RouteStep, RouteSummary, RoutingProfile,
};
pub use snapshot::RouteSnapshot;
