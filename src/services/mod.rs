pub mod nominatim;
pub mod osrm;
pub mod overpass;
pub mod providers;
pub mod route_generator;
