//! Map surface adapters.
//!
//! [`GeoJsonMapSurface`] keeps the drawn routes in memory and mirrors them
//! into a GeoJSON file that any map viewer can open. Road geometry comes
//! from a [`RoadRouter`]; [`OsrmRouter`] is the HTTP implementation.

pub mod geojson;
pub mod osrm;

pub use geojson::GeoJsonMapSurface;
pub use osrm::{OsrmRouter, RoadRouter, RoutingError};
