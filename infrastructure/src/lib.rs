//! Infrastructure layer for routewise
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod geocoding;
pub mod logging;
pub mod map;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileOutputConfig, FileOutputFormat};
pub use geocoding::NominatimGeocoder;
pub use logging::JsonlRunLogger;
pub use map::{GeoJsonMapSurface, OsrmRouter, RoadRouter, RoutingError};
pub use providers::ChatCompletionsGateway;
