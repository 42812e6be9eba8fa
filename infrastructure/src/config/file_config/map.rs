//! Map configuration from TOML (`[map]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMapConfig {
    /// GeoJSON file the route is written to.
    pub output: PathBuf,
    /// Ask the OSRM service for road geometry.
    pub routing: bool,
    pub osrm_endpoint: String,
}

impl Default for FileMapConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("route.geojson"),
            routing: true,
            osrm_endpoint: "https://router.project-osrm.org".to_string(),
        }
    }
}
