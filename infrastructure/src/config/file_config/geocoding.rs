//! Geocoding configuration from TOML (`[geocoding]` section)

use routewise_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeocodingConfig {
    /// Nominatim-compatible search endpoint.
    pub endpoint: String,
    /// Pause between lookups in milliseconds (accepted range 800-5000).
    pub interval_ms: u64,
    /// User-Agent sent with every lookup; the public instance requires one.
    pub user_agent: String,
}

impl Default for FileGeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            interval_ms: 1500,
            user_agent: concat!("routewise/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FileGeocodingConfig {
    pub(super) fn interval_issues(&self) -> Vec<ConfigIssue> {
        if (800..=5000).contains(&self.interval_ms) {
            return Vec::new();
        }
        vec![ConfigIssue::warning(
            ConfigIssueCode::OutOfRange {
                field: "geocoding.interval_ms".to_string(),
            },
            format!(
                "geocoding.interval_ms: {} is outside 800-5000 and will be clamped",
                self.interval_ms
            ),
        )]
    }
}
