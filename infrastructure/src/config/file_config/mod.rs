//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod geocoding;
mod map;
mod output;
mod planner;
mod providers;

pub use geocoding::FileGeocodingConfig;
pub use map::FileMapConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use planner::FilePlannerConfig;
pub use providers::{FileCustomProvider, FileProviderConfig, FileProvidersConfig};

use routewise_application::PlannerParams;
use routewise_domain::{ConfigIssue, ConfigIssueCode, ProviderRegistry};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default provider, credential fallback and request tuning
    pub provider: FileProviderConfig,
    /// Extra chat-completions providers
    pub providers: FileProvidersConfig,
    /// Waypoint policy
    pub planner: FilePlannerConfig,
    /// Geocoding service and pacing
    pub geocoding: FileGeocodingConfig,
    /// Map output and road routing
    pub map: FileMapConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// It checks:
    /// 1. Custom provider entries (endpoint scheme, non-empty model)
    /// 2. The default provider id against the resulting registry
    /// 3. Enum parse failures (waypoint_policy)
    /// 4. Numeric ranges that get clamped (temperature, interval_ms)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Custom providers
        let (registry, provider_issues) = self.providers.to_registry();
        issues.extend(provider_issues);

        // 2. Default provider
        if !registry.contains(&self.provider.default) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownProvider {
                    id: self.provider.default.clone(),
                },
                format!(
                    "provider.default: unknown provider '{}' (known: {})",
                    self.provider.default,
                    registry.ids().collect::<Vec<_>>().join(", ")
                ),
            ));
        }

        // 3. Enum parse validation
        issues.extend(self.planner.parse_waypoint_policy().1);

        // 4. Ranges
        issues.extend(self.provider.temperature_issues());
        issues.extend(self.geocoding.interval_issues());

        issues
    }

    /// Provider registry: built-ins plus valid custom entries.
    pub fn to_registry(&self) -> ProviderRegistry {
        self.providers.to_registry().0
    }

    /// Planner parameters with out-of-range values clamped.
    pub fn to_planner_params(&self) -> PlannerParams {
        PlannerParams::default()
            .with_temperature(self.provider.temperature)
            .with_geocode_interval(Duration::from_millis(self.geocoding.interval_ms))
            .with_waypoint_policy(self.planner.parse_waypoint_policy().0)
    }
}
