//! Planner configuration from TOML (`[planner]` section)

use routewise_domain::{ConfigIssue, ConfigIssueCode, WaypointPolicy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlannerConfig {
    /// "trust", "reject" or "repair".
    pub waypoint_policy: String,
}

impl Default for FilePlannerConfig {
    fn default() -> Self {
        Self {
            waypoint_policy: WaypointPolicy::default().to_string(),
        }
    }
}

impl FilePlannerConfig {
    /// Parse `waypoint_policy`, falling back to the default on unknown values.
    pub fn parse_waypoint_policy(&self) -> (WaypointPolicy, Vec<ConfigIssue>) {
        match self.waypoint_policy.parse::<WaypointPolicy>() {
            Ok(policy) => (policy, Vec::new()),
            Err(_) => {
                let fallback = WaypointPolicy::default();
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "planner.waypoint_policy".to_string(),
                        value: self.waypoint_policy.clone(),
                        valid_values: vec![
                            "trust".to_string(),
                            "reject".to_string(),
                            "repair".to_string(),
                        ],
                    },
                    format!(
                        "planner.waypoint_policy: unknown value '{}', falling back to '{}'",
                        self.waypoint_policy, fallback
                    ),
                );
                (fallback, vec![issue])
            }
        }
    }
}
