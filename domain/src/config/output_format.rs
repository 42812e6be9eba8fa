//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for a plan report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable itinerary and analysis (default)
    #[default]
    Text,
    /// JSON report
    Json,
}
