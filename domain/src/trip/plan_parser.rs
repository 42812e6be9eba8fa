//! Trip plan recovery from model responses.
//!
//! Models are asked for bare JSON but routinely wrap it in code fences or
//! add a sentence before and after. Recovery is deliberately shallow:
//!
//! 1. strip code-fence markers
//! 2. take the region from the first `{` to the last `}`
//! 3. parse it and check it against the trip plan schema
//!
//! There is no bracket matching; two separate objects in one response fail
//! to parse rather than silently picking one.

use super::entities::TripPlan;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

static FENCE_MARKER: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"```[A-Za-z0-9_+-]*").expect("fence pattern is valid"));

static OBJECT_SPAN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?s)\{.*\}").expect("object pattern is valid"));

/// Why a response could not be turned into a [`TripPlan`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanParseError {
    #[error("no JSON object found in the response")]
    NoJsonObject,

    #[error("response JSON could not be parsed: {0}")]
    InvalidJson(String),

    #[error("response JSON does not match the expected shape: {0}")]
    SchemaMismatch(String),
}

/// Remove markdown code-fence markers (with or without a language tag).
pub fn strip_code_fences(text: &str) -> String {
    FENCE_MARKER.replace_all(text, "").into_owned()
}

/// Locate the first-`{`-to-last-`}` region of `text`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    OBJECT_SPAN.find(text).map(|m| m.as_str())
}

/// Parse a trip plan out of raw model text.
pub fn parse_trip_plan(raw: &str) -> Result<TripPlan, PlanParseError> {
    let cleaned = strip_code_fences(raw);
    let span = extract_json_object(&cleaned).ok_or(PlanParseError::NoJsonObject)?;
    let value: Value =
        serde_json::from_str(span).map_err(|e| PlanParseError::InvalidJson(e.to_string()))?;
    parse_trip_plan_json(&value)
}

/// Validate an untyped JSON value against the trip plan schema.
///
/// Expected schema:
/// ```json
/// {
///   "sortedWaypoints": ["string", ...],
///   "analysis": "string"
/// }
/// ```
///
/// Extra keys are ignored. Waypoint names are trimmed.
pub fn parse_trip_plan_json(value: &Value) -> Result<TripPlan, PlanParseError> {
    let object = value
        .as_object()
        .ok_or_else(|| PlanParseError::SchemaMismatch("expected a JSON object".to_string()))?;

    let waypoints = object
        .get("sortedWaypoints")
        .ok_or_else(|| PlanParseError::SchemaMismatch("missing `sortedWaypoints`".to_string()))?
        .as_array()
        .ok_or_else(|| {
            PlanParseError::SchemaMismatch("`sortedWaypoints` must be an array".to_string())
        })?;

    let sorted_waypoints = waypoints
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str().map(|s| s.trim().to_string()).ok_or_else(|| {
                PlanParseError::SchemaMismatch(format!(
                    "`sortedWaypoints[{}]` must be a string",
                    index
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let analysis = object
        .get("analysis")
        .ok_or_else(|| PlanParseError::SchemaMismatch("missing `analysis`".to_string()))?
        .as_str()
        .ok_or_else(|| PlanParseError::SchemaMismatch("`analysis` must be a string".to_string()))?;

    Ok(TripPlan::new(sorted_waypoints, analysis))
}
