//! Waypoint ordering policy.
//!
//! The model is asked to reorder the requested waypoints, but nothing forces
//! it to: entries can go missing, appear twice, or be renamed. The policy
//! decides whether such a list is used as-is, rejected, or repaired.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How to treat a model ordering that is not a permutation of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaypointPolicy {
    /// Use the model's list as-is; mismatches only produce a warning.
    #[default]
    Trust,
    /// Fail the run when the list is not a permutation.
    Reject,
    /// Keep matching entries in model order, drop extras, append missing ones.
    Repair,
}

impl WaypointPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaypointPolicy::Trust => "trust",
            WaypointPolicy::Reject => "reject",
            WaypointPolicy::Repair => "repair",
        }
    }

    /// Apply the policy to a proposed ordering.
    pub fn apply(
        &self,
        requested: &[String],
        proposed: Vec<String>,
    ) -> Result<PolicyOutcome, OrderingMismatch> {
        let mismatch = compare_orderings(requested, &proposed);
        let Some(mismatch) = mismatch else {
            return Ok(PolicyOutcome {
                waypoints: proposed,
                mismatch: None,
            });
        };

        match self {
            WaypointPolicy::Trust => Ok(PolicyOutcome {
                waypoints: proposed,
                mismatch: Some(mismatch),
            }),
            WaypointPolicy::Reject => Err(mismatch),
            WaypointPolicy::Repair => Ok(PolicyOutcome {
                waypoints: repair_ordering(requested, &proposed),
                mismatch: Some(mismatch),
            }),
        }
    }
}

impl fmt::Display for WaypointPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaypointPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trust" => Ok(WaypointPolicy::Trust),
            "reject" => Ok(WaypointPolicy::Reject),
            "repair" => Ok(WaypointPolicy::Repair),
            other => Err(format!(
                "unknown waypoint policy '{}' (expected trust, reject or repair)",
                other
            )),
        }
    }
}

/// Ordering after the policy ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyOutcome {
    pub waypoints: Vec<String>,
    /// Present when the proposed list was not a permutation of the input.
    pub mismatch: Option<OrderingMismatch>,
}

/// Differences between the requested waypoints and the model's ordering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "model ordering differs from the requested stops ({})",
    describe_differences(.missing, .unexpected)
)]
pub struct OrderingMismatch {
    /// Requested waypoints the model left out.
    pub missing: Vec<String>,
    /// Entries the model returned that were never requested.
    pub unexpected: Vec<String>,
}

fn describe_differences(missing: &[String], unexpected: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("missing {}", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        parts.push(format!("unexpected {}", unexpected.join(", ")));
    }
    parts.join("; ")
}

/// Compare two lists as multisets of trimmed names.
///
/// Returns `None` when `proposed` is a permutation of `requested`.
pub fn compare_orderings(requested: &[String], proposed: &[String]) -> Option<OrderingMismatch> {
    let mut remaining = count_names(requested);
    let mut unexpected = Vec::new();

    for name in proposed {
        match remaining.get_mut(name.trim()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => unexpected.push(name.clone()),
        }
    }

    let missing: Vec<String> = requested
        .iter()
        .filter(|name| {
            let key = name.trim();
            match remaining.get_mut(key) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    true
                }
                _ => false,
            }
        })
        .cloned()
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        None
    } else {
        Some(OrderingMismatch {
            missing,
            unexpected,
        })
    }
}

/// Build a permutation of `requested` that follows `proposed` where it can.
fn repair_ordering(requested: &[String], proposed: &[String]) -> Vec<String> {
    let mut remaining = count_names(requested);
    let mut repaired = Vec::with_capacity(requested.len());

    for name in proposed {
        if let Some(count) = remaining.get_mut(name.trim())
            && *count > 0
        {
            *count -= 1;
            repaired.push(name.trim().to_string());
        }
    }

    for name in requested {
        if let Some(count) = remaining.get_mut(name.trim())
            && *count > 0
        {
            *count -= 1;
            repaired.push(name.clone());
        }
    }

    repaired
}

fn count_names(names: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for name in names {
        *counts.entry(name.trim()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_permutation_has_no_mismatch() {
        let requested = names(&["A", "B", "C"]);
        assert!(compare_orderings(&requested, &names(&["C", "A", "B"])).is_none());
    }

    #[test]
    fn test_duplicates_are_counted() {
        let requested = names(&["A", "A", "B"]);
        assert!(compare_orderings(&requested, &names(&["A", "B", "A"])).is_none());

        let mismatch = compare_orderings(&requested, &names(&["A", "B"])).unwrap();
        assert_eq!(mismatch.missing, names(&["A"]));
        assert!(mismatch.unexpected.is_empty());
    }

    #[test]
    fn test_missing_and_unexpected() {
        let requested = names(&["Forbidden City", "Temple of Heaven"]);
        let proposed = names(&["The Forbidden City", "Temple of Heaven"]);
        let mismatch = compare_orderings(&requested, &proposed).unwrap();
        assert_eq!(mismatch.missing, names(&["Forbidden City"]));
        assert_eq!(mismatch.unexpected, names(&["The Forbidden City"]));
        assert!(mismatch.to_string().contains("missing Forbidden City"));
    }

    #[test]
    fn test_trust_keeps_model_list() {
        let requested = names(&["A", "B"]);
        let outcome = WaypointPolicy::Trust
            .apply(&requested, names(&["B", "X"]))
            .unwrap();
        assert_eq!(outcome.waypoints, names(&["B", "X"]));
        assert!(outcome.mismatch.is_some());
    }

    #[test]
    fn test_reject_fails_on_mismatch() {
        let requested = names(&["A", "B"]);
        let err = WaypointPolicy::Reject
            .apply(&requested, names(&["A"]))
            .unwrap_err();
        assert_eq!(err.missing, names(&["B"]));
    }

    #[test]
    fn test_reject_accepts_permutation() {
        let requested = names(&["A", "B"]);
        let outcome = WaypointPolicy::Reject
            .apply(&requested, names(&["B", "A"]))
            .unwrap();
        assert_eq!(outcome.waypoints, names(&["B", "A"]));
        assert!(outcome.mismatch.is_none());
    }

    #[test]
    fn test_repair_produces_permutation() {
        let requested = names(&["A", "B", "C", "A"]);
        let outcome = WaypointPolicy::Repair
            .apply(&requested, names(&["C", "X", "A", "C"]))
            .unwrap();
        assert_eq!(outcome.waypoints, names(&["C", "A", "A", "B"]));
        assert!(compare_orderings(&requested, &outcome.waypoints).is_none());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Repair".parse::<WaypointPolicy>(), Ok(WaypointPolicy::Repair));
        assert!("fix".parse::<WaypointPolicy>().is_err());
        assert_eq!(WaypointPolicy::default(), WaypointPolicy::Trust);
    }
}
