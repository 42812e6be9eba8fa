//! Port for structured run logging.
//!
//! Defines the [`RunLogger`] trait for recording what happened during a
//! planning run (plan received, each geocoding outcome, route drawn) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable record (JSONL) that can be replayed or audited.

use serde_json::{Value, json};

/// A structured run event for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    PlanRequested {
        provider: String,
        model: String,
        waypoints: usize,
    },
    PlanReceived {
        sorted_waypoints: Vec<String>,
        analysis_bytes: usize,
    },
    PlaceResolved {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    PlaceMissing {
        name: String,
    },
    PlaceFailed {
        name: String,
        reason: String,
    },
    RouteDrawn {
        stops: usize,
        routed: bool,
    },
    RunFailed {
        stage: &'static str,
        error: String,
    },
}

impl RunEvent {
    /// Event type identifier written as the `type` field.
    pub fn event_type(&self) -> &'static str {
        match self {
            RunEvent::PlanRequested { .. } => "plan_requested",
            RunEvent::PlanReceived { .. } => "plan_received",
            RunEvent::PlaceResolved { .. } => "place_resolved",
            RunEvent::PlaceMissing { .. } => "place_missing",
            RunEvent::PlaceFailed { .. } => "place_failed",
            RunEvent::RouteDrawn { .. } => "route_drawn",
            RunEvent::RunFailed { .. } => "run_failed",
        }
    }

    /// JSON payload with event-specific fields.
    pub fn payload(&self) -> Value {
        match self {
            RunEvent::PlanRequested {
                provider,
                model,
                waypoints,
            } => json!({ "provider": provider, "model": model, "waypoints": waypoints }),
            RunEvent::PlanReceived {
                sorted_waypoints,
                analysis_bytes,
            } => json!({ "sorted_waypoints": sorted_waypoints, "analysis_bytes": analysis_bytes }),
            RunEvent::PlaceResolved {
                name,
                latitude,
                longitude,
            } => json!({ "name": name, "lat": latitude, "lon": longitude }),
            RunEvent::PlaceMissing { name } => json!({ "name": name }),
            RunEvent::PlaceFailed { name, reason } => json!({ "name": name, "reason": reason }),
            RunEvent::RouteDrawn { stops, routed } => json!({ "stops": stops, "routed": routed }),
            RunEvent::RunFailed { stage, error } => json!({ "stage": stage, "error": error }),
        }
    }
}

/// Port for logging run events to a structured log.
///
/// The `log` method is synchronous and non-fallible; logging failures must
/// not disturb the planning run.
pub trait RunLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRunLogger;

impl RunLogger for NoRunLogger {
    fn log(&self, _event: RunEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_fields() {
        let event = RunEvent::PlaceResolved {
            name: "Temple of Heaven".to_string(),
            latitude: 39.88,
            longitude: 116.41,
        };
        assert_eq!(event.event_type(), "place_resolved");
        let payload = event.payload();
        assert_eq!(payload["name"], "Temple of Heaven");
        assert_eq!(payload["lat"], 39.88);
    }

    #[test]
    fn test_run_failed_payload() {
        let event = RunEvent::RunFailed {
            stage: "sequencer",
            error: "boom".to_string(),
        };
        assert_eq!(event.event_type(), "run_failed");
        assert_eq!(event.payload()["stage"], "sequencer");
    }
}
