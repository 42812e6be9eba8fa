//! Progress notification port
//!
//! Defines the loading indicator, the results panel hook, and the channel for
//! non-fatal warnings shown to the user during a planning run.

use routewise_domain::TripPlan;
use std::fmt;

/// A non-fatal problem surfaced during a run. The run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanWarning {
    /// The geocoder found no match for a place; it was skipped.
    PlaceNotFound { name: String },
    /// The lookup itself failed (network, service error); the place was skipped.
    LookupFailed { name: String, reason: String },
    /// The model's ordering is not a permutation of the requested stops.
    OrderingMismatch { details: String },
    /// Markers were placed but the road line could not be drawn.
    RouteNotDrawn { reason: String },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::PlaceNotFound { name } => write!(
                f,
                "Could not find \"{}\" on the map, skipped it. Try a more specific or official name.",
                name
            ),
            PlanWarning::LookupFailed { name, reason } => {
                write!(f, "Lookup for \"{}\" failed ({}), skipped it.", name, reason)
            }
            PlanWarning::OrderingMismatch { details } => write!(f, "{}", details),
            PlanWarning::RouteNotDrawn { reason } => write!(
                f,
                "Route line could not be drawn ({}). The AI ordering and coordinates are still valid.",
                reason
            ),
        }
    }
}

/// Callback for progress updates during a planning run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, GUI).
pub trait PlanProgressNotifier: Send + Sync {
    /// Show the loading indicator with a status line (or update the line).
    fn show_status(&self, status: &str);

    /// Hide the loading indicator.
    fn hide(&self);

    /// Report a non-fatal warning.
    fn on_warning(&self, warning: &PlanWarning);

    /// Called once the model's plan is available, before geocoding starts.
    fn on_plan_ready(&self, _plan: &TripPlan, _rendered_analysis: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PlanProgressNotifier for NoProgress {
    fn show_status(&self, _status: &str) {}
    fn hide(&self) {}
    fn on_warning(&self, _warning: &PlanWarning) {}
}

/// Hides the loading indicator when dropped, on every exit path of a run.
pub struct LoadingGuard<'a> {
    notifier: &'a dyn PlanProgressNotifier,
}

impl<'a> LoadingGuard<'a> {
    pub fn show(notifier: &'a dyn PlanProgressNotifier, status: &str) -> Self {
        notifier.show_status(status);
        Self { notifier }
    }

    /// Update the status line while keeping the indicator visible.
    pub fn update(&self, status: &str) {
        self.notifier.show_status(status);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.notifier.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl PlanProgressNotifier for Recorder {
        fn show_status(&self, status: &str) {
            self.events.lock().unwrap().push(format!("show:{}", status));
        }
        fn hide(&self) {
            self.events.lock().unwrap().push("hide".to_string());
        }
        fn on_warning(&self, _warning: &PlanWarning) {}
    }

    #[test]
    fn test_guard_hides_on_drop() {
        let recorder = Recorder::default();
        {
            let guard = LoadingGuard::show(&recorder, "working");
            guard.update("still working");
        }
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["show:working", "show:still working", "hide"]
        );
    }

    #[test]
    fn test_guard_hides_on_early_return() {
        fn fails(recorder: &Recorder) -> Result<(), ()> {
            let _guard = LoadingGuard::show(recorder, "step");
            Err(())
        }

        let recorder = Recorder::default();
        assert!(fails(&recorder).is_err());
        assert_eq!(recorder.events.lock().unwrap().last().unwrap(), "hide");
    }

    #[test]
    fn test_warning_messages() {
        let warning = PlanWarning::PlaceNotFound {
            name: "Atlantis".to_string(),
        };
        assert!(warning.to_string().contains("\"Atlantis\""));

        let warning = PlanWarning::RouteNotDrawn {
            reason: "busy".to_string(),
        };
        assert!(warning.to_string().contains("still valid"));
    }
}
