//! Planner parameters for pipeline tuning.
//!
//! [`PlannerParams`] groups the static parameters that control a planning
//! run in [`PlanTripUseCase`](crate::use_cases::plan_trip::PlanTripUseCase).
//! These are application-layer concerns, not domain policy.

use crate::ports::map_surface::LineStyle;
use routewise_domain::WaypointPolicy;
use std::time::Duration;

/// Lowest sampling temperature sent to the model.
pub const MIN_TEMPERATURE: f32 = 0.1;
/// Highest sampling temperature sent to the model.
pub const MAX_TEMPERATURE: f32 = 0.2;
/// Shortest pause between geocoding requests.
pub const MIN_GEOCODE_INTERVAL: Duration = Duration::from_millis(800);
/// Longest pause between geocoding requests.
pub const MAX_GEOCODE_INTERVAL: Duration = Duration::from_millis(5000);

/// Pipeline tuning parameters.
#[derive(Debug, Clone)]
pub struct PlannerParams {
    /// Sampling temperature for the sequencing request.
    pub temperature: f32,
    /// Pause before every geocoding request after the first.
    pub geocode_interval: Duration,
    /// What to do when the model's ordering is not a permutation.
    pub waypoint_policy: WaypointPolicy,
    /// Style of the drawn route line.
    pub line_style: LineStyle,
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            temperature: MIN_TEMPERATURE,
            geocode_interval: Duration::from_millis(1500),
            waypoint_policy: WaypointPolicy::default(),
            line_style: LineStyle::default(),
        }
    }
}

impl PlannerParams {
    // ==================== Builder Methods ====================

    /// Set the temperature, clamped to the deterministic band.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = if temperature.is_nan() {
            MIN_TEMPERATURE
        } else {
            temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
        };
        self
    }

    /// Set the geocoding interval, clamped to the rate-limit-safe range.
    pub fn with_geocode_interval(mut self, interval: Duration) -> Self {
        self.geocode_interval = interval.clamp(MIN_GEOCODE_INTERVAL, MAX_GEOCODE_INTERVAL);
        self
    }

    pub fn with_waypoint_policy(mut self, policy: WaypointPolicy) -> Self {
        self.waypoint_policy = policy;
        self
    }

    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.line_style = style;
        self
    }
}
