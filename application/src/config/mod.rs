//! Application-level configuration.
//!
//! - [`PlannerParams`]: temperature, geocoding pace, waypoint policy, line style

pub mod planner_params;

pub use planner_params::PlannerParams;
