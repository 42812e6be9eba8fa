//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod plan_trip;
pub mod present_route;
pub mod resolve_coordinates;
pub mod sequence_waypoints;
