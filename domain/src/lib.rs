//! Domain layer for routewise
//!
//! This crate contains the core trip-planning logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Trip
//!
//! A [`TripQuery`] names a start, an end and the stops in between. A language
//! model proposes a [`TripPlan`] (an ordering plus travel advice), which is
//! recovered from free text by [`parse_trip_plan`] and checked against the
//! request by a [`WaypointPolicy`].
//!
//! ## Session
//!
//! A [`PlanSession`] owns the route currently shown on the map. Each run
//! consumes the previous session and returns the next one.

pub mod config;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod trip;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use prompt::PromptTemplate;
pub use provider::{ProviderEndpoint, ProviderKind, ProviderRegistry};
pub use session::entities::{PlanSession, RouteHandle};
pub use trip::{
    entities::{GeoPoint, ResolvedPlace, TripPlan, TripQuery},
    plan_parser::{PlanParseError, parse_trip_plan, parse_trip_plan_json},
    policy::{OrderingMismatch, PolicyOutcome, WaypointPolicy},
    validation::{RawTripInput, ValidatedInput, ValidationError, split_waypoints},
};
