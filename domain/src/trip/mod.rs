//! Trip domain.
//!
//! - [`entities`]: trip query, plan, coordinates
//! - [`validation`]: raw form input → [`TripQuery`](entities::TripQuery)
//! - [`plan_parser`]: recovery of a [`TripPlan`](entities::TripPlan) from model text
//! - [`policy`]: what to do when the model reorders more than it was asked to

pub mod entities;
pub mod plan_parser;
pub mod policy;
pub mod validation;
