//! Planning session domain.
//!
//! - [`entities::PlanSession`]: map state owned by one planning run
//! - [`entities::RouteHandle`]: opaque id of a route drawn on a map surface

pub mod entities;
