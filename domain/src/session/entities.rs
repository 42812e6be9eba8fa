//! Session domain entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a route placed on a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteHandle(u64);

impl RouteHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RouteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

/// Map state belonging to the current planning run (Entity).
///
/// A run takes the previous session by value and hands back the next one, so
/// two runs can never draw over each other's route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSession {
    generation: u64,
    route: Option<RouteHandle>,
}

impl PlanSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of runs that produced this session.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Route currently shown on the map, if any.
    pub fn route(&self) -> Option<RouteHandle> {
        self.route
    }

    /// Start the next run: the returned session has no route yet, and the
    /// route to clear (if any) is handed back to the caller.
    pub fn begin_run(self) -> (PlanSession, Option<RouteHandle>) {
        (
            PlanSession {
                generation: self.generation + 1,
                route: None,
            },
            self.route,
        )
    }

    /// Record the route drawn by this run.
    pub fn with_route(self, route: RouteHandle) -> PlanSession {
        PlanSession {
            route: Some(route),
            ..self
        }
    }
}
