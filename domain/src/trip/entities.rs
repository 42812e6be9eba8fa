//! Trip domain entities

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated trip request: where to start, where to end, what to visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripQuery {
    pub start: String,
    pub end: String,
    /// Intermediate stops in the order the user typed them (duplicates allowed).
    pub waypoints: Vec<String>,
}

impl TripQuery {
    pub fn new(
        start: impl Into<String>,
        end: impl Into<String>,
        waypoints: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            waypoints: waypoints.into_iter().map(Into::into).collect(),
        }
    }

    /// Full visiting order for a plan: `[start, ...ordered, end]`.
    pub fn itinerary(&self, ordered: &[String]) -> Vec<String> {
        let mut names = Vec::with_capacity(ordered.len() + 2);
        names.push(self.start.clone());
        names.extend(ordered.iter().cloned());
        names.push(self.end.clone());
        names
    }
}

/// Ordering proposed by the language model.
///
/// `sorted_waypoints` is model-controlled content and is not guaranteed to be
/// a permutation of the requested waypoints; see
/// [`WaypointPolicy`](super::policy::WaypointPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPlan {
    #[serde(rename = "sortedWaypoints")]
    pub sorted_waypoints: Vec<String>,
    pub analysis: String,
}

impl TripPlan {
    pub fn new(sorted_waypoints: Vec<String>, analysis: impl Into<String>) -> Self {
        Self {
            sorted_waypoints,
            analysis: analysis.into(),
        }
    }
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the coordinate lies within the valid latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// A place name together with the coordinate it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlace {
    pub name: String,
    pub point: GeoPoint,
}

impl ResolvedPlace {
    pub fn new(name: impl Into<String>, point: GeoPoint) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }
}
