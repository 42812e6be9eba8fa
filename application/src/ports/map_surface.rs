//! Map surface port
//!
//! The map widget draws a route through an ordered list of stops and places
//! a labelled marker on each. Road-line computation belongs to the surface
//! (or the routing service behind it); this crate never computes geometry.

use async_trait::async_trait;
use routewise_domain::{ResolvedPlace, RouteHandle};
use thiserror::Error;

/// Visual style of the route line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    /// CSS hex colour, e.g. `#4f46e5`.
    pub color: String,
    pub opacity: f32,
    pub weight: u32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#4f46e5".to_string(),
            opacity: 0.8,
            weight: 6,
        }
    }
}

/// Produces the marker label for stop `index` of `total`.
pub type StopLabel = fn(index: usize, total: usize, name: &str) -> String;

/// Default labels: the first and last stops are called out distinctly.
pub fn default_stop_label(index: usize, total: usize, name: &str) -> String {
    if index == 0 {
        format!("Start: {}", name)
    } else if index + 1 == total {
        format!("End: {}", name)
    } else {
        format!("Stop {}: {}", index, name)
    }
}

/// Everything the surface needs to draw one route.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub stops: Vec<ResolvedPlace>,
    pub style: LineStyle,
    pub label: StopLabel,
}

impl RouteRequest {
    pub fn new(stops: Vec<ResolvedPlace>) -> Self {
        Self {
            stops,
            style: LineStyle::default(),
            label: default_stop_label,
        }
    }

    /// Labels for every stop, in order.
    pub fn labels(&self) -> Vec<String> {
        let total = self.stops.len();
        self.stops
            .iter()
            .enumerate()
            .map(|(index, stop)| (self.label)(index, total, &stop.name))
            .collect()
    }
}

/// Errors reported by a map surface.
#[derive(Error, Debug)]
pub enum MapError {
    /// Markers were placed but the routing backend could not compute a line.
    /// The handle still identifies what was drawn.
    #[error("Route line could not be computed: {message}")]
    RoutingFailed { handle: RouteHandle, message: String },

    #[error("Map surface unavailable: {0}")]
    Unavailable(String),
}

/// A surface that can show at most a handful of routes and remove them again.
#[async_trait]
pub trait MapSurface: Send + Sync {
    /// Draw a route visiting `request.stops` in order.
    async fn add_route(&self, request: RouteRequest) -> Result<RouteHandle, MapError>;

    /// Remove a previously drawn route and its markers.
    async fn remove_route(&self, handle: RouteHandle) -> Result<(), MapError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use routewise_domain::GeoPoint;

    #[test]
    fn test_default_labels_mark_start_and_end() {
        let stops = ["Station", "Palace", "Temple", "Airport"]
            .iter()
            .map(|name| ResolvedPlace::new(*name, GeoPoint::new(39.9, 116.4)))
            .collect();
        let request = RouteRequest::new(stops);
        assert_eq!(
            request.labels(),
            vec![
                "Start: Station",
                "Stop 1: Palace",
                "Stop 2: Temple",
                "End: Airport"
            ]
        );
    }

    #[test]
    fn test_default_style() {
        let style = LineStyle::default();
        assert_eq!(style.color, "#4f46e5");
        assert_eq!(style.weight, 6);
    }
}
