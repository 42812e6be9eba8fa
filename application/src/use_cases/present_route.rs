//! Present Route use case
//!
//! Clears whatever the previous run left on the map and draws the new route.
//! Drawing problems never fail the run: the ordering and coordinates are
//! already valid, so they become warnings.

use crate::ports::map_surface::{LineStyle, MapError, MapSurface, RouteRequest};
use crate::ports::progress::PlanWarning;
use routewise_domain::{PlanSession, ResolvedPlace, RouteHandle};
use std::sync::Arc;
use tracing::{info, warn};

/// Result of drawing a route.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedRoute {
    /// Session holding the new route handle (if anything was drawn).
    pub session: PlanSession,
    /// Whether the road line was computed.
    pub routed: bool,
    pub warning: Option<PlanWarning>,
}

/// Use case for showing a route on a [`MapSurface`].
pub struct PresentRouteUseCase {
    surface: Arc<dyn MapSurface>,
}

impl Clone for PresentRouteUseCase {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
        }
    }
}

impl PresentRouteUseCase {
    pub fn new(surface: Arc<dyn MapSurface>) -> Self {
        Self { surface }
    }

    /// Remove a route left over from an earlier run.
    pub async fn clear(&self, stale: Option<RouteHandle>) {
        let Some(handle) = stale else {
            return;
        };
        if let Err(e) = self.surface.remove_route(handle).await {
            warn!("Could not remove {}: {}", handle, e);
        }
    }

    /// Draw `stops` in order and record the route on the session.
    pub async fn draw(
        &self,
        session: PlanSession,
        stops: Vec<ResolvedPlace>,
        style: LineStyle,
    ) -> PresentedRoute {
        let count = stops.len();
        let request = RouteRequest {
            style,
            ..RouteRequest::new(stops)
        };

        match self.surface.add_route(request).await {
            Ok(handle) => {
                info!("Drew {} with {} stops", handle, count);
                PresentedRoute {
                    session: session.with_route(handle),
                    routed: true,
                    warning: None,
                }
            }
            Err(MapError::RoutingFailed { handle, message }) => {
                warn!("Routing error: {}", message);
                PresentedRoute {
                    session: session.with_route(handle),
                    routed: false,
                    warning: Some(PlanWarning::RouteNotDrawn { reason: message }),
                }
            }
            Err(e) => {
                warn!("Map surface error: {}", e);
                PresentedRoute {
                    session,
                    routed: false,
                    warning: Some(PlanWarning::RouteNotDrawn {
                        reason: e.to_string(),
                    }),
                }
            }
        }
    }
}
