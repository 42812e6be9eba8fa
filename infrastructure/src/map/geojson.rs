//! GeoJSON file map surface

use super::osrm::RoadRouter;
use async_trait::async_trait;
use routewise_application::{LineStyle, MapError, MapSurface, RouteRequest};
use routewise_domain::{ResolvedPlace, RouteHandle};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

struct DrawnRoute {
    stops: Vec<ResolvedPlace>,
    labels: Vec<String>,
    style: LineStyle,
    /// `[longitude, latitude]` vertices.
    line: Vec<[f64; 2]>,
    routed: bool,
}

#[derive(Default)]
struct SurfaceState {
    next_id: u64,
    routes: BTreeMap<u64, DrawnRoute>,
}

/// [`MapSurface`] that mirrors every drawn route into a GeoJSON
/// `FeatureCollection` file, rewritten on every change.
///
/// Each route contributes one `LineString` and one `Point` per stop. Without
/// a router, or when routing fails, the line runs straight between stops.
pub struct GeoJsonMapSurface {
    path: PathBuf,
    router: Option<Arc<dyn RoadRouter>>,
    state: Mutex<SurfaceState>,
}

impl GeoJsonMapSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            router: None,
            state: Mutex::new(SurfaceState::default()),
        }
    }

    /// Compute road geometry through `router`.
    pub fn with_router(mut self, router: Arc<dyn RoadRouter>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, state: &SurfaceState) -> Result<(), MapError> {
        let collection = feature_collection(&state.routes);
        let text = serde_json::to_string_pretty(&collection)
            .map_err(|e| MapError::Unavailable(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MapError::Unavailable(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| MapError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }
}

#[async_trait]
impl MapSurface for GeoJsonMapSurface {
    async fn add_route(&self, request: RouteRequest) -> Result<RouteHandle, MapError> {
        let straight: Vec<[f64; 2]> = request
            .stops
            .iter()
            .map(|s| [s.point.longitude, s.point.latitude])
            .collect();

        let (line, routing_error) = match &self.router {
            Some(router) => {
                let points: Vec<_> = request.stops.iter().map(|s| s.point).collect();
                match router.route(&points).await {
                    Ok(line) => (line, None),
                    Err(e) => {
                        warn!("Road routing failed, drawing straight segments: {}", e);
                        (straight, Some(e.to_string()))
                    }
                }
            }
            None => (straight, None),
        };

        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = state.next_id;
        let routed = self.router.is_some() && routing_error.is_none();
        state.routes.insert(
            id,
            DrawnRoute {
                labels: request.labels(),
                stops: request.stops,
                style: request.style,
                line,
                routed,
            },
        );

        if let Err(e) = self.write(&state).await {
            state.routes.remove(&id);
            return Err(e);
        }

        let handle = RouteHandle::new(id);
        info!("Drew {} to {}", handle, self.path.display());

        match routing_error {
            Some(message) => Err(MapError::RoutingFailed { handle, message }),
            None => Ok(handle),
        }
    }

    async fn remove_route(&self, handle: RouteHandle) -> Result<(), MapError> {
        let mut state = self.state.lock().await;
        if state.routes.remove(&handle.id()).is_none() {
            debug!("{} already removed", handle);
            return Ok(());
        }
        self.write(&state).await
    }
}

fn feature_collection(routes: &BTreeMap<u64, DrawnRoute>) -> Value {
    let mut features = Vec::new();
    for (id, route) in routes {
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": route.line },
            "properties": {
                "route": id,
                "routed": route.routed,
                "stroke": route.style.color,
                "stroke-opacity": route.style.opacity,
                "stroke-width": route.style.weight,
            }
        }));
        for (stop, label) in route.stops.iter().zip(&route.labels) {
            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [stop.point.longitude, stop.point.latitude],
                },
                "properties": {
                    "route": id,
                    "name": stop.name,
                    "label": label,
                    "marker-color": route.style.color,
                }
            }));
        }
    }
    json!({ "type": "FeatureCollection", "features": features })
}
