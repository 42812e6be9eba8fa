//! OSRM road routing
//!
//! `GET {endpoint}/route/v1/driving/{lon,lat;lon,lat;...}?overview=full&geometries=geojson`

use async_trait::async_trait;
use reqwest::Client;
use routewise_domain::GeoPoint;
use routewise_domain::util::excerpt;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from a routing backend.
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Routing service returned HTTP {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("No route found: {0}")]
    NoRoute(String),

    #[error("Invalid routing response: {0}")]
    InvalidResponse(String),
}

/// Computes road geometry through an ordered list of points.
#[async_trait]
pub trait RoadRouter: Send + Sync {
    /// Line vertices as `[longitude, latitude]` pairs.
    async fn route(&self, points: &[GeoPoint]) -> Result<Vec<[f64; 2]>, RoutingError>;
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// [`RoadRouter`] backed by an OSRM server.
pub struct OsrmRouter {
    client: Client,
    endpoint: String,
}

impl OsrmRouter {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RoutingError::ConnectionError(format!("HTTP client setup: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl RoadRouter for OsrmRouter {
    async fn route(&self, points: &[GeoPoint]) -> Result<Vec<[f64; 2]>, RoutingError> {
        let url = route_url(&self.endpoint, points);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RoutingError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ConnectionError(e.to_string()))?;

        // OSRM reports NoRoute and friends with a 400 and a JSON body.
        if !status.is_success() && !body.trim_start().starts_with('{') {
            return Err(RoutingError::ServiceError {
                status: status.as_u16(),
                message: excerpt(&body, 200),
            });
        }
        parse_route_response(&body)
    }
}

fn route_url(endpoint: &str, points: &[GeoPoint]) -> String {
    let path = points
        .iter()
        .map(|p| format!("{},{}", p.longitude, p.latitude))
        .collect::<Vec<_>>()
        .join(";");
    format!(
        "{}/route/v1/driving/{}?overview=full&geometries=geojson",
        endpoint.trim_end_matches('/'),
        path
    )
}

fn parse_route_response(body: &str) -> Result<Vec<[f64; 2]>, RoutingError> {
    let response: OsrmResponse =
        serde_json::from_str(body).map_err(|e| RoutingError::InvalidResponse(e.to_string()))?;

    if response.code != "Ok" {
        return Err(RoutingError::NoRoute(
            response.message.unwrap_or(response.code),
        ));
    }

    response
        .routes
        .into_iter()
        .next()
        .map(|route| route.geometry.coordinates)
        .filter(|coordinates| coordinates.len() >= 2)
        .ok_or_else(|| RoutingError::NoRoute("empty route geometry".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_url_uses_lon_lat_order() {
        let url = route_url(
            "https://router.project-osrm.org/",
            &[GeoPoint::new(39.9, 116.4), GeoPoint::new(40.08, 116.6)],
        );
        assert_eq!(
            url,
            "https://router.project-osrm.org/route/v1/driving/116.4,39.9;116.6,40.08?overview=full&geometries=geojson"
        );
    }

    #[test]
    fn test_parse_geometry() {
        let body = r#"{"code":"Ok","routes":[{"distance":1200.5,"geometry":{"type":"LineString","coordinates":[[116.4,39.9],[116.41,39.91],[116.6,40.08]]}}],"waypoints":[]}"#;
        let line = parse_route_response(body).unwrap();
        assert_eq!(line.len(), 3);
        assert_eq!(line[0], [116.4, 39.9]);
    }

    #[test]
    fn test_no_route_code() {
        let body = r#"{"code":"NoRoute","message":"Impossible route between points"}"#;
        match parse_route_response(body) {
            Err(RoutingError::NoRoute(message)) => {
                assert_eq!(message, "Impossible route between points")
            }
            other => panic!("expected NoRoute, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_body() {
        assert!(matches!(
            parse_route_response("<html>"),
            Err(RoutingError::InvalidResponse(_))
        ));
    }
}
