//! Nominatim geocoder
//!
//! `GET {endpoint}?format=json&q={name}&limit=1`. The public instance allows
//! about one request per second and rejects clients without a User-Agent;
//! pacing is the caller's job (see `RequestPacer`), the header is set here.

use async_trait::async_trait;
use reqwest::Client;
use routewise_application::{GeocodeError, Geocoder};
use routewise_domain::GeoPoint;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Nominatim answers with strings, other compatible services with numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Option<f64> {
        match self {
            Coordinate::Number(n) => Some(*n),
            Coordinate::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: Coordinate,
    lon: Coordinate,
    #[serde(default)]
    display_name: Option<String>,
}

/// [`Geocoder`] backed by a Nominatim search endpoint.
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(
        endpoint: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| GeocodeError::ConnectionError(format!("HTTP client setup: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, name: &str) -> Result<Option<GeoPoint>, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("q", name), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| GeocodeError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::ServiceError {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::ConnectionError(e.to_string()))?;
        parse_search_response(&body)
    }
}

/// First usable hit of a search response, if any.
///
/// Hits with unparseable or out-of-range coordinates count as no match.
fn parse_search_response(body: &str) -> Result<Option<GeoPoint>, GeocodeError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    let Some(hit) = hits.into_iter().next() else {
        return Ok(None);
    };

    let (Some(latitude), Some(longitude)) = (hit.lat.value(), hit.lon.value()) else {
        debug!("Unparseable coordinates for {:?}", hit.display_name);
        return Ok(None);
    };

    let point = GeoPoint::new(latitude, longitude);
    if !point.is_valid() {
        debug!("Out-of-range coordinates for {:?}: {}", hit.display_name, point);
        return Ok(None);
    }
    Ok(Some(point))
}
