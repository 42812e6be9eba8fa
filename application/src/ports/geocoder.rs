//! Geocoder port
//!
//! Resolves a free-text place name to a single coordinate.

use async_trait::async_trait;
use routewise_domain::GeoPoint;
use thiserror::Error;

/// Errors from a single geocoding lookup.
///
/// These never abort a batch; the resolver logs them and skips the name.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Geocoding service returned HTTP {status}")]
    ServiceError { status: u16 },

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

/// Place-name lookup against a geocoding service.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up the best match for `name`.
    ///
    /// `Ok(None)` means the service answered but found nothing.
    async fn lookup(&self, name: &str) -> Result<Option<GeoPoint>, GeocodeError>;
}
