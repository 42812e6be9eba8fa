//! Resolve Coordinates use case
//!
//! Geocodes an ordered list of place names one at a time, pacing every
//! request through a [`RequestPacer`]. A failed or empty lookup skips that
//! name and the batch carries on; the output keeps the relative order of the
//! names that did resolve.

use crate::ports::geocoder::Geocoder;
use crate::ports::pacer::RequestPacer;
use crate::ports::progress::{PlanProgressNotifier, PlanWarning};
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use routewise_domain::{GeoPoint, ResolvedPlace};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a resolution batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedCoordinates {
    /// Resolved places, in input order.
    pub places: Vec<ResolvedPlace>,
    /// Names the service found no match for.
    pub missing: Vec<String>,
    /// Names whose lookup failed, with the reason.
    pub failed: Vec<(String, String)>,
    /// Warnings surfaced during the batch, in the order they occurred.
    pub warnings: Vec<PlanWarning>,
}

impl ResolvedCoordinates {
    pub fn points(&self) -> Vec<GeoPoint> {
        self.places.iter().map(|p| p.point).collect()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Use case for turning place names into coordinates.
pub struct ResolveCoordinatesUseCase {
    geocoder: Arc<dyn Geocoder>,
    pacer: Arc<dyn RequestPacer>,
    run_logger: Arc<dyn RunLogger>,
}

impl Clone for ResolveCoordinatesUseCase {
    fn clone(&self) -> Self {
        Self {
            geocoder: self.geocoder.clone(),
            pacer: self.pacer.clone(),
            run_logger: self.run_logger.clone(),
        }
    }
}

impl ResolveCoordinatesUseCase {
    pub fn new(geocoder: Arc<dyn Geocoder>, pacer: Arc<dyn RequestPacer>) -> Self {
        Self {
            geocoder,
            pacer,
            run_logger: Arc::new(NoRunLogger),
        }
    }

    /// Replace the pacer.
    pub fn with_pacer(mut self, pacer: Arc<dyn RequestPacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Create with a run logger.
    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.run_logger = logger;
        self
    }

    /// Resolve `names` strictly in order, one request at a time.
    pub async fn execute(
        &self,
        names: &[String],
        progress: &dyn PlanProgressNotifier,
    ) -> ResolvedCoordinates {
        let total = names.len();
        let mut resolved = ResolvedCoordinates::default();

        for (index, name) in names.iter().enumerate() {
            progress.show_status(&format!(
                "Searching place ({}/{}): {}",
                index + 1,
                total,
                name
            ));

            self.pacer.acquire(index).await;

            match self.geocoder.lookup(name).await {
                Ok(Some(point)) => {
                    info!("Found {}: {}", name, point);
                    self.run_logger.log(RunEvent::PlaceResolved {
                        name: name.clone(),
                        latitude: point.latitude,
                        longitude: point.longitude,
                    });
                    resolved.places.push(ResolvedPlace::new(name.clone(), point));
                }
                Ok(None) => {
                    warn!("Place not found: {}", name);
                    self.run_logger.log(RunEvent::PlaceMissing { name: name.clone() });
                    let warning = PlanWarning::PlaceNotFound { name: name.clone() };
                    progress.on_warning(&warning);
                    resolved.warnings.push(warning);
                    resolved.missing.push(name.clone());
                }
                Err(e) => {
                    warn!("Search failed for {}: {}", name, e);
                    let reason = e.to_string();
                    self.run_logger.log(RunEvent::PlaceFailed {
                        name: name.clone(),
                        reason: reason.clone(),
                    });
                    let warning = PlanWarning::LookupFailed {
                        name: name.clone(),
                        reason: reason.clone(),
                    };
                    progress.on_warning(&warning);
                    resolved.warnings.push(warning);
                    resolved.failed.push((name.clone(), reason));
                }
            }
        }

        info!("Resolved {}/{} places", resolved.len(), total);
        resolved
    }
}
