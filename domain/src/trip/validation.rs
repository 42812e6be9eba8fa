//! Input validation for a planning run.
//!
//! Turns the four raw form fields into a [`TripQuery`] plus credential, or
//! rejects them before any external call is made.

use super::entities::TripQuery;
use thiserror::Error;

/// Missing required input. The pipeline never starts when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter an API key")]
    MissingCredential,

    #[error("Start and end locations are required")]
    MissingEndpoints,
}

/// Raw, untrimmed form input.
#[derive(Debug, Clone, Default)]
pub struct RawTripInput {
    pub credential: String,
    pub start: String,
    pub end: String,
    /// Newline-delimited waypoint block.
    pub waypoints: String,
}

/// Validated input: the trip plus the credential used for the model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub credential: String,
    pub query: TripQuery,
}

impl RawTripInput {
    pub fn new(
        credential: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        waypoints: impl Into<String>,
    ) -> Self {
        Self {
            credential: credential.into(),
            start: start.into(),
            end: end.into(),
            waypoints: waypoints.into(),
        }
    }

    /// Validate the input.
    ///
    /// The credential is checked first, then start and end together.
    pub fn validate(&self) -> Result<ValidatedInput, ValidationError> {
        let credential = self.credential.trim();
        if credential.is_empty() {
            return Err(ValidationError::MissingCredential);
        }

        let start = self.start.trim();
        let end = self.end.trim();
        if start.is_empty() || end.is_empty() {
            return Err(ValidationError::MissingEndpoints);
        }

        Ok(ValidatedInput {
            credential: credential.to_string(),
            query: TripQuery::new(start, end, split_waypoints(&self.waypoints)),
        })
    }
}

/// Split a newline-delimited block into waypoint names.
///
/// Each line is trimmed and blank lines are dropped. Order and duplicates are
/// preserved.
pub fn split_waypoints(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
