//! Sequence Waypoints use case
//!
//! Asks a language model to reorder the requested stops and recovers a
//! [`TripPlan`] from whatever text comes back.

use crate::ports::llm_gateway::{ChatRequest, GatewayError, LlmGateway};
use routewise_domain::{
    OrderingMismatch, PlanParseError, PromptTemplate, ProviderEndpoint, TripPlan, TripQuery,
    parse_trip_plan, util::excerpt,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Specific reason the AI stage failed.
#[derive(Error, Debug)]
pub enum SequencerFailure {
    #[error(
        "provider '{provider}' returned an HTML page (HTTP {status}); the selected provider or endpoint is probably wrong"
    )]
    ProviderMisconfigured { provider: String, status: u16 },

    #[error("AI API request failed (HTTP {status}): {message}")]
    ProviderRequestFailed { status: u16, message: String },

    #[error("could not reach the AI provider: {0}")]
    Transport(String),

    #[error("the AI response format was not recognised, please retry ({0})")]
    MalformedAiResponse(String),

    #[error(transparent)]
    OrderingMismatch(#[from] OrderingMismatch),
}

impl From<GatewayError> for SequencerFailure {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::ProviderMisconfigured { provider, status } => {
                SequencerFailure::ProviderMisconfigured { provider, status }
            }
            GatewayError::RequestFailed { status, message } => {
                SequencerFailure::ProviderRequestFailed { status, message }
            }
            GatewayError::ConnectionError(e) => SequencerFailure::Transport(e),
            GatewayError::Timeout => SequencerFailure::Transport("request timed out".to_string()),
            GatewayError::UnexpectedResponse(e) => SequencerFailure::MalformedAiResponse(e),
        }
    }
}

impl From<PlanParseError> for SequencerFailure {
    fn from(error: PlanParseError) -> Self {
        SequencerFailure::MalformedAiResponse(error.to_string())
    }
}

/// Every failure of the AI stage, as one category.
#[derive(Error, Debug)]
#[error("AI stage failed: {0}")]
pub struct AiStageError(#[from] pub SequencerFailure);

impl AiStageError {
    pub fn failure(&self) -> &SequencerFailure {
        &self.0
    }

    pub fn is_misconfigured(&self) -> bool {
        matches!(self.0, SequencerFailure::ProviderMisconfigured { .. })
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self.0, SequencerFailure::MalformedAiResponse(_))
    }
}

/// Input for the [`SequenceWaypointsUseCase`].
#[derive(Debug, Clone)]
pub struct SequenceWaypointsInput {
    pub query: TripQuery,
    pub provider: ProviderEndpoint,
    pub credential: String,
    pub temperature: f32,
}

/// Use case for obtaining a trip plan from a language model.
///
/// 1. Build the sequencing prompt
/// 2. Send one non-streaming chat request
/// 3. Recover the plan JSON from the reply
///
/// The returned ordering is not checked against the request here.
pub struct SequenceWaypointsUseCase {
    gateway: Arc<dyn LlmGateway>,
}

impl Clone for SequenceWaypointsUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl SequenceWaypointsUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, input: &SequenceWaypointsInput) -> Result<TripPlan, AiStageError> {
        let prompt =
            PromptTemplate::sequencing(&input.query.start, &input.query.end, &input.query.waypoints);

        info!(
            "Asking {} ({}) to order {} waypoints",
            input.provider.id,
            input.provider.model,
            input.query.waypoints.len()
        );

        let request = ChatRequest {
            endpoint: input.provider.clone(),
            credential: input.credential.clone(),
            prompt,
            temperature: input.temperature,
        };

        let raw = self
            .gateway
            .complete(&request)
            .await
            .map_err(SequencerFailure::from)?;

        debug!("Model reply: {}", excerpt(&raw, 300));

        let plan = parse_trip_plan(&raw).map_err(SequencerFailure::from)?;

        info!("Model proposed order: {:?}", plan.sorted_waypoints);
        Ok(plan)
    }
}
