//! LLM Gateway port
//!
//! Defines the interface for sending a single chat-completions request to a
//! language-model provider.

use async_trait::async_trait;
use routewise_domain::ProviderEndpoint;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The endpoint answered with a markup page instead of an API error,
    /// which almost always means the wrong provider or URL was selected.
    #[error(
        "Provider '{provider}' returned an HTML page (HTTP {status}); check the selected provider and its endpoint"
    )]
    ProviderMisconfigured { provider: String, status: u16 },

    #[error("Provider request failed (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// A single non-streaming chat request.
#[derive(Clone)]
pub struct ChatRequest {
    pub endpoint: ProviderEndpoint,
    pub credential: String,
    pub prompt: String,
    pub temperature: f32,
}

impl fmt::Debug for ChatRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatRequest")
            .field("endpoint", &self.endpoint)
            .field("credential", &"<redacted>")
            .field("prompt_bytes", &self.prompt.len())
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to chat-completions
/// providers. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send the prompt and return the assistant message content.
    async fn complete(&self, request: &ChatRequest) -> Result<String, GatewayError>;
}
