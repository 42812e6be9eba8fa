//! OpenAI-compatible chat-completions gateway
//!
//! Every built-in provider (DeepSeek, OpenAI, Moonshot, Qwen) and every
//! `[providers.custom.*]` entry speaks the same request/response shape, so a
//! single adapter serves all of them; only the URL and model differ.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use routewise_application::{ChatRequest, GatewayError, LlmGateway};
use routewise_domain::util::excerpt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Longest error body excerpt carried in an error.
const ERROR_EXCERPT_BYTES: usize = 200;

// ─── Wire types ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 1],
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

// ─── Gateway ─────────────────────────────────────────────────────

/// [`LlmGateway`] over HTTP for chat-completions compatible providers.
pub struct ChatCompletionsGateway {
    client: Client,
}

impl ChatCompletionsGateway {
    /// Build a gateway whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(format!("HTTP client setup: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LlmGateway for ChatCompletionsGateway {
    async fn complete(&self, request: &ChatRequest) -> Result<String, GatewayError> {
        debug!("POST {} ({:?})", request.endpoint.url, request);

        let response = self
            .client
            .post(&request.endpoint.url)
            .bearer_auth(&request.credential)
            .json(&build_body(request))
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(classify_transport_error)?;

        if !status.is_success() {
            return Err(classify_error_response(
                &request.endpoint.id,
                status,
                &body,
            ));
        }

        extract_content(&body)
    }
}

fn build_body(request: &ChatRequest) -> CompletionBody<'_> {
    CompletionBody {
        model: &request.endpoint.model,
        messages: [WireMessage {
            role: "user",
            content: &request.prompt,
        }],
        temperature: request.temperature,
        stream: false,
    }
}

fn classify_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(error.to_string())
    }
}

/// Map a non-success response to a gateway error.
///
/// A markup body means the request hit a web page rather than an API, which
/// is reported as a misconfigured provider instead of a raw HTTP failure.
fn classify_error_response(provider: &str, status: StatusCode, body: &str) -> GatewayError {
    let trimmed = body.trim_start();
    if trimmed.starts_with('<') {
        return GatewayError::ProviderMisconfigured {
            provider: provider.to_string(),
            status: status.as_u16(),
        };
    }

    let message = match serde_json::from_str::<ErrorEnvelope>(trimmed) {
        Ok(envelope) => excerpt(&envelope.error.message, ERROR_EXCERPT_BYTES),
        Err(_) if trimmed.is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        Err(_) => excerpt(trimmed, ERROR_EXCERPT_BYTES),
    };

    GatewayError::RequestFailed {
        status: status.as_u16(),
        message,
    }
}

fn extract_content(body: &str) -> Result<String, GatewayError> {
    let parsed: CompletionResponse = serde_json::from_str(body).map_err(|e| {
        GatewayError::UnexpectedResponse(format!(
            "{} in {}",
            e,
            excerpt(body, ERROR_EXCERPT_BYTES)
        ))
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            GatewayError::UnexpectedResponse("response has no choices[0].message.content".to_string())
        })
}
