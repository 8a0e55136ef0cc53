//! Port to the external natural-language generation service.
//!
//! The engine never produces prose itself. Analyses and consequence
//! narratives are requested through [`GenerationGateway`], and every
//! provider failure is reported as a [`GenerationError`].

use async_trait::async_trait;
use thiserror::Error;

/// A single completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// The user prompt.
    pub prompt: String,
    /// Optional system instructions.
    pub system_prompt: Option<String>,
    /// Sampling temperature. Lower values give more consistent output.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Creates a request without a system prompt.
    #[must_use]
    pub fn new(prompt: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            temperature,
            max_tokens,
        }
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Failure modes of the generation gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The provider answered with a non-success status.
    #[error("generation provider returned {status}: {message}")]
    Provider {
        /// HTTP status code.
        status: u16,
        /// Provider error body or summary.
        message: String,
    },

    /// The attempt did not finish within the configured bound.
    #[error("generation timed out after {after_ms} ms")]
    Timeout {
        /// Elapsed bound in milliseconds.
        after_ms: u64,
    },

    /// Connection-level failure before a response was received.
    #[error("generation transport error: {0}")]
    Transport(String),

    /// A response arrived but could not be interpreted.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// Whether a retry of the same request may succeed.
    ///
    /// Rate limiting (429) and server-side (5xx) statuses, timeouts and
    /// transport errors are retryable. Client errors and malformed
    /// responses are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider { status, .. } => *status == 429 || *status >= 500,
            Self::Timeout { .. } | Self::Transport(_) => true,
            Self::MalformedResponse(_) => false,
        }
    }
}

/// Gateway to the text generation provider.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Generates text for the request.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
