//! Chat completions client for OpenAI-compatible providers.

use std::time::Duration;

use async_trait::async_trait;
use dilemma_core::generation::{GenerationError, GenerationGateway, GenerationRequest};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default endpoint (Groq's OpenAI-compatible API).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Connection settings for [`OpenAiCompatibleGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    api_key: SecretString,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Hard bound on a single HTTP exchange.
    pub request_timeout: Duration,
}

impl GatewayConfig {
    /// Creates a configuration with the default endpoint and model.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Generation gateway over an OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleGateway {
    config: GatewayConfig,
    client: Client,
}

impl OpenAiCompatibleGateway {
    /// Builds the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Transport` if the TLS backend cannot be
    /// initialised.
    pub fn new(config: GatewayConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GenerationError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    /// The configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_chat_request<'a>(&'a self, request: &'a GenerationRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system_prompt) = &request.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system_prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        ChatRequest {
            model: &self.config.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: 1.0,
            stream: false,
        }
    }

    fn classify_send_error(&self, error: &reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            GenerationError::Timeout {
                after_ms: u64::try_from(self.config.request_timeout.as_millis())
                    .unwrap_or(u64::MAX),
            }
        } else if error.is_connect() {
            GenerationError::Transport(format!("connection failed: {error}"))
        } else {
            GenerationError::Transport(error.to_string())
        }
    }

    fn classify_body_error(&self, error: &reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            self.classify_send_error(error)
        } else {
            GenerationError::MalformedResponse(format!("invalid JSON body: {error}"))
        }
    }

    async fn check_status(response: Response) -> Result<Response, GenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GenerationError::Provider {
            status: status.as_u16(),
            message: provider_message(&body),
        })
    }
}

/// Extracts `error.message` from an OpenAI-style error body, falling back
/// to the raw body.
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_owned())
}

#[async_trait]
impl GenerationGateway for OpenAiCompatibleGateway {
    #[instrument(skip(self, request), fields(model = %self.config.model, max_tokens = request.max_tokens))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = self.to_chat_request(request);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify_send_error(&e))?;
        let response = Self::check_status(response).await?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.classify_body_error(&e))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                GenerationError::MalformedResponse("response contained no message content".into())
            })?;

        debug!(content_len = content.len(), "completion received");
        Ok(content)
    }
}
