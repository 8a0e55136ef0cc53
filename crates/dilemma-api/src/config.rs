//! Server configuration read from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use dilemma_gateway::openai_gateway::{DEFAULT_BASE_URL, DEFAULT_MODEL, GatewayConfig};
use dilemma_gateway::retrying_gateway::RetryPolicy;
use dilemma_narrative::application::orchestrator::GenerationFailureMode;
use dilemma_session::application::store::EvictionPolicy;
use secrecy::SecretString;

use crate::error::AppError;

/// Generation provider settings.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// Provider credential.
    pub api_key: SecretString,
    /// OpenAI-compatible base URL.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// Timeout and retry bounds.
    pub retry: RetryPolicy,
    /// Whether generation failures degrade or fail the submission.
    pub failure_mode: GenerationFailureMode,
}

impl GenerationSettings {
    /// Connection settings for the HTTP gateway.
    #[must_use]
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(self.api_key.clone())
            .with_base_url(&self.base_url)
            .with_model(&self.model)
            .with_request_timeout(self.retry.attempt_timeout)
    }
}

/// Session lifetime settings.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// TTL and capacity bounds.
    pub eviction: EvictionPolicy,
    /// Period of the background TTL sweep.
    pub sweep_interval: Duration,
}

/// Cross-origin settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    /// Origin allowed to call the API.
    pub allowed_origin: String,
    /// Allow any origin instead.
    pub allow_any: bool,
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Scenario document path.
    pub scenarios_path: PathBuf,
    /// Generation provider.
    pub generation: GenerationSettings,
    /// Session store.
    pub sessions: SessionSettings,
    /// CORS.
    pub cors: CorsSettings,
    /// OTLP collector endpoint; tracing export is off when absent.
    pub otlp_endpoint: Option<String>,
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is invalid: {e}"))),
        _ => Ok(default),
    }
}

fn string_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first missing or invalid variable.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first missing or invalid variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key = lookup("GENERATION_API_KEY")
            .or_else(|| lookup("GROQ_API_KEY"))
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "GENERATION_API_KEY (or GROQ_API_KEY) environment variable must be set"
                        .to_owned(),
                )
            })?;

        let session_capacity: usize = parse_or(&lookup, "SESSION_CAPACITY", 10_000)?;
        if session_capacity == 0 {
            return Err(AppError::Config(
                "SESSION_CAPACITY must be at least 1".to_owned(),
            ));
        }
        let ttl_secs: i64 = parse_or(&lookup, "SESSION_TTL_SECS", 3600)?;
        if ttl_secs <= 0 {
            return Err(AppError::Config(
                "SESSION_TTL_SECS must be positive".to_owned(),
            ));
        }
        let sweep_secs: u64 = parse_or(&lookup, "SESSION_SWEEP_INTERVAL_SECS", 60)?;
        if sweep_secs == 0 {
            return Err(AppError::Config(
                "SESSION_SWEEP_INTERVAL_SECS must be positive".to_owned(),
            ));
        }

        Ok(Self {
            host: string_or(&lookup, "HOST", "0.0.0.0"),
            port: parse_or(&lookup, "PORT", 8000)?,
            scenarios_path: PathBuf::from(string_or(
                &lookup,
                "SCENARIOS_PATH",
                "data/scenarios.json",
            )),
            generation: GenerationSettings {
                api_key: SecretString::from(api_key),
                base_url: string_or(&lookup, "GENERATION_BASE_URL", DEFAULT_BASE_URL),
                model: string_or(&lookup, "GENERATION_MODEL", DEFAULT_MODEL),
                retry: RetryPolicy {
                    attempt_timeout: Duration::from_secs(parse_or(
                        &lookup,
                        "GENERATION_TIMEOUT_SECS",
                        30,
                    )?),
                    max_retries: parse_or(&lookup, "GENERATION_MAX_RETRIES", 2)?,
                    retry_delay: Duration::from_millis(parse_or(
                        &lookup,
                        "GENERATION_RETRY_DELAY_MS",
                        500,
                    )?),
                },
                failure_mode: parse_or(
                    &lookup,
                    "GENERATION_FAILURE_MODE",
                    GenerationFailureMode::Degrade,
                )?,
            },
            sessions: SessionSettings {
                eviction: EvictionPolicy {
                    idle_ttl: chrono::Duration::seconds(ttl_secs),
                    capacity: session_capacity,
                },
                sweep_interval: Duration::from_secs(sweep_secs),
            },
            cors: CorsSettings {
                allowed_origin: string_or(&lookup, "CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
                allow_any: parse_or(&lookup, "CORS_ALLOW_ANY", false)?,
            },
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
