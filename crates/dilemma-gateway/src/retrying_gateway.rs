//! Timeout and fixed retry policy around any gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dilemma_core::generation::{GenerationError, GenerationGateway, GenerationRequest};
use tracing::warn;

/// Bounds for [`RetryingGateway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Per-attempt time limit.
    pub attempt_timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Fixed pause between attempts.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(30),
            max_retries: 2,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Wraps a gateway with a per-attempt timeout and a fixed retry count.
///
/// Only errors for which [`GenerationError::is_retryable`] holds are
/// retried. A generation request has no side effects beyond its response,
/// so repeating it is safe.
pub struct RetryingGateway {
    inner: Arc<dyn GenerationGateway>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for RetryingGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingGateway")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RetryingGateway {
    /// Wraps `inner` with `policy`.
    #[must_use]
    pub fn new(inner: Arc<dyn GenerationGateway>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn attempt(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        match tokio::time::timeout(self.policy.attempt_timeout, self.inner.generate(request)).await
        {
            Ok(result) => result,
            Err(_elapsed) => Err(GenerationError::Timeout {
                after_ms: u64::try_from(self.policy.attempt_timeout.as_millis())
                    .unwrap_or(u64::MAX),
            }),
        }
    }
}

#[async_trait]
impl GenerationGateway for RetryingGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let mut attempt = 0;
        loop {
            match self.attempt(request).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.policy.max_retries,
                        error = %e,
                        "generation attempt failed, retrying"
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
