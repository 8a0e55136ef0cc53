//! Test gateways: mock `GenerationGateway` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use dilemma_core::generation::{GenerationError, GenerationGateway, GenerationRequest};

/// A gateway that replays queued results in order and records every
/// request it receives. Once the queue is drained it answers with the
/// fallback text.
#[derive(Debug)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    fallback: String,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGateway {
    /// Creates a gateway that answers every request with `text`.
    #[must_use]
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: text.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a gateway that replays `responses` first.
    #[must_use]
    pub fn with_responses(
        responses: impl IntoIterator<Item = Result<String, GenerationError>>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            fallback: fallback.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every request received, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationGateway for ScriptedGateway {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// A gateway that always fails with a provider error. Useful for testing
/// degradation paths.
#[derive(Debug)]
pub struct FailingGateway;

#[async_trait]
impl GenerationGateway for FailingGateway {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Provider {
            status: 503,
            message: "service unavailable".into(),
        })
    }
}
