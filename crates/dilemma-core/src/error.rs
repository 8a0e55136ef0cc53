//! Domain error types.

use thiserror::Error;

use crate::generation::GenerationError;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No scenario is registered under the given ID.
    #[error("scenario not found: {0}")]
    ScenarioNotFound(String),

    /// The scenario exists but has no decision point at the given step.
    #[error("decision point not found: scenario {scenario_id}, step {step}")]
    DecisionPointNotFound {
        /// The scenario that was searched.
        scenario_id: String,
        /// The requested step.
        step: u32,
    },

    /// No session is registered under the given ID.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// A malformed scenario record, rule, or request.
    #[error("validation error: {0}")]
    Validation(String),

    /// The external generation gateway failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Returns `true` for the three not-found variants.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ScenarioNotFound(_) | Self::DecisionPointNotFound { .. } | Self::SessionNotFound(_)
        )
    }
}
