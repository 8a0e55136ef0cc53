//! Choice submission pipeline.
//!
//! A submission is recorded first and never rolled back. Everything after
//! the record step reads from the session copy taken right after the
//! append, so concurrent submissions for the same session each see a
//! consistent history.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dilemma_consequence::application::generator::generate_consequence;
use dilemma_consequence::domain::trigger::check_trigger;
use dilemma_core::command::Command;
use dilemma_core::error::DomainError;
use dilemma_core::generation::GenerationGateway;
use dilemma_scenario::application::catalog::ScenarioCatalog;
use dilemma_scenario::domain::progression;
use dilemma_session::application::store::SessionStore;
use dilemma_session::domain::session::SessionId;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::application::analyzer::analyze_decision;
use crate::domain::analysis::FrameworkAnalysis;
use crate::domain::commands::SubmitChoice;

/// How generation failures affect a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationFailureMode {
    /// Return whatever succeeded, with a per-field error message.
    #[default]
    Degrade,
    /// Fail the whole submission on the first generation error.
    FailFast,
}

impl FromStr for GenerationFailureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "fail-fast" | "fail_fast" | "failfast" => Ok(Self::FailFast),
            other => Err(format!("unknown generation failure mode '{other}'")),
        }
    }
}

impl fmt::Display for GenerationFailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrade => f.write_str("degrade"),
            Self::FailFast => f.write_str("fail-fast"),
        }
    }
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionOutcome {
    /// Session the choice was recorded in.
    pub session_id: SessionId,
    /// Framework analysis, absent if generation failed.
    pub analysis: Option<FrameworkAnalysis>,
    /// Consequence narrative, present when a rule fired and generation succeeded.
    pub consequence: Option<String>,
    /// Next step to present, absent when final.
    pub next_step: Option<u32>,
    /// Whether this submission finished the scenario.
    pub is_final: bool,
    /// Why `analysis` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
    /// Why a triggered consequence is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consequence_error: Option<String>,
}

/// Composes catalog, session store, rule engine and gateway into a
/// single submission handler.
#[derive(Clone)]
pub struct DecisionOrchestrator {
    catalog: Arc<ScenarioCatalog>,
    sessions: Arc<SessionStore>,
    gateway: Arc<dyn GenerationGateway>,
    failure_mode: GenerationFailureMode,
}

impl fmt::Debug for DecisionOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionOrchestrator")
            .field("failure_mode", &self.failure_mode)
            .finish_non_exhaustive()
    }
}

impl DecisionOrchestrator {
    /// Creates an orchestrator over the shared stores.
    #[must_use]
    pub fn new(
        catalog: Arc<ScenarioCatalog>,
        sessions: Arc<SessionStore>,
        gateway: Arc<dyn GenerationGateway>,
        failure_mode: GenerationFailureMode,
    ) -> Self {
        Self {
            catalog,
            sessions,
            gateway,
            failure_mode,
        }
    }

    /// The configured failure mode.
    #[must_use]
    pub fn failure_mode(&self) -> GenerationFailureMode {
        self.failure_mode
    }

    /// Handles a choice submission.
    ///
    /// The choice is recorded before the scenario is resolved, so a
    /// submission for an unknown scenario still leaves its entry in the
    /// session history.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for step 0 or a blank choice ID,
    /// before any session is touched. Returns
    /// `DomainError::ScenarioNotFound` if the scenario is not loaded. In
    /// `FailFast` mode a gateway failure is returned as
    /// `DomainError::Generation`.
    #[instrument(
        skip(self, command),
        fields(
            correlation_id = %command.correlation_id(),
            scenario_id = %command.scenario_id,
            step = command.step,
        )
    )]
    pub async fn submit(&self, command: &SubmitChoice) -> Result<DecisionOutcome, DomainError> {
        if command.step == 0 {
            return Err(DomainError::Validation("step must be at least 1".to_owned()));
        }
        if command.choice_id.trim().is_empty() {
            return Err(DomainError::Validation("choice_id must not be empty".to_owned()));
        }

        let requested = SessionId::from_client(command.session_id.clone());
        let (handle, created) = self
            .sessions
            .get_or_create(requested, &command.scenario_id)
            .await;
        let session = self
            .sessions
            .record_choice(
                &handle,
                command.step,
                &command.choice_id,
                &command.choice_text,
            )
            .await;
        info!(
            command_type = command.command_type(),
            session_id = %session.session_id,
            created,
            "choice recorded"
        );

        let scenario = self.catalog.get(&command.scenario_id)?;
        let context = scenario
            .decision_point(command.step)
            .map_or(scenario.description.as_str(), |point| point.context.as_str());

        let (analysis, analysis_error) = match analyze_decision(
            self.gateway.as_ref(),
            &command.choice_text,
            context,
            &session.prior_choice_texts(),
        )
        .await
        {
            Ok(analysis) => (Some(analysis), None),
            Err(e) if self.failure_mode == GenerationFailureMode::FailFast => {
                return Err(e.into());
            }
            Err(e) => {
                warn!(error = %e, "framework analysis failed");
                (None, Some(e.to_string()))
            }
        };

        let mut consequence = None;
        let mut consequence_error = None;
        if let Some(rule) = check_trigger(
            &scenario.consequence_rules,
            &session.choices_made,
            command.step,
        ) {
            info!(
                trigger_step = rule.trigger_step,
                trigger_choice = %rule.trigger_choice,
                "consequence rule triggered"
            );
            match generate_consequence(
                self.gateway.as_ref(),
                rule,
                &session.choices_made,
                &scenario.description,
            )
            .await
            {
                Ok(text) => consequence = Some(text),
                Err(e) if self.failure_mode == GenerationFailureMode::FailFast => {
                    return Err(e.into());
                }
                Err(e) => {
                    warn!(error = %e, "consequence generation failed");
                    consequence_error = Some(e.to_string());
                }
            }
        }

        let progress = progression::progress(&scenario, command.step);

        Ok(DecisionOutcome {
            session_id: session.session_id,
            analysis,
            consequence,
            next_step: progress.next_step,
            is_final: progress.is_final,
            analysis_error,
            consequence_error,
        })
    }
}
