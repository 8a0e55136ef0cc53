//! Shared application state.

use std::sync::Arc;

use dilemma_core::clock::Clock;
use dilemma_core::generation::GenerationGateway;
use dilemma_narrative::application::orchestrator::{DecisionOrchestrator, GenerationFailureMode};
use dilemma_scenario::application::catalog::ScenarioCatalog;
use dilemma_scenario::application::source::ScenarioSource;
use dilemma_session::application::store::SessionStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Scenario definitions.
    pub catalog: Arc<ScenarioCatalog>,
    /// Session histories.
    pub sessions: Arc<SessionStore>,
    /// Submission pipeline.
    pub orchestrator: Arc<DecisionOrchestrator>,
    /// Where catalog reloads read from.
    pub scenario_source: Arc<dyn ScenarioSource>,
    /// Clock for load reports.
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("scenario_source", &self.scenario_source.describe())
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        catalog: Arc<ScenarioCatalog>,
        sessions: Arc<SessionStore>,
        gateway: Arc<dyn GenerationGateway>,
        scenario_source: Arc<dyn ScenarioSource>,
        clock: Arc<dyn Clock>,
        failure_mode: GenerationFailureMode,
    ) -> Self {
        let orchestrator = Arc::new(DecisionOrchestrator::new(
            Arc::clone(&catalog),
            Arc::clone(&sessions),
            gateway,
            failure_mode,
        ));
        Self {
            catalog,
            sessions,
            orchestrator,
            scenario_source,
            clock,
        }
    }
}
