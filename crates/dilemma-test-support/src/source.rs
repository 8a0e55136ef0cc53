//! In-memory scenario source.

use std::sync::Mutex;

use async_trait::async_trait;
use dilemma_core::error::DomainError;
use dilemma_scenario::application::source::{ScenarioBundle, ScenarioSource};
use dilemma_scenario::domain::model::Scenario;

/// A source that serves whatever scenarios it currently holds. Tests can
/// swap the contents to exercise reloads.
#[derive(Debug)]
pub struct StaticScenarioSource {
    scenarios: Mutex<Vec<Scenario>>,
}

impl StaticScenarioSource {
    /// Creates a source holding `scenarios`.
    #[must_use]
    pub fn new(scenarios: Vec<Scenario>) -> Self {
        Self {
            scenarios: Mutex::new(scenarios),
        }
    }

    /// Replaces the held scenarios.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn replace(&self, scenarios: Vec<Scenario>) {
        *self.scenarios.lock().unwrap() = scenarios;
    }
}

#[async_trait]
impl ScenarioSource for StaticScenarioSource {
    async fn fetch(&self) -> Result<ScenarioBundle, DomainError> {
        let scenarios = self.scenarios.lock().unwrap().clone();
        Ok(ScenarioBundle::from_scenarios(scenarios))
    }

    fn describe(&self) -> String {
        "static".to_owned()
    }
}
