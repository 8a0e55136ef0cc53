//! In-memory scenario catalog with atomic reload.
//!
//! Readers clone an `Arc` to the current [`CatalogSnapshot`] and work on
//! it without holding any lock; a reload builds a complete new snapshot
//! and swaps the pointer, so no reader observes a partially loaded set.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use dilemma_core::clock::Clock;
use dilemma_core::error::DomainError;
use serde::Serialize;
use tracing::{info, warn};

use crate::application::source::{ScenarioBundle, ScenarioSource};
use crate::domain::model::{DecisionPoint, Scenario};
use crate::domain::progression;

/// An immutable, fully validated scenario set.
#[derive(Debug, Default)]
pub struct CatalogSnapshot {
    by_id: HashMap<String, Arc<Scenario>>,
    ordered: Vec<Arc<Scenario>>,
    report: Option<CatalogLoadReport>,
}

impl CatalogSnapshot {
    /// Looks up a scenario by ID.
    #[must_use]
    pub fn get(&self, scenario_id: &str) -> Option<&Arc<Scenario>> {
        self.by_id.get(scenario_id)
    }

    /// Scenarios in source order.
    #[must_use]
    pub fn scenarios(&self) -> &[Arc<Scenario>] {
        &self.ordered
    }

    /// Details of the load that produced this snapshot, if any.
    #[must_use]
    pub fn report(&self) -> Option<&CatalogLoadReport> {
        self.report.as_ref()
    }
}

/// Outcome of a successful catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogLoadReport {
    /// Number of scenarios now live.
    pub scenario_count: usize,
    /// SHA-256 of the source the scenarios were read from.
    pub version_hash: String,
    /// When the snapshot was installed.
    pub loaded_at: DateTime<Utc>,
}

/// Holds scenario definitions keyed by ID.
#[derive(Debug, Default)]
pub struct ScenarioCatalog {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl ScenarioCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the entire catalog with `bundle`.
    ///
    /// Every record is validated first. If any record is invalid, or two
    /// records share an ID, nothing is replaced and the previous snapshot
    /// stays live.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for the first invalid record.
    pub fn load(
        &self,
        bundle: ScenarioBundle,
        clock: &dyn Clock,
    ) -> Result<CatalogLoadReport, DomainError> {
        let mut by_id = HashMap::with_capacity(bundle.scenarios.len());
        let mut ordered = Vec::with_capacity(bundle.scenarios.len());

        for scenario in bundle.scenarios {
            scenario.validate()?;
            let scenario = Arc::new(scenario);
            if by_id
                .insert(scenario.id.clone(), Arc::clone(&scenario))
                .is_some()
            {
                return Err(DomainError::Validation(format!(
                    "duplicate scenario id '{}'",
                    scenario.id
                )));
            }
            ordered.push(scenario);
        }

        let report = CatalogLoadReport {
            scenario_count: ordered.len(),
            version_hash: bundle.version_hash,
            loaded_at: clock.now(),
        };
        let snapshot = Arc::new(CatalogSnapshot {
            by_id,
            ordered,
            report: Some(report.clone()),
        });

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot;

        info!(
            scenario_count = report.scenario_count,
            version_hash = %report.version_hash,
            "scenario catalog loaded"
        );
        Ok(report)
    }

    /// Fetches from `source` and loads the result.
    ///
    /// # Errors
    ///
    /// Propagates source errors and validation errors; on error the
    /// previous snapshot stays live.
    pub async fn reload_from(
        &self,
        source: &dyn ScenarioSource,
        clock: &dyn Clock,
    ) -> Result<CatalogLoadReport, DomainError> {
        let bundle = source.fetch().await.inspect_err(|e| {
            warn!(source = %source.describe(), error = %e, "scenario source fetch failed");
        })?;
        self.load(bundle, clock).inspect_err(|e| {
            warn!(source = %source.describe(), error = %e, "scenario reload rejected");
        })
    }

    /// Looks up a scenario by ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ScenarioNotFound` if no such scenario is loaded.
    pub fn get(&self, scenario_id: &str) -> Result<Arc<Scenario>, DomainError> {
        self.snapshot()
            .get(scenario_id)
            .cloned()
            .ok_or_else(|| DomainError::ScenarioNotFound(scenario_id.to_owned()))
    }

    /// All scenarios in source order.
    #[must_use]
    pub fn list(&self) -> Vec<Arc<Scenario>> {
        self.snapshot().scenarios().to_vec()
    }

    /// Looks up the decision point at `step` of a scenario.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ScenarioNotFound` or
    /// `DomainError::DecisionPointNotFound`.
    pub fn get_decision_point(
        &self,
        scenario_id: &str,
        step: u32,
    ) -> Result<DecisionPoint, DomainError> {
        let scenario = self.get(scenario_id)?;
        scenario
            .decision_point(step)
            .cloned()
            .ok_or_else(|| DomainError::DecisionPointNotFound {
                scenario_id: scenario_id.to_owned(),
                step,
            })
    }

    /// Whether `step` is the final step of a scenario.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ScenarioNotFound` if no such scenario is loaded.
    pub fn is_final_step(&self, scenario_id: &str, step: u32) -> Result<bool, DomainError> {
        let scenario = self.get(scenario_id)?;
        Ok(progression::is_final(&scenario, step))
    }
}
