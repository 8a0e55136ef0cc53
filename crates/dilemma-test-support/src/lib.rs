//! Shared test mocks and utilities for the Dilemma decision engine.

mod clock;
mod fixtures;
mod gateway;
mod source;

pub use clock::{FixedClock, ManualClock};
pub use fixtures::{leaked_report_scenario, rule, scenario_with_id, three_step_scenario};
pub use gateway::{FailingGateway, ScriptedGateway};
pub use source::StaticScenarioSource;
