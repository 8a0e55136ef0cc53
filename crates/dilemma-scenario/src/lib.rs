//! Dilemma: Scenario catalog and step progression bounded context.
//!
//! Responsible for the scenario data model and its load-time validation,
//! the atomically reloadable in-memory catalog, scenario sources, and the
//! linear step progression rules.

pub mod application;
pub mod domain;
