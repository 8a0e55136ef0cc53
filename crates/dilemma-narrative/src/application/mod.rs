//! Application layer for decision orchestration.

pub mod analyzer;
pub mod orchestrator;
pub mod query_handlers;
