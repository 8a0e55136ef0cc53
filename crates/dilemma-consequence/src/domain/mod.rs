//! Domain layer for the consequence rule engine.

pub mod prompt;
pub mod trigger;
