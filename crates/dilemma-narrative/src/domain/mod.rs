//! Domain layer for decision orchestration.

pub mod analysis;
pub mod commands;
pub mod prompts;
