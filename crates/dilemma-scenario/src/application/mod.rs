//! Application layer for the Scenario context.

pub mod catalog;
pub mod source;
