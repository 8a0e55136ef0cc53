//! Application layer for the consequence rule engine.

pub mod generator;
