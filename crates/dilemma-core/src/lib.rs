//! Dilemma Core: shared domain abstractions.
//!
//! This crate defines the error taxonomy, the clock and command traits,
//! and the port through which the engine reaches the external text
//! generation service. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod generation;
