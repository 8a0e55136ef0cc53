//! Dilemma: Consequence rule engine bounded context.
//!
//! Responsible for deciding whether an earlier choice surfaces as a
//! consequence at the current step, and for asking the generation
//! gateway to narrate it.

pub mod application;
pub mod domain;
