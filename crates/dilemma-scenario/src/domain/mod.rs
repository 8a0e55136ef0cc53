//! Domain types and rules for the Scenario context.

pub mod model;
pub mod progression;

#[cfg(test)]
pub(crate) mod fixtures;
