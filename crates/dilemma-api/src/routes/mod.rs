//! Route modules organized by bounded context.

pub mod admin;
pub mod decisions;
pub mod health;
pub mod scenarios;
