//! Application layer for the Session context.

pub mod store;
