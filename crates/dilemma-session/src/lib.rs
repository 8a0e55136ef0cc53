//! Dilemma: Session & decision history bounded context.
//!
//! Responsible for per-user traversal state: the append-only record of
//! choices made in a scenario, serialized mutation per session, and
//! eviction of idle sessions.

pub mod application;
pub mod domain;
