//! Dilemma: Decision orchestration bounded context.
//!
//! Responsible for handling a choice submission end to end: recording it
//! in the session, resolving scenario context, requesting an ethical
//! framework analysis, surfacing triggered consequences, and computing
//! step progression.

pub mod application;
pub mod domain;
