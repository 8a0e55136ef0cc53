//! Command abstractions.

use uuid::Uuid;

/// Trait implemented by every inbound request that mutates engine state.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable dotted name for this command, used as a log field.
    fn command_type(&self) -> &'static str;

    /// Correlation ID tying the command to its log lines and gateway calls.
    fn correlation_id(&self) -> Uuid;
}
