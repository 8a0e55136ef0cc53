//! Commands for the decision orchestration context.

use dilemma_core::command::Command;
use uuid::Uuid;

/// Command to submit a choice at one step of a scenario.
#[derive(Debug, Clone)]
pub struct SubmitChoice {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Scenario being played.
    pub scenario_id: String,
    /// Client session token; absent or blank starts a new session.
    pub session_id: Option<String>,
    /// Step the choice is submitted for.
    pub step: u32,
    /// ID of the chosen option.
    pub choice_id: String,
    /// Text of the chosen option.
    pub choice_text: String,
}

impl Command for SubmitChoice {
    fn command_type(&self) -> &'static str {
        "decision.submit_choice"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
