//! Prompt for consequence narration.

use dilemma_core::generation::GenerationRequest;
use dilemma_scenario::domain::model::ConsequenceRule;
use dilemma_session::domain::session::RecordedChoice;

use super::trigger::format_history;

/// Higher temperature gives more varied consequences.
pub const CONSEQUENCE_TEMPERATURE: f32 = 0.8;

/// Token bound for a consequence narrative.
pub const CONSEQUENCE_MAX_TOKENS: u32 = 200;

const SYSTEM_PROMPT: &str = "You are a scenario writer creating realistic consequences for ethical decisions.
Generate consequences that:
- Are believable and grounded in reality
- Connect logically to past decisions
- Are 50-100 words
- Are neutral in tone (not judgmental)
- Show both positive and negative ripple effects";

/// Builds the generation request narrating `rule` for a session.
#[must_use]
pub fn consequence_request(
    rule: &ConsequenceRule,
    history: &[RecordedChoice],
    scenario_context: &str,
) -> GenerationRequest {
    let prompt = format!(
        "Scenario Context: {scenario_context}\n\n\
         User Decision History:\n{history}\n\n\
         Consequence Template: {template}\n\n\
         Generate a realistic consequence that appears at step {appears}, \
         triggered by the choice made at step {trigger}.\n\n\
         The consequence should feel natural and show how the earlier decision \
         ripples forward in unexpected ways.",
        history = format_history(history),
        template = rule.consequence_template,
        appears = rule.appears_at_step,
        trigger = rule.trigger_step,
    );

    GenerationRequest::new(prompt, CONSEQUENCE_TEMPERATURE, CONSEQUENCE_MAX_TOKENS)
        .with_system_prompt(SYSTEM_PROMPT)
}
