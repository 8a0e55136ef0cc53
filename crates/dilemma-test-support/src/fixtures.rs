//! Fixture scenarios shared across crate tests.

use dilemma_scenario::domain::model::{ChoiceOption, ConsequenceRule, DecisionPoint, Scenario};

/// Builds a consequence rule with a generated template.
#[must_use]
pub fn rule(trigger_choice: &str, trigger_step: u32, appears_at_step: u32) -> ConsequenceRule {
    ConsequenceRule {
        trigger_choice: trigger_choice.to_owned(),
        trigger_step,
        appears_at_step,
        consequence_template: format!(
            "Choosing {trigger_choice} at step {trigger_step} resurfaces at step {appears_at_step}"
        ),
    }
}

fn choice(id: &str, text: &str) -> ChoiceOption {
    ChoiceOption {
        id: id.to_owned(),
        text: text.to_owned(),
    }
}

fn point(step: u32) -> DecisionPoint {
    DecisionPoint {
        step,
        context: format!("context {step}"),
        prompt: format!("prompt {step}"),
        choices: vec![
            choice("A", &format!("option A at {step}")),
            choice("B", &format!("option B at {step}")),
        ],
    }
}

/// Three decision points with choices `A`/`B` and one rule `A@1 -> 3`.
#[must_use]
pub fn three_step_scenario() -> Scenario {
    scenario_with_id("three_step")
}

/// Same shape as [`three_step_scenario`] under a custom ID.
#[must_use]
pub fn scenario_with_id(id: &str) -> Scenario {
    Scenario {
        id: id.to_owned(),
        title: format!("Title of {id}"),
        description: format!("Description of {id}"),
        category: "business".to_owned(),
        difficulty: "beginner".to_owned(),
        decision_points: (1..=3).map(point).collect(),
        consequence_rules: vec![rule("A", 1, 3)],
        estimated_time_minutes: 15,
    }
}

/// A realistic workplace scenario with readable prose.
#[must_use]
pub fn leaked_report_scenario() -> Scenario {
    Scenario {
        id: "leaked_report".to_owned(),
        title: "The Leaked Report".to_owned(),
        description: "You find a confidential layoff report left on the office printer."
            .to_owned(),
        category: "business".to_owned(),
        difficulty: "beginner".to_owned(),
        decision_points: vec![
            DecisionPoint {
                step: 1,
                context: "Your friend Tom is on the layoff list and just signed a mortgage."
                    .to_owned(),
                prompt: "What do you do with what you know?".to_owned(),
                choices: vec![
                    choice("A", "Tell Tom immediately"),
                    choice("B", "Keep it confidential"),
                ],
            },
            DecisionPoint {
                step: 2,
                context: "HR announces an investigation into how the report was seen."
                    .to_owned(),
                prompt: "Do you come forward?".to_owned(),
                choices: vec![
                    choice("A", "Admit you saw the report"),
                    choice("B", "Stay quiet"),
                ],
            },
            DecisionPoint {
                step: 3,
                context: "Your manager asks you to help plan the restructuring.".to_owned(),
                prompt: "How do you respond?".to_owned(),
                choices: vec![
                    choice("A", "Accept and advocate for affected staff"),
                    choice("B", "Decline the assignment"),
                ],
            },
        ],
        consequence_rules: vec![ConsequenceRule {
            trigger_choice: "A".to_owned(),
            trigger_step: 1,
            appears_at_step: 3,
            consequence_template: "Tom quietly started job hunting and word spread".to_owned(),
        }],
        estimated_time_minutes: 10,
    }
}
