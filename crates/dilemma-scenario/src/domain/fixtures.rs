//! In-crate scenario fixtures for unit tests.

use super::model::{ChoiceOption, ConsequenceRule, DecisionPoint, Scenario};

pub(crate) fn rule(trigger_choice: &str, trigger_step: u32, appears_at_step: u32) -> ConsequenceRule {
    ConsequenceRule {
        trigger_choice: trigger_choice.to_owned(),
        trigger_step,
        appears_at_step,
        consequence_template: format!("{trigger_choice}@{trigger_step} echoes at {appears_at_step}"),
    }
}

fn point(step: u32) -> DecisionPoint {
    DecisionPoint {
        step,
        context: format!("context {step}"),
        prompt: format!("prompt {step}"),
        choices: vec![
            ChoiceOption {
                id: "A".to_owned(),
                text: format!("option A at {step}"),
            },
            ChoiceOption {
                id: "B".to_owned(),
                text: format!("option B at {step}"),
            },
        ],
    }
}

/// Three decision points and a single rule `A@1 -> 3`.
pub(crate) fn three_step_scenario() -> Scenario {
    scenario_with_id("leaked_report")
}

pub(crate) fn scenario_with_id(id: &str) -> Scenario {
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
