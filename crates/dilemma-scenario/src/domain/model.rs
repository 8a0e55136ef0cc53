//! Scenario data model and load-time validation.
//!
//! A scenario is a flat, ordered list of decision points plus a set of
//! consequence rules. Choices never change which decision point comes
//! next; they only influence which consequence narratives surface later.

use std::collections::HashSet;

use dilemma_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A single selectable option at a decision point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Short token, unique within its decision point (e.g. `"A"`).
    pub id: String,
    /// Text shown to the user.
    pub text: String,
}

/// One step of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPoint {
    /// 1-based step number; matches the point's position in the scenario.
    pub step: u32,
    /// Situation description.
    pub context: String,
    /// Question put to the user.
    pub prompt: String,
    /// Available choices, in display order.
    pub choices: Vec<ChoiceOption>,
}

impl DecisionPoint {
    /// Looks up a choice by its ID.
    #[must_use]
    pub fn choice(&self, choice_id: &str) -> Option<&ChoiceOption> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

/// Maps a choice made at an earlier step to a narrative event at a later one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsequenceRule {
    /// Choice ID that arms the rule.
    pub trigger_choice: String,
    /// Step at which `trigger_choice` must have been made.
    pub trigger_step: u32,
    /// Step at which the consequence surfaces.
    pub appears_at_step: u32,
    /// Seed text handed to the generation gateway.
    pub consequence_template: String,
}

/// A complete scenario definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique scenario ID.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Brief description, also used as fallback generation context.
    pub description: String,
    /// Category (business, medical, personal, civic, ...).
    pub category: String,
    /// Difficulty level (beginner, intermediate, advanced, ...).
    pub difficulty: String,
    /// Decision points ordered by step.
    pub decision_points: Vec<DecisionPoint>,
    /// Consequence rules, in priority order.
    pub consequence_rules: Vec<ConsequenceRule>,
    /// Estimated completion time in minutes.
    #[serde(rename = "estimated_time")]
    pub estimated_time_minutes: u32,
}

impl Scenario {
    /// Number of decision points, i.e. the final step number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn step_count(&self) -> u32 {
        self.decision_points.len() as u32
    }

    /// Returns the decision point for `step`, if any.
    #[must_use]
    pub fn decision_point(&self, step: u32) -> Option<&DecisionPoint> {
        let index = usize::try_from(step).ok()?.checked_sub(1)?;
        self.decision_points
            .get(index)
            .filter(|point| point.step == step)
    }

    /// Checks the structural invariants of the scenario.
    ///
    /// Decision point steps must form the contiguous range `1..=N` in
    /// order, every point needs at least one choice with unique non-empty
    /// IDs, and every consequence rule must reference a real choice at its
    /// trigger step and surface strictly later, no later than step `N`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` describing the first violation.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |detail: String| {
            DomainError::Validation(format!("scenario '{}': {detail}", self.id))
        };

        if self.id.trim().is_empty() {
            return Err(DomainError::Validation(
                "scenario id must not be empty".to_owned(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(invalid("title must not be empty".to_owned()));
        }
        if self.decision_points.is_empty() {
            return Err(invalid("at least one decision point is required".to_owned()));
        }

        for (position, point) in (1u32..).zip(&self.decision_points) {
            if point.step != position {
                return Err(invalid(format!(
                    "decision point at position {position} has step {}",
                    point.step
                )));
            }
            if point.choices.is_empty() {
                return Err(invalid(format!("step {position} has no choices")));
            }
            let mut seen = HashSet::new();
            for choice in &point.choices {
                if choice.id.trim().is_empty() {
                    return Err(invalid(format!("step {position} has a choice with an empty id")));
                }
                if !seen.insert(choice.id.as_str()) {
                    return Err(invalid(format!(
                        "step {position} repeats choice id '{}'",
                        choice.id
                    )));
                }
            }
        }

        let last_step = self.step_count();
        for (index, rule) in self.consequence_rules.iter().enumerate() {
            if rule.appears_at_step <= rule.trigger_step {
                return Err(invalid(format!(
                    "rule {index} appears at step {} which is not after trigger step {}",
                    rule.appears_at_step, rule.trigger_step
                )));
            }
            if rule.appears_at_step > last_step {
                return Err(invalid(format!(
                    "rule {index} appears at step {} beyond final step {last_step}",
                    rule.appears_at_step
                )));
            }
            let Some(point) = self.decision_point(rule.trigger_step) else {
                return Err(invalid(format!(
                    "rule {index} triggers on missing step {}",
                    rule.trigger_step
                )));
            };
            if point.choice(&rule.trigger_choice).is_none() {
                return Err(invalid(format!(
                    "rule {index} triggers on unknown choice '{}' at step {}",
                    rule.trigger_choice, rule.trigger_step
                )));
            }
        }

        Ok(())
    }
}
