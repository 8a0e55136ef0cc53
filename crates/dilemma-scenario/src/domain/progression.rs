//! Linear step progression.
//!
//! The last decision point doubles as the final step: submitting step `N`
//! of an `N`-point scenario finishes it, and there is no extra wrap-up step.

use serde::Serialize;

use super::model::Scenario;

/// Where a session stands after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Whether the submitted step finished the scenario.
    pub is_final: bool,
    /// The next step to present, absent when final.
    pub next_step: Option<u32>,
}

/// Returns `true` once `submitted_step` reaches the decision point count.
#[must_use]
pub fn is_final(scenario: &Scenario, submitted_step: u32) -> bool {
    submitted_step >= scenario.step_count()
}

/// Returns `submitted_step + 1`, or `None` when the step is final.
#[must_use]
pub fn next_step(scenario: &Scenario, submitted_step: u32) -> Option<u32> {
    if is_final(scenario, submitted_step) {
        None
    } else {
        Some(submitted_step + 1)
    }
}

/// Computes both progression facts for a submitted step.
#[must_use]
pub fn progress(scenario: &Scenario, submitted_step: u32) -> Progress {
    Progress {
        is_final: is_final(scenario, submitted_step),
        next_step: next_step(scenario, submitted_step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::three_step_scenario;

    #[test]
    fn test_is_final_only_at_last_step() {
        let scenario = three_step_scenario();

        assert!(!is_final(&scenario, 1));
        assert!(!is_final(&scenario, 2));
        assert!(is_final(&scenario, 3));
    }

    #[test]
    fn test_is_final_past_last_step() {
        assert!(is_final(&three_step_scenario(), 7));
    }

    #[test]
    fn test_next_step_increments_until_final() {
        let scenario = three_step_scenario();

        assert_eq!(next_step(&scenario, 1), Some(2));
        assert_eq!(next_step(&scenario, 2), Some(3));
        assert_eq!(next_step(&scenario, 3), None);
    }

    #[test]
    fn test_progress_combines_both_facts() {
        let scenario = three_step_scenario();

        assert_eq!(
            progress(&scenario, 2),
            Progress {
                is_final: false,
                next_step: Some(3),
            }
        );
        assert_eq!(
            progress(&scenario, 3),
            Progress {
                is_final: true,
                next_step: None,
            }
        );
    }
}
