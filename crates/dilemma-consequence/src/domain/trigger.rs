//! Consequence trigger evaluation.
//!
//! Rules are evaluated in their defined order and the first rule whose
//! conditions hold wins. At most one consequence surfaces per step even
//! when several rules qualify; later rules act as lower-priority
//! alternatives, not as additional events.

use dilemma_scenario::domain::model::ConsequenceRule;
use dilemma_session::domain::session::RecordedChoice;

/// Whether `history` contains the choice that arms `rule`.
#[must_use]
pub fn is_armed(rule: &ConsequenceRule, history: &[RecordedChoice]) -> bool {
    history
        .iter()
        .any(|entry| entry.step == rule.trigger_step && entry.choice_id == rule.trigger_choice)
}

/// Returns the first rule in `rules` that surfaces at `current_step` and
/// whose trigger choice appears in `history`.
///
/// `None` is a normal outcome, not an error.
#[must_use]
pub fn check_trigger<'a>(
    rules: &'a [ConsequenceRule],
    history: &[RecordedChoice],
    current_step: u32,
) -> Option<&'a ConsequenceRule> {
    rules
        .iter()
        .filter(|rule| rule.appears_at_step == current_step)
        .find(|rule| is_armed(rule, history))
}

/// Formats history as one `Step N: <choice text>` line per entry.
#[must_use]
pub fn format_history(history: &[RecordedChoice]) -> String {
    if history.is_empty() {
        return "No previous decisions.".to_owned();
    }
    history
        .iter()
        .map(|entry| format!("Step {}: {}", entry.step, entry.choice_text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use dilemma_test_support::rule;

    use super::*;

    fn chose(step: u32, choice_id: &str) -> RecordedChoice {
        RecordedChoice {
            step,
            choice_id: choice_id.to_owned(),
            choice_text: format!("picked {choice_id} at {step}"),
        }
    }

    #[test]
    fn test_check_trigger_returns_first_rule_when_only_first_is_armed() {
        // Arrange
        let rules = vec![rule("A", 1, 3), rule("B", 1, 3)];
        let history = vec![chose(1, "A"), chose(2, "B")];

        // Act
        let fired = check_trigger(&rules, &history, 3);

        // Assert
        assert_eq!(fired, Some(&rules[0]));
    }

    #[test]
    fn test_check_trigger_first_match_wins_when_several_rules_qualify() {
        // Arrange
        let mut second = rule("A", 2, 3);
        second.consequence_template = "second".to_owned();
        let rules = vec![rule("A", 1, 3), second];
        let history = vec![chose(1, "A"), chose(2, "A")];

        // Act
        let fired = check_trigger(&rules, &history, 3);

        // Assert
        let fired = fired.expect("one rule should fire");
        assert!(std::ptr::eq(fired, &rules[0]));
        assert_ne!(fired.consequence_template, "second");
    }

    #[test]
    fn test_check_trigger_skips_rules_for_other_steps() {
        let rules = vec![rule("A", 1, 3)];
        let history = vec![chose(1, "A"), chose(2, "B")];

        assert_eq!(check_trigger(&rules, &history, 2), None);
    }

    #[test]
    fn test_check_trigger_requires_choice_at_trigger_step() {
        let rules = vec![rule("A", 1, 3)];
        // "A" was chosen, but at step 2, not step 1.
        let history = vec![chose(1, "B"), chose(2, "A")];

        assert_eq!(check_trigger(&rules, &history, 3), None);
    }

    #[test]
    fn test_check_trigger_with_no_rules_or_history() {
        assert_eq!(check_trigger(&[], &[chose(1, "A")], 1), None);
        assert_eq!(check_trigger(&[rule("A", 1, 3)], &[], 3), None);
    }

    #[test]
    fn test_later_rule_fires_when_earlier_rule_is_not_armed() {
        let rules = vec![rule("A", 1, 3), rule("B", 2, 3)];
        let history = vec![chose(1, "B"), chose(2, "B")];

        assert_eq!(check_trigger(&rules, &history, 3), Some(&rules[1]));
    }

    #[test]
    fn test_format_history_lists_steps_in_order() {
        let history = vec![chose(1, "A"), chose(2, "B")];

        assert_eq!(
            format_history(&history),
            "Step 1: picked A at 1\nStep 2: picked B at 2"
        );
    }

    #[test]
    fn test_format_history_empty() {
        assert_eq!(format_history(&[]), "No previous decisions.");
    }
}
