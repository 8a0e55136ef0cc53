//! Consequence narration through the generation gateway.

use dilemma_core::generation::{GenerationError, GenerationGateway};
use dilemma_scenario::domain::model::ConsequenceRule;
use dilemma_session::domain::session::RecordedChoice;
use tracing::debug;

use crate::domain::prompt::consequence_request;

/// Asks the gateway to narrate a triggered rule. The result is trimmed.
///
/// # Errors
///
/// Propagates the gateway's `GenerationError`.
pub async fn generate_consequence(
    gateway: &dyn GenerationGateway,
    rule: &ConsequenceRule,
    history: &[RecordedChoice],
    scenario_context: &str,
) -> Result<String, GenerationError> {
    let request = consequence_request(rule, history, scenario_context);
    let text = gateway.generate(&request).await?;
    debug!(
        trigger_step = rule.trigger_step,
        appears_at_step = rule.appears_at_step,
        "consequence generated"
    );
    Ok(text.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use dilemma_test_support::{FailingGateway, ScriptedGateway, rule};

    use super::*;

    #[tokio::test]
    async fn test_generate_consequence_trims_gateway_text() {
        // Arrange
        let gateway = ScriptedGateway::always("\n  Tom found a new job.  \n");

        // Act
        let text = generate_consequence(&gateway, &rule("A", 1, 3), &[], "context")
            .await
            .unwrap();

        // Assert
        assert_eq!(text, "Tom found a new job.");
        assert_eq!(gateway.call_count(), 1);
        assert!(gateway.requests()[0].prompt.contains("No previous decisions."));
    }

    #[tokio::test]
    async fn test_generate_consequence_propagates_gateway_error() {
        let result = generate_consequence(&FailingGateway, &rule("A", 1, 3), &[], "context").await;

        assert!(matches!(
            result,
            Err(GenerationError::Provider { status: 503, .. })
        ));
    }
}
