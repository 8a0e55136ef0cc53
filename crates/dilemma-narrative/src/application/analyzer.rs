//! Framework analysis through the generation gateway.

use dilemma_core::generation::{GenerationError, GenerationGateway};
use tracing::debug;

use crate::domain::analysis::FrameworkAnalysis;
use crate::domain::prompts::analysis_request;

/// Requests and parses an analysis of `choice`.
///
/// # Errors
///
/// Propagates the gateway's `GenerationError`. Unparseable sections are
/// not an error; they read as "Analysis unavailable".
pub async fn analyze_decision(
    gateway: &dyn GenerationGateway,
    choice: &str,
    context: &str,
    prior_choices: &[String],
) -> Result<FrameworkAnalysis, GenerationError> {
    let request = analysis_request(choice, context, prior_choices);
    let response = gateway.generate(&request).await?;
    debug!(response_len = response.len(), "framework analysis generated");
    Ok(FrameworkAnalysis::parse(&response))
}
