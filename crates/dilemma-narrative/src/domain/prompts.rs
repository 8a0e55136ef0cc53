//! Prompt for the ethical framework analysis.

use std::fmt::Write as _;

use dilemma_core::generation::GenerationRequest;

/// Lower temperature keeps analyses consistent across sessions.
pub const ANALYSIS_TEMPERATURE: f32 = 0.6;

/// Token bound for the four-framework analysis.
pub const ANALYSIS_MAX_TOKENS: u32 = 600;

const SYSTEM_PROMPT: &str = "You are an expert in applied ethics. Analyze decisions through multiple ethical frameworks.
Be concise (20-30 words per framework), objective, and non-judgmental.
Use this format for EACH framework:

**Framework Name:** [Brief analysis highlighting key considerations]

Do NOT use emojis. Be professional and educational.";

/// Builds the analysis request for `choice` made in `context`, given the
/// texts of earlier choices in the session.
#[must_use]
pub fn analysis_request(choice: &str, context: &str, prior_choices: &[String]) -> GenerationRequest {
    let mut prompt = format!("Context: {context}");
    if !prior_choices.is_empty() {
        prompt.push_str("\n\nPrevious decisions:");
        for (index, text) in prior_choices.iter().enumerate() {
            let _ = write!(prompt, "\n{}. {text}", index + 1);
        }
    }
    let _ = write!(
        prompt,
        "\n\nCurrent Decision: \"{choice}\"\n\n\
         Analyze this decision through these 4 frameworks:\n\
         1. **Utilitarian:** Focus on consequences and overall welfare\n\
         2. **Deontological:** Focus on duties, rules, and principles\n\
         3. **Virtue Ethics:** Focus on character and moral virtues demonstrated\n\
         4. **Care Ethics:** Focus on relationships, empathy, and context\n\n\
         Provide analysis for each framework."
    );

    GenerationRequest::new(prompt, ANALYSIS_TEMPERATURE, ANALYSIS_MAX_TOKENS)
        .with_system_prompt(SYSTEM_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_request_without_history() {
        let request = analysis_request("Tell Tom", "A leaked report", &[]);

        assert!(request.prompt.starts_with("Context: A leaked report\n\nCurrent Decision: \"Tell Tom\""));
        assert!(!request.prompt.contains("Previous decisions"));
        assert!((request.temperature - 0.6).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 600);
    }

    #[test]
    fn test_analysis_request_numbers_previous_decisions() {
        let prior = vec!["Tell Tom".to_owned(), "Stay quiet".to_owned()];

        let request = analysis_request("Decline", "Restructuring", &prior);

        assert!(
            request
                .prompt
                .contains("Previous decisions:\n1. Tell Tom\n2. Stay quiet")
        );
        assert!(request.prompt.contains("**Care Ethics:**"));
        assert!(request.system_prompt.as_deref().unwrap().contains("20-30 words"));
    }
}
