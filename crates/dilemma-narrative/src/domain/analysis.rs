//! Ethical framework analysis and its parser.
//!
//! The generated text is expected to contain one section per framework,
//! each introduced by the framework's name (usually in bold). Sections are
//! located by name rather than by position, so the provider may reorder
//! them or add preamble text.

use serde::Serialize;

/// The four frameworks, in the order they are requested.
pub const FRAMEWORKS: [&str; 4] = ["Utilitarian", "Deontological", "Virtue Ethics", "Care Ethics"];

/// Placeholder for a framework missing from the generated text.
pub const ANALYSIS_UNAVAILABLE: &str = "Analysis unavailable";

/// A decision viewed through four ethical frameworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameworkAnalysis {
    /// Consequences and overall welfare.
    pub utilitarian: String,
    /// Duties, rules and principles.
    pub deontological: String,
    /// Character and moral virtues.
    pub virtue_ethics: String,
    /// Relationships and empathy.
    pub care_ethics: String,
    /// Full generated text, kept for diagnostics only.
    #[serde(skip_serializing)]
    pub raw_response: String,
}

impl FrameworkAnalysis {
    /// Parses generated text into per-framework sections.
    #[must_use]
    pub fn parse(response: &str) -> Self {
        let section = |name| {
            extract_section(response, name).unwrap_or_else(|| ANALYSIS_UNAVAILABLE.to_owned())
        };
        Self {
            utilitarian: section(FRAMEWORKS[0]),
            deontological: section(FRAMEWORKS[1]),
            virtue_ethics: section(FRAMEWORKS[2]),
            care_ethics: section(FRAMEWORKS[3]),
            raw_response: response.to_owned(),
        }
    }
}

/// Text from the first mention of `framework` up to the next mention of
/// any other framework, cleaned of markup and cut to its first paragraph.
fn extract_section(response: &str, framework: &str) -> Option<String> {
    let start = response.find(framework)?;
    let search_from = start + framework.len();
    let end = FRAMEWORKS
        .iter()
        .filter(|other| **other != framework)
        .filter_map(|other| response[search_from..].find(other).map(|pos| search_from + pos))
        .min()
        .unwrap_or(response.len());

    let cleaned = response[start..end]
        .replace(framework, "")
        .replace("**", "");
    let cleaned = cleaned.trim().trim_start_matches(':').trim();
    let first_paragraph = cleaned.split("\n\n").next().unwrap_or_default();
    Some(first_paragraph.to_owned())
}
