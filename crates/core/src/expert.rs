//! Bullet outline for the expert pitch deck.
//!
//! Expert submissions arrive as a structured questionnaire rather than free
//! text, so bullets are templated from individual answers instead of being
//! segmented.

use crate::types::{StructuredDeck, StructuredSlide};
use serde::{Deserialize, Serialize};

/// Questionnaire answers for an expert pitch deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpertProjectData {
    /// What is the project called?
    pub project_name: Option<String>,
    /// What problem does the project address?
    pub problem_description: Option<String>,
    /// Who experiences the problem?
    pub target_users: Option<String>,
    /// What is wrong with current solutions?
    pub current_limitations: Option<String>,
    /// What is the proposed solution?
    pub proposed_solution: Option<String>,
    /// What are its key features?
    pub key_features: Option<String>,
    /// Which market is it aimed at?
    pub target_market: Option<String>,
    /// What technology is it built with?
    pub tech_stack: Option<String>,
    /// What impact is expected?
    pub expected_impact: Option<String>,
    /// How will success be measured?
    pub validation_metrics: Option<String>,
}

/// Return the answer, or `default` when it is missing or blank.
fn answer<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => default,
    }
}

fn slide(title: &str, bullets: Vec<String>) -> StructuredSlide {
    StructuredSlide::new(title, bullets)
}

/// Build the bullet slides of an expert pitch deck.
///
/// Diagram slides (impact graph, market circles, timeline) carry no text
/// content and are left to the renderer.
pub fn synthesize_expert(data: &ExpertProjectData) -> StructuredDeck {
    let mut deck = StructuredDeck::new();

    deck.insert(
        "title",
        slide(
            "Title",
            vec![answer(&data.project_name, "Project Synthesis").to_string()],
        ),
    );

    deck.insert(
        "problem_statement",
        slide(
            "Problem Statement",
            vec![
                format!(
                    "Critical Challenge: {}",
                    answer(&data.problem_description, "N/A")
                ),
                format!(
                    "Target User Group: {}",
                    answer(&data.target_users, "General Public")
                ),
                format!(
                    "Limitations: {}",
                    answer(&data.current_limitations, "Inefficient manual processes")
                ),
            ],
        ),
    );

    deck.insert(
        "solution_overview",
        slide(
            "Solution Overview",
            vec![
                format!("Core Innovation: {}", answer(&data.proposed_solution, "N/A")),
                "Methodology: High-precision architectural mapping".to_string(),
                format!(
                    "Key Capabilities: {}",
                    answer(&data.key_features, "Scalability, Efficiency, Accuracy")
                ),
            ],
        ),
    );

    deck.insert(
        "market_opportunity",
        slide(
            "Market Opportunity",
            vec![
                format!(
                    "Primary Vertical: {}",
                    answer(&data.target_market, "Emerging Markets")
                ),
                "Growth Trajectory: Logarithmic expansion projected".to_string(),
                "Economic Reach: Unified global synchronization".to_string(),
            ],
        ),
    );

    deck.insert(
        "technology_stack",
        slide(
            "Technology Stack",
            vec![
                format!("Component Hierarchy: {}", answer(&data.tech_stack, "N/A")),
                "Infrastructure: Cloud-native cluster nodes".to_string(),
                "Security: Institutional-grade encryption".to_string(),
            ],
        ),
    );

    deck.insert(
        "conclusion_impact",
        slide(
            "Conclusion & Impact",
            vec![
                format!(
                    "Expected Milestone: {}",
                    answer(&data.expected_impact, "Operational Excellence")
                ),
                format!(
                    "Validation: {}",
                    answer(&data.validation_metrics, "Continuous improvement cycle")
                ),
                "Status: Synthesis Complete".to_string(),
            ],
        ),
    );

    log::debug!("Synthesized expert outline with {} slides", deck.len());
    deck
}
