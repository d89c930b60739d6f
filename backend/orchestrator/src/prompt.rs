//! Prompt construction for each pipeline phase.
//!
//! Inter-phase data passing is deliberately free text: the entire output of
//! earlier phases is templated into the next phase's prompt, and the
//! downstream agent re-reads it as prose. Keeping this in one pure function
//! makes it testable and swappable for a typed interchange later.

use glowcheck_core::{Phase, PhaseResult};

/// Build the user prompt for a phase from the extracted text and the results
/// of earlier phases.
pub fn build_prompt(phase: Phase, extracted_text: &str, prior: &[PhaseResult]) -> String {
    let result_of = |p: Phase| {
        prior
            .iter()
            .find(|r| r.phase == p)
            .map(|r| r.content.as_str())
            .unwrap_or_default()
    };

    match phase {
        Phase::IngredientAnalysis => {
            format!("Analyze the following ingredients: {extracted_text}")
        }
        Phase::HealthAssessment => format!(
            "The Ingredient Analyzer produced this report on the product:\n\n{}\n\n\
             The raw ingredient list extracted from the label was:\n\n{}\n\n\
             Evaluate the human health impact of this product. Provide: a full \
             health-impact narrative; research-backed claims, using the search tool to \
             validate them; a risk-benefit breakdown; a numeric health-benefit \
             percentage; and recommendations.",
            result_of(Phase::IngredientAnalysis),
            extracted_text,
        ),
        Phase::Synthesis => format!(
            "Here are the two reports produced so far.\n\n\
             Ingredient Analyzer report:\n\n{}\n\n\
             Health Assessor report:\n\n{}\n\n\
             Produce a synthesized summary of the product: restate the key findings, \
             safety considerations, and actionable recommendations; give the final \
             health-benefit percentage; and suggest alternatives if warranted.",
            result_of(Phase::IngredientAnalysis),
            result_of(Phase::HealthAssessment),
        ),
    }
}
