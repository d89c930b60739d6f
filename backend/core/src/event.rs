use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{FailedStage, Phase};

/// Progress events emitted by the orchestrator as an analysis runs.
///
/// Streamed to the presentation surface one phase at a time rather than
/// buffered until the end; each completed phase stays rendered even if a
/// later one fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseEvent {
    ExtractionStarted {
        session_id: Uuid,
    },
    ExtractionCompleted {
        session_id: Uuid,
        characters: usize,
    },
    PhaseStarted {
        session_id: Uuid,
        phase: Phase,
    },
    PhaseCompleted {
        session_id: Uuid,
        phase: Phase,
        /// The agent's report, as markdown.
        content: String,
        produced_at: DateTime<Utc>,
    },
    AnalysisFailed {
        session_id: Uuid,
        stage: FailedStage,
        message: String,
    },
    AnalysisComplete {
        session_id: Uuid,
    },
}

impl PhaseEvent {
    /// Event name used on the wire (SSE event field).
    pub fn kind(&self) -> &'static str {
        match self {
            PhaseEvent::ExtractionStarted { .. } => "extraction_started",
            PhaseEvent::ExtractionCompleted { .. } => "extraction_completed",
            PhaseEvent::PhaseStarted { .. } => "phase_started",
            PhaseEvent::PhaseCompleted { .. } => "phase_completed",
            PhaseEvent::AnalysisFailed { .. } => "analysis_failed",
            PhaseEvent::AnalysisComplete { .. } => "analysis_complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = PhaseEvent::PhaseStarted {
            session_id: Uuid::new_v4(),
            phase: Phase::IngredientAnalysis,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_started");
        assert_eq!(json["phase"], "ingredient_analysis");
    }

    #[test]
    fn failure_event_names_the_stage() {
        let event = PhaseEvent::AnalysisFailed {
            session_id: Uuid::new_v4(),
            stage: FailedStage::Phase(Phase::IngredientAnalysis),
            message: "401 Unauthorized".into(),
        };
        assert_eq!(event.kind(), "analysis_failed");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["stage"]["phase"], "ingredient_analysis");
    }
}
