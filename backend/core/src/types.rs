use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an input image came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Upload,
    Camera,
}

impl ImageSource {
    /// Parse the `source` query parameter; anything unrecognized is treated
    /// as an upload.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "camera" => Self::Camera,
            _ => Self::Upload,
        }
    }
}

/// An input image, immutable once received.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Bytes,
    pub source: ImageSource,
}

impl ImageInput {
    pub fn new(bytes: impl Into<Bytes>, source: ImageSource) -> Self {
        Self {
            bytes: bytes.into(),
            source,
        }
    }
}

/// One sequential step of the analysis pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    IngredientAnalysis,
    HealthAssessment,
    Synthesis,
}

impl Phase {
    /// Pipeline order, starting at 1.
    pub fn number(&self) -> u8 {
        match self {
            Phase::IngredientAnalysis => 1,
            Phase::HealthAssessment => 2,
            Phase::Synthesis => 3,
        }
    }

    /// Human-readable label used in the UI and in error reports.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::IngredientAnalysis => "Ingredient Analysis",
            Phase::HealthAssessment => "Health Assessment",
            Phase::Synthesis => "Collaborative Summary",
        }
    }

    /// All phases in execution order.
    pub const ALL: [Phase; 3] = [
        Phase::IngredientAnalysis,
        Phase::HealthAssessment,
        Phase::Synthesis,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {} ({})", self.number(), self.label())
    }
}

/// The textual output of one agent invocation, tagged with the phase that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseResult {
    pub phase: Phase,
    pub content: String,
    pub produced_at: DateTime<Utc>,
}

impl PhaseResult {
    pub fn new(phase: Phase, content: impl Into<String>) -> Self {
        Self {
            phase,
            content: content.into(),
            produced_at: Utc::now(),
        }
    }
}

/// The step during which an analysis failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailedStage {
    Extraction,
    Phase(Phase),
}

impl fmt::Display for FailedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailedStage::Extraction => write!(f, "text extraction"),
            FailedStage::Phase(p) => write!(f, "{p}"),
        }
    }
}

/// Lifecycle of one analysis session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    ExtractingText,
    Running(Phase),
    PhaseDone(Phase),
    Complete,
    Failed(FailedStage),
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Complete | SessionStatus::Failed(_))
    }
}

/// The transient grouping of one extracted text and its ordered phase
/// results, for a single user-triggered analysis.
///
/// Mutated only by the orchestrator's transition function; everything else
/// reads it to render. Discarded after all phases render, never persisted.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub source: ImageSource,
    pub status: SessionStatus,
    pub extracted_text: Option<String>,
    pub phase_results: Vec<PhaseResult>,
    pub started_at: DateTime<Utc>,
}

impl AnalysisSession {
    pub fn new(source: ImageSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            status: SessionStatus::Idle,
            extracted_text: None,
            phase_results: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// Look up the result a given phase produced, if it ran.
    pub fn result_for(&self, phase: Phase) -> Option<&PhaseResult> {
        self.phase_results.iter().find(|r| r.phase == phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_order_is_stable() {
        let numbers: Vec<u8> = Phase::ALL.iter().map(|p| p.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn failed_stage_names_phase() {
        let stage = FailedStage::Phase(Phase::HealthAssessment);
        assert!(stage.to_string().contains("phase 2"));
        assert_eq!(FailedStage::Extraction.to_string(), "text extraction");
    }

    #[test]
    fn session_starts_idle_and_empty() {
        let session = AnalysisSession::new(ImageSource::Upload);
        assert_eq!(session.status, SessionStatus::Idle);
        assert!(session.phase_results.is_empty());
        assert!(session.result_for(Phase::IngredientAnalysis).is_none());
    }

    #[test]
    fn terminal_states() {
        assert!(SessionStatus::Complete.is_terminal());
        assert!(SessionStatus::Failed(FailedStage::Extraction).is_terminal());
        assert!(!SessionStatus::Running(Phase::Synthesis).is_terminal());
    }
}
