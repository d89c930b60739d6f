//! The three-phase analysis pipeline.
//!
//! Phases run strictly sequentially: each depends on the previous phase's
//! text. A phase failure stops the pipeline, reports the failing stage, and
//! leaves earlier results intact. Nothing is retried automatically.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use glowcheck_agent::Agent;
use glowcheck_core::{
    AnalysisSession, FailedStage, ImageInput, Phase, PhaseEvent, PhaseResult, ScanError,
    SessionStatus, TextExtractor,
};

use crate::prompt::build_prompt;
use crate::session::advance;

/// Sequences OCR plus three agent invocations for one analysis session.
///
/// Holds the two agents as immutable, dependency-injected instances with
/// process lifetime; a new `run` call reuses them, never reconstructs them.
/// The synthesis phase is issued to the same Ingredient-Analyzer instance as
/// phase 1, not a third agent.
pub struct Orchestrator {
    analyzer: Arc<Agent>,
    health: Arc<Agent>,
    extractor: Arc<dyn TextExtractor>,
}

impl Orchestrator {
    pub fn new(analyzer: Arc<Agent>, health: Arc<Agent>, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            analyzer,
            health,
            extractor,
        }
    }

    fn agent_for(&self, phase: Phase) -> &Arc<Agent> {
        match phase {
            Phase::IngredientAnalysis | Phase::Synthesis => &self.analyzer,
            Phase::HealthAssessment => &self.health,
        }
    }

    /// Run a full analysis, emitting a `PhaseEvent` after every step.
    ///
    /// If the event receiver is dropped, the pipeline short-circuits before
    /// dispatching the next phase (mid-flight remote calls are not
    /// interrupted).
    #[instrument(skip_all, fields(source = ?image.source))]
    pub async fn run(
        &self,
        image: ImageInput,
        events: mpsc::Sender<PhaseEvent>,
    ) -> AnalysisSession {
        let mut session = AnalysisSession::new(image.source);
        info!(session_id = %session.id, "starting analysis");

        advance(&mut session, SessionStatus::ExtractingText);
        if !self
            .emit(&events, PhaseEvent::ExtractionStarted { session_id: session.id })
            .await
        {
            return session;
        }

        let extracted = match self.extractor.extract(&image.bytes).await {
            Ok(text) => text,
            Err(e) => {
                self.fail(&mut session, FailedStage::Extraction, e, &events).await;
                return session;
            }
        };
        let emitted = self
            .emit(
                &events,
                PhaseEvent::ExtractionCompleted {
                    session_id: session.id,
                    characters: extracted.chars().count(),
                },
            )
            .await;
        if !emitted {
            return session;
        }
        session.extracted_text = Some(extracted.clone());

        for phase in Phase::ALL {
            advance(&mut session, SessionStatus::Running(phase));
            if !self
                .emit(&events, PhaseEvent::PhaseStarted { session_id: session.id, phase })
                .await
            {
                return session;
            }

            let prompt = build_prompt(phase, &extracted, &session.phase_results);
            let result = match self.agent_for(phase).run(&prompt).await {
                Ok(content) => PhaseResult::new(phase, content),
                Err(e) => {
                    self.fail(&mut session, FailedStage::Phase(phase), e, &events).await;
                    return session;
                }
            };

            let event = PhaseEvent::PhaseCompleted {
                session_id: session.id,
                phase,
                content: result.content.clone(),
                produced_at: result.produced_at,
            };
            session.phase_results.push(result);
            advance(&mut session, SessionStatus::PhaseDone(phase));
            if !self.emit(&events, event).await {
                return session;
            }
        }

        advance(&mut session, SessionStatus::Complete);
        info!(session_id = %session.id, "analysis complete");
        let _ = events
            .send(PhaseEvent::AnalysisComplete { session_id: session.id })
            .await;
        session
    }

    async fn fail(
        &self,
        session: &mut AnalysisSession,
        stage: FailedStage,
        err: ScanError,
        events: &mpsc::Sender<PhaseEvent>,
    ) {
        error!(session_id = %session.id, %stage, error = %err, "analysis failed");
        advance(session, SessionStatus::Failed(stage));
        let _ = events
            .send(PhaseEvent::AnalysisFailed {
                session_id: session.id,
                stage,
                message: err.to_string(),
            })
            .await;
    }

    /// Send an event; returns false when the receiver is gone, which acts as
    /// the pipeline's cancellation point.
    async fn emit(&self, events: &mpsc::Sender<PhaseEvent>, event: PhaseEvent) -> bool {
        events.send(event).await.is_ok()
    }
}
