//! Session state transitions.
//!
//! The session object is mutated only through `advance`, which enforces the
//! phase state machine: a later phase never starts before the previous
//! phase's result exists, and `Failed` is reachable from any running state.

use tracing::{debug, warn};

use glowcheck_core::{AnalysisSession, FailedStage, Phase, SessionStatus};

/// Whether `from → to` is a legal transition of the phase state machine.
pub fn is_legal_transition(from: SessionStatus, to: SessionStatus) -> bool {
    use SessionStatus::*;
    match (from, to) {
        (Idle, ExtractingText) => true,
        (ExtractingText, Running(Phase::IngredientAnalysis)) => true,
        (Running(p), PhaseDone(q)) => p == q,
        (PhaseDone(p), Running(q)) => q.number() == p.number() + 1,
        (PhaseDone(Phase::Synthesis), Complete) => true,
        (ExtractingText, Failed(FailedStage::Extraction)) => true,
        (Running(p), Failed(FailedStage::Phase(q))) => p == q,
        _ => false,
    }
}

/// Advance the session to `next`, recording the move.
///
/// An illegal transition is a programming error in the pipeline; it is
/// rejected (the status is left unchanged) and logged loudly.
pub fn advance(session: &mut AnalysisSession, next: SessionStatus) {
    if !is_legal_transition(session.status, next) {
        debug_assert!(
            false,
            "illegal session transition {:?} -> {:?}",
            session.status, next
        );
        warn!(
            session_id = %session.id,
            from = ?session.status,
            to = ?next,
            "rejected illegal session transition"
        );
        return;
    }
    debug!(session_id = %session.id, from = ?session.status, to = ?next, "session transition");
    session.status = next;
}
