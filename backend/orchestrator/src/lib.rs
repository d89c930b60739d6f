//! The Glowcheck orchestrator.
//!
//! Sequences text extraction and three agent invocations, threading each
//! phase's output into the next phase's prompt and streaming results to the
//! caller as they complete.

pub mod pipeline;
pub mod prompt;
pub mod session;

pub use pipeline::Orchestrator;
pub use prompt::build_prompt;
