//! Glowcheck agents.
//!
//! An agent binds a role (system prompt + instruction block), a backing chat
//! model, and an optional toolset. Construction is relatively expensive and
//! happens once per profile at startup; the instances are shared read-only
//! across sessions.

pub mod agent;
pub mod profile;
pub mod prompts;
pub mod providers;

pub use agent::Agent;
pub use profile::AgentProfile;
pub use providers::{MockProvider, OpenAiProvider, ScriptedProvider, ScriptedReply};
