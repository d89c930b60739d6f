pub mod chat;
pub mod error;
pub mod event;
pub mod tools;
pub mod traits;
pub mod types;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, Role, ToolCallRequest, ToolSpec};
pub use error::ScanError;
pub use event::PhaseEvent;
pub use tools::ToolRegistry;
pub use traits::{ChatProvider, TextExtractor, Tool};
pub use types::{
    AnalysisSession, FailedStage, ImageInput, ImageSource, Phase, PhaseResult, SessionStatus,
};
