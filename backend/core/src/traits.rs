use anyhow::Result;
use async_trait::async_trait;

use crate::chat::{ChatRequest, ChatResponse};
use crate::error::ScanError;

/// Trait for hosted chat-completion providers.
///
/// One `chat` call is a single outbound round trip; the tool-call loop lives
/// in the agent, not here.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Send one completion request and return the model's answer.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// A capability the model may invoke autonomously mid-request.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool (e.g., "web_search").
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters(&self) -> serde_json::Value;

    /// Execute the tool with the model-supplied arguments.
    async fn execute(&self, args: serde_json::Value) -> Result<String>;
}

/// Converts an input image into raw text via an OCR engine.
///
/// Empty output is a valid (if low-quality) transcription, not an error; OCR
/// does not reliably self-report confidence. `ScanError::Extraction` means
/// the engine itself failed.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, image: &[u8]) -> Result<String, ScanError>;
}
