//! Deterministic providers for tests and offline runs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use glowcheck_core::{ChatProvider, ChatRequest, ChatResponse, ToolCallRequest};

/// A provider that returns one canned response for every request.
pub struct MockProvider {
    fixed_response: String,
}

impl MockProvider {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            fixed_response: response.into(),
        }
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse> {
        Ok(ChatResponse::text(self.fixed_response.clone()))
    }
}

/// One step of a scripted conversation.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Text(String),
    ToolCall(ToolCallRequest),
    Error(String),
}

impl ScriptedReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn tool_call(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self::ToolCall(ToolCallRequest {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        })
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

/// A provider that replays a fixed script of replies, recording every
/// request it receives. This is the stub the pipeline properties are tested
/// against: prompt containment, call counts, and fault injection.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Total number of `chat` calls served.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The user-prompt content of request `index`.
    pub fn prompt_of(&self, index: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[index]
            .messages
            .iter()
            .rev()
            .find(|m| m.role == glowcheck_core::Role::User)
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(ScriptedReply::Text(content)) => Ok(ChatResponse::text(content)),
            Some(ScriptedReply::ToolCall(call)) => Ok(ChatResponse {
                content: None,
                tool_calls: vec![call],
            }),
            Some(ScriptedReply::Error(message)) => bail!(message),
            None => bail!("scripted provider exhausted its replies"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowcheck_core::ChatMessage;

    #[tokio::test]
    async fn scripted_provider_replays_in_order() {
        let provider = ScriptedProvider::new(vec![
            ScriptedReply::text("first"),
            ScriptedReply::text("second"),
        ]);
        let request = ChatRequest::new("gpt-4o", vec![ChatMessage::user("hi")]);
        assert_eq!(provider.chat(&request).await.unwrap().content.unwrap(), "first");
        assert_eq!(provider.chat(&request).await.unwrap().content.unwrap(), "second");
        assert!(provider.chat(&request).await.is_err());
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn prompt_of_skips_tool_messages() {
        let provider = ScriptedProvider::new(vec![ScriptedReply::text("ok")]);
        let request = ChatRequest::new(
            "gpt-4o",
            vec![
                ChatMessage::system("sys"),
                ChatMessage::user("the actual prompt"),
                ChatMessage::tool_result("call_1", "tool output"),
            ],
        );
        provider.chat(&request).await.unwrap();
        assert_eq!(provider.prompt_of(0), "the actual prompt");
    }
}
