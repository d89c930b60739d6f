//! The agent wrapper: one profile, one provider, an optional toolset, and a
//! bounded tool-call loop around a single `run` operation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use glowcheck_core::{
    ChatMessage, ChatProvider, ChatRequest, ScanError, Tool, ToolCallRequest, ToolRegistry,
};

use crate::profile::AgentProfile;

/// Max provider round trips per `run`, so a model stuck requesting tools
/// cannot loop forever against a billed API.
const MAX_STEPS: usize = 8;

/// A stateless-between-calls wrapper binding a role, a backing model, and an
/// optional toolset. Construct once per profile and share via `Arc`; every
/// `run` call is independent, so instances are safe for concurrent reuse
/// across sessions.
pub struct Agent {
    profile: AgentProfile,
    model: String,
    provider: Arc<dyn ChatProvider>,
    tools: ToolRegistry,
}

impl Agent {
    pub fn new(
        profile: AgentProfile,
        model: impl Into<String>,
        provider: Arc<dyn ChatProvider>,
        tools: Vec<Arc<dyn Tool>>,
    ) -> Self {
        let mut registry = ToolRegistry::new();
        if profile.search_enabled {
            for tool in tools {
                registry.register(tool);
            }
        }
        Self {
            profile,
            model: model.into(),
            provider,
            tools: registry,
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Send the profile's system message plus the caller-supplied prompt to
    /// the model, letting it invoke tools zero or more times before the
    /// final answer.
    ///
    /// Failures are surfaced as `ModelInvocationError`; there is no
    /// automatic retry.
    pub async fn run(&self, prompt: &str) -> Result<String, ScanError> {
        let mut messages = vec![
            ChatMessage::system(self.profile.system_message()),
            ChatMessage::user(prompt),
        ];

        for step in 0..MAX_STEPS {
            let request =
                ChatRequest::new(self.model.clone(), messages.clone()).with_tools(self.tools.specs());

            debug!(agent = %self.profile.name, step, "calling chat provider");
            let response = self.provider.chat(&request).await.map_err(|e| {
                ScanError::model(self.provider.name(), e.to_string())
            })?;

            if !response.tool_calls.is_empty() {
                info!(
                    agent = %self.profile.name,
                    calls = response.tool_calls.len(),
                    "model requested tool invocations"
                );
                messages.push(ChatMessage::tool_calls(response.tool_calls.clone()));
                for call in &response.tool_calls {
                    messages.push(self.dispatch(call).await);
                }
                continue;
            }

            let content = response.content.unwrap_or_default();
            info!(agent = %self.profile.name, characters = content.len(), "agent run finished");
            return Ok(content);
        }

        Err(ScanError::model(
            self.provider.name(),
            format!("tool-call loop exceeded {MAX_STEPS} steps without a final answer"),
        ))
    }

    /// Execute one tool call. A tool failure is reported back to the model
    /// as the call's result rather than aborting the run.
    async fn dispatch(&self, call: &ToolCallRequest) -> ChatMessage {
        let Some(tool) = self.tools.get(&call.name) else {
            warn!(tool = %call.name, "model requested an unknown tool");
            return ChatMessage::tool_result(
                call.id.clone(),
                format!("error: unknown tool \"{}\"", call.name),
            );
        };

        let args: serde_json::Value =
            serde_json::from_str(&call.arguments).unwrap_or(serde_json::Value::Null);

        match tool.execute(args).await {
            Ok(output) => ChatMessage::tool_result(call.id.clone(), output),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "tool execution failed");
                ChatMessage::tool_result(call.id.clone(), format!("error: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{ScriptedProvider, ScriptedReply};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingTool {
        invocations: AtomicUsize,
    }

    #[async_trait]
    impl Tool for RecordingTool {
        fn name(&self) -> &str {
            "web_search"
        }
        fn description(&self) -> &str {
            "search"
        }
        fn parameters(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }
        async fn execute(&self, _args: serde_json::Value) -> Result<String> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            Ok("paraben safety study: no acute risk at cosmetic doses".into())
        }
    }

    fn analyzer(provider: Arc<dyn ChatProvider>, tools: Vec<Arc<dyn Tool>>) -> Agent {
        Agent::new(AgentProfile::ingredient_analyzer(), "gpt-4o", provider, tools)
    }

    #[tokio::test]
    async fn run_returns_the_model_content() {
        let provider = Arc::new(ScriptedProvider::new(vec![ScriptedReply::text("R1")]));
        let agent = analyzer(provider, vec![]);
        assert_eq!(agent.run("Analyze this").await.unwrap(), "R1");
    }

    #[tokio::test]
    async fn run_sends_system_message_and_prompt() {
        let provider = Arc::new(ScriptedProvider::new(vec![ScriptedReply::text("ok")]));
        let agent = analyzer(provider.clone(), vec![]);
        agent.run("Analyze the following ingredients: Aqua").await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        let messages = &requests[0].messages;
        assert!(messages[0].content.contains("Ingredient analysis"));
        assert_eq!(messages[1].content, "Analyze the following ingredients: Aqua");
    }

    #[tokio::test]
    async fn tool_calls_are_executed_and_fed_back() {
        let tool = Arc::new(RecordingTool {
            invocations: AtomicUsize::new(0),
        });
        let provider = Arc::new(ScriptedProvider::new(vec![
            ScriptedReply::tool_call("call_1", "web_search", r#"{"query":"parabens"}"#),
            ScriptedReply::text("final report"),
        ]));
        let agent = analyzer(provider.clone(), vec![tool.clone()]);

        let content = agent.run("Analyze").await.unwrap();
        assert_eq!(content, "final report");
        assert_eq!(tool.invocations.load(Ordering::SeqCst), 1);

        // Second request must carry the tool result back to the model.
        let requests = provider.requests();
        let second = &requests[1].messages;
        let tool_msg = second.iter().find(|m| m.tool_call_id.is_some()).unwrap();
        assert!(tool_msg.content.contains("paraben safety study"));
    }

    #[tokio::test]
    async fn provider_failure_maps_to_model_invocation_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![ScriptedReply::error(
            "401 Unauthorized",
        )]));
        let agent = analyzer(provider, vec![]);
        let err = agent.run("Analyze").await.unwrap_err();
        match err {
            ScanError::ModelInvocation { message, .. } => {
                assert!(message.contains("401 Unauthorized"))
            }
            other => panic!("expected model invocation error, got {other}"),
        }
    }

    #[tokio::test]
    async fn unknown_tool_is_reported_to_the_model_not_fatal() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ScriptedReply::tool_call("call_1", "no_such_tool", "{}"),
            ScriptedReply::text("recovered"),
        ]));
        let agent = analyzer(provider.clone(), vec![]);
        assert_eq!(agent.run("Analyze").await.unwrap(), "recovered");

        let requests = provider.requests();
        let tool_msg = requests[1]
            .messages
            .iter()
            .find(|m| m.tool_call_id.is_some())
            .unwrap();
        assert!(tool_msg.content.contains("unknown tool"));
    }

    #[tokio::test]
    async fn endless_tool_loop_is_bounded() {
        let replies: Vec<ScriptedReply> = (0..20)
            .map(|i| ScriptedReply::tool_call(format!("call_{i}"), "no_such_tool", "{}"))
            .collect();
        let provider = Arc::new(ScriptedProvider::new(replies));
        let agent = analyzer(provider, vec![]);
        let err = agent.run("Analyze").await.unwrap_err();
        assert!(err.to_string().contains("loop exceeded"));
    }
}
