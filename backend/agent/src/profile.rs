use serde::{Deserialize, Serialize};

use crate::prompts;

/// Immutable description of an agent role: name, system prompt, instruction
/// block, whether it gets the search toolset, and whether it formats output
/// as markdown.
///
/// Two profiles exist, built once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    pub system_prompt: String,
    pub instructions: String,
    pub search_enabled: bool,
    pub markdown: bool,
}

impl AgentProfile {
    pub fn ingredient_analyzer() -> Self {
        Self {
            name: "Ingredient Analyzer".into(),
            system_prompt: prompts::SYSTEM_PROMPT.into(),
            instructions: prompts::ANALYZER_INSTRUCTIONS.into(),
            search_enabled: true,
            markdown: true,
        }
    }

    pub fn health_assessor() -> Self {
        Self {
            name: "Health Assessor".into(),
            system_prompt: prompts::SYSTEM_PROMPT.into(),
            instructions: prompts::HEALTH_INSTRUCTIONS.into(),
            search_enabled: true,
            markdown: true,
        }
    }

    /// The full system message sent to the provider.
    pub fn system_message(&self) -> String {
        let mut msg = format!("{}\n\n{}", self.system_prompt, self.instructions);
        if self.markdown {
            msg.push_str("\n\n");
            msg.push_str(prompts::MARKDOWN_DIRECTIVE);
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_share_the_system_prompt() {
        let a = AgentProfile::ingredient_analyzer();
        let h = AgentProfile::health_assessor();
        assert_eq!(a.system_prompt, h.system_prompt);
        assert_ne!(a.instructions, h.instructions);
    }

    #[test]
    fn system_message_includes_instructions_and_markdown_directive() {
        let profile = AgentProfile::health_assessor();
        let msg = profile.system_message();
        assert!(msg.contains("Health impact analysis"));
        assert!(msg.contains("markdown"));
    }

    #[test]
    fn markdown_directive_is_optional() {
        let mut profile = AgentProfile::ingredient_analyzer();
        profile.markdown = false;
        assert!(!profile.system_message().contains(prompts::MARKDOWN_DIRECTIVE));
    }
}
