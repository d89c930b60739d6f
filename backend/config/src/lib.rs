//! Runtime configuration, loaded from process environment at startup.
//!
//! The one required value is the model-provider API key; its absence fails
//! fast with a clear diagnostic instead of failing deep inside a phase.

use serde::Serialize;

use glowcheck_core::ScanError;

/// Glowcheck runtime configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Chat model id sent to the provider
    pub model: String,
    /// Base URL of the chat-completion API
    pub openai_base_url: String,
    /// Model-provider API key (required)
    #[serde(skip_serializing)]
    pub openai_api_key: String,
    /// OCR engine command name
    pub tesseract_command: String,
    /// OCR language code
    pub tesseract_language: String,
    /// Log level
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ScanError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary lookup (useful for testing).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ScanError> {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ScanError::Config(
                    "OPENAI_API_KEY is not set; export it before starting glowcheck".into(),
                )
            })?;

        Ok(Self {
            bind_address: lookup("GLOWCHECK_BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("GLOWCHECK_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            model: lookup("GLOWCHECK_MODEL").unwrap_or_else(|| "gpt-4o".to_string()),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            openai_api_key,
            tesseract_command: lookup("GLOWCHECK_TESSERACT")
                .unwrap_or_else(|| "tesseract".to_string()),
            tesseract_language: lookup("GLOWCHECK_OCR_LANG").unwrap_or_else(|| "eng".to_string()),
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_api_key_fails_fast() {
        let vars = env(&[]);
        let result = AppConfig::from_lookup(|name| vars.get(name).cloned());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn empty_api_key_is_treated_as_missing() {
        let vars = env(&[("OPENAI_API_KEY", "")]);
        assert!(AppConfig::from_lookup(|name| vars.get(name).cloned()).is_err());
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let vars = env(&[("OPENAI_API_KEY", "sk-test")]);
        let config = AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.tesseract_command, "tesseract");
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn overrides_win_over_defaults() {
        let vars = env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("GLOWCHECK_PORT", "9000"),
            ("GLOWCHECK_MODEL", "gpt-4o-mini"),
        ]);
        let config = AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn unparsable_port_falls_back_to_default() {
        let vars = env(&[("OPENAI_API_KEY", "sk-test"), ("GLOWCHECK_PORT", "not-a-port")]);
        let config = AppConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(config.port, 8080);
    }
}
