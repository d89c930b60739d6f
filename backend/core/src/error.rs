use thiserror::Error;

/// Top-level error type for the Glowcheck pipeline.
///
/// Errors are reported at the granularity of the step that produced them and
/// are never retried automatically: a transient model failure must not
/// silently re-issue a billed request.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The uploaded/captured image could not be parsed. Surfaced at upload
    /// time, before any analysis is triggered.
    #[error("image decode failed: {0}")]
    Decode(String),

    /// The OCR engine itself failed. An empty or garbled transcription is a
    /// valid result, not this error.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// A remote model or tool call failed (network, auth, rate limit,
    /// provider-side error).
    #[error("model invocation failed ({provider}): {message}")]
    ModelInvocation { provider: String, message: String },

    /// Missing or invalid configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanError {
    pub fn model(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ModelInvocation {
            provider: provider.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_error_names_provider() {
        let err = ScanError::model("openai", "401 Unauthorized");
        let msg = err.to_string();
        assert!(msg.contains("openai"));
        assert!(msg.contains("401 Unauthorized"));
    }

    #[test]
    fn config_error_is_descriptive() {
        let err = ScanError::Config("OPENAI_API_KEY is not set".into());
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
