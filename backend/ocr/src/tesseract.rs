//! Tesseract CLI backend for the text extractor.
//!
//! Shells out to a locally installed `tesseract` binary rather than binding
//! libtesseract, so the runtime has no native-library build requirement.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use glowcheck_core::{ScanError, TextExtractor};

pub struct TesseractExtractor {
    command: String,
    language: String,
}

impl TesseractExtractor {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }
}

impl Default for TesseractExtractor {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    async fn extract(&self, image: &[u8]) -> Result<String, ScanError> {
        // Tesseract reads from a file path; stage the bytes in a temp file
        // that lives until the process exits.
        let tmp = tempfile::NamedTempFile::new()
            .map_err(|e| ScanError::Extraction(format!("temp file: {e}")))?;
        std::fs::write(tmp.path(), image)
            .map_err(|e| ScanError::Extraction(format!("temp file write: {e}")))?;

        debug!(command = %self.command, lang = %self.language, "running OCR");

        let output = Command::new(&self.command)
            .arg(tmp.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .await
            .map_err(|e| {
                ScanError::Extraction(format!(
                    "failed to run `{}`: {e}; is tesseract installed?",
                    self.command
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScanError::Extraction(format!(
                "`{}` exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout)
            .trim_end()
            .to_string();
        info!(characters = text.len(), "OCR extraction finished");
        Ok(text)
    }
}
