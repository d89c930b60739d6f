//! Optical character recognition for ingredient labels.
//!
//! The extractor is best-effort: no guarantee of correctness, language
//! detection, or layout preservation. Callers must treat an empty or garbled
//! transcription as a valid low-quality result, never an error.

pub mod tesseract;

pub use tesseract::TesseractExtractor;

use async_trait::async_trait;

use glowcheck_core::{ScanError, TextExtractor};

/// Extractor returning a canned transcription; used by pipeline tests and
/// the `doctor`-style dry runs.
pub struct FixedExtractor {
    text: String,
}

impl FixedExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextExtractor for FixedExtractor {
    async fn extract(&self, _image: &[u8]) -> Result<String, ScanError> {
        Ok(self.text.clone())
    }
}

/// Extractor that always fails; used to exercise the failure path.
pub struct FailingExtractor;

#[async_trait]
impl TextExtractor for FailingExtractor {
    async fn extract(&self, _image: &[u8]) -> Result<String, ScanError> {
        Err(ScanError::Extraction("injected OCR failure".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_extractor_returns_its_text() {
        let extractor = FixedExtractor::new("Aqua, Glycerin");
        assert_eq!(extractor.extract(&[]).await.unwrap(), "Aqua, Glycerin");
    }

    #[tokio::test]
    async fn empty_transcription_is_a_valid_result() {
        let extractor = FixedExtractor::new("");
        assert_eq!(extractor.extract(&[]).await.unwrap(), "");
    }

    #[tokio::test]
    async fn failing_extractor_reports_extraction_error() {
        let err = FailingExtractor.extract(&[]).await.unwrap_err();
        assert!(matches!(err, ScanError::Extraction(_)));
    }
}
