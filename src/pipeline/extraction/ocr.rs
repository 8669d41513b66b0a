//! Prescription OCR — transcribes an uploaded file via the generative model.
//!
//! The file is boundary-checked, base64-encoded, and submitted inline with a
//! fixed transcription instruction. One model call per invocation; the caller
//! resubmits on failure, so no partial text is ever kept.

use std::sync::Arc;

use base64::Engine as _;

use super::types::UploadedFile;
use super::ExtractionError;
use crate::gemini::{GenerationConfig, GenerativeClient};

/// Fixed transcription instruction sent with every upload.
const TRANSCRIPTION_PROMPT: &str = "Extract and transcribe all text from this \
medical prescription image. Focus on medication names, dosages, frequencies, \
and instructions. Format the output clearly and include all visible medical \
information.";

/// OCR adapter backed by the generative model's vision input.
pub struct PrescriptionOcr {
    client: Arc<dyn GenerativeClient>,
}

impl PrescriptionOcr {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self { client }
    }

    /// Extract the prescription text from an uploaded file.
    pub fn extract_text(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        file.validate()?;

        let _span = tracing::info_span!(
            "prescription_ocr",
            file_name = %file.file_name,
            mime_type = %file.mime_type,
            file_size = file.bytes.len(),
        )
        .entered();
        let start = std::time::Instant::now();

        let base64_data = base64::engine::general_purpose::STANDARD.encode(&file.bytes);

        let text = self
            .client
            .generate_with_file(
                TRANSCRIPTION_PROMPT,
                &file.mime_type,
                &base64_data,
                &GenerationConfig::extraction(),
            )
            .map_err(|e| ExtractionError::OcrProcessing(format!("Transcription failed: {e}")))?;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoTextExtracted);
        }

        tracing::info!(
            elapsed_ms = %start.elapsed().as_millis(),
            text_len = text.len(),
            "Prescription transcription complete"
        );

        Ok(text)
    }
}
