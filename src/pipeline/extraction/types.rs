use std::path::Path;

use super::ExtractionError;

/// Maximum accepted upload size in bytes.
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Mime types accepted for prescription uploads.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/bmp",
    "application/pdf",
];

/// An uploaded prescription file held in memory.
///
/// The bytes are forwarded to the model as an opaque inline payload; no
/// local rasterization or PDF parsing happens on this side.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: &str, mime_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its mime type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Boundary checks applied before anything is encoded or sent.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.bytes.is_empty() {
            return Err(ExtractionError::EmptyFile(self.file_name.clone()));
        }
        if self.bytes.len() > MAX_FILE_SIZE_BYTES {
            return Err(ExtractionError::FileTooLarge {
                file_name: self.file_name.clone(),
                size: self.bytes.len(),
            });
        }
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(ExtractionError::UnsupportedFileType(self.mime_type.clone()));
        }
        Ok(())
    }
}
