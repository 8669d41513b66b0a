pub mod types;
pub mod ocr;

pub use types::*;
pub use ocr::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File {file_name} exceeds the 10 MiB upload limit ({size} bytes)")]
    FileTooLarge { file_name: String, size: usize },

    #[error("File {0} is empty")]
    EmptyFile(String),

    #[error("No text could be extracted from the prescription")]
    NoTextExtracted,

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),
}
