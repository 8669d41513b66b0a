pub mod machine;
pub mod session;

pub use machine::*;
pub use session::*;

use crate::models::ModelError;
use crate::pipeline::extraction::ExtractionError;

/// Errors raised while driving a validation workflow.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Event {event} is not allowed in the {step} step")]
    InvalidTransition {
        step: machine::WorkflowStep,
        event: &'static str,
    },

    #[error("No extracted text is available")]
    EmptyExtractedText,

    #[error("Invalid patient profile: {0}")]
    InvalidProfile(#[from] ModelError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}
