//! Workflow session — binds the state machine to the extraction and
//! validation engines.
//!
//! A session owns one workflow and one client handle shared by both engines.
//! Step gating happens here before any engine runs, so a model call is never
//! made from the wrong step.

use std::sync::Arc;

use uuid::Uuid;

use super::machine::{Workflow, WorkflowStep};
use super::WorkflowError;
use crate::gemini::GenerativeClient;
use crate::models::patient::PatientProfile;
use crate::pipeline::extraction::{PrescriptionOcr, UploadedFile};
use crate::pipeline::validation::{PrescriptionValidator, ValidationResult};

/// One end-to-end validation session.
pub struct WorkflowSession {
    id: Uuid,
    machine: Workflow,
    ocr: PrescriptionOcr,
    validator: PrescriptionValidator,
}

impl WorkflowSession {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            id: Uuid::new_v4(),
            machine: Workflow::new(),
            ocr: PrescriptionOcr::new(Arc::clone(&client)),
            validator: PrescriptionValidator::new(client),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> WorkflowStep {
        self.machine.step()
    }

    pub fn extracted_text(&self) -> Option<&str> {
        self.machine.extracted_text()
    }

    pub fn result(&self) -> Option<&ValidationResult> {
        self.machine.result()
    }

    /// Run OCR over an uploaded file and stage the extracted text.
    ///
    /// Upload step only. The extracted text is returned so the caller can
    /// show it for review before confirmation.
    pub fn process_upload(&mut self, file: &UploadedFile) -> Result<String, WorkflowError> {
        if self.machine.step() != WorkflowStep::Upload {
            return Err(WorkflowError::InvalidTransition {
                step: self.machine.step(),
                event: "process_upload",
            });
        }

        let _span = tracing::info_span!("workflow_upload", session_id = %self.id).entered();
        let text = self.ocr.extract_text(file)?;
        self.machine.set_extracted_text(text.clone())?;
        Ok(text)
    }

    /// Replace the staged extraction text with a user-corrected version.
    pub fn edit_extracted_text(&mut self, text: String) -> Result<(), WorkflowError> {
        self.machine.set_extracted_text(text)
    }

    /// Accept the staged text and advance to patient intake.
    pub fn confirm_extraction(&mut self) -> Result<(), WorkflowError> {
        self.machine.confirm_extraction()
    }

    /// Accept a patient profile and run validation.
    ///
    /// Advances to the results step, runs the validator against the
    /// confirmed prescription text, and records the report. Validation
    /// itself never fails; errors here are step or profile rejections.
    pub fn submit_profile(
        &mut self,
        patient: PatientProfile,
    ) -> Result<ValidationResult, WorkflowError> {
        if self.machine.step() != WorkflowStep::PatientInfo {
            return Err(WorkflowError::InvalidTransition {
                step: self.machine.step(),
                event: "submit_profile",
            });
        }

        let text = self
            .machine
            .extracted_text()
            .ok_or(WorkflowError::EmptyExtractedText)?
            .to_string();

        self.machine.submit_profile(patient.clone())?;

        let _span = tracing::info_span!("workflow_validation", session_id = %self.id).entered();
        let result = self.validator.validate(&text, &patient);
        self.machine.record_result(result.clone())?;
        Ok(result)
    }

    /// Step back from patient intake to the upload step.
    pub fn back(&mut self) -> Result<(), WorkflowError> {
        self.machine.back()
    }

    /// Discard all session state and return to a fresh upload step.
    pub fn reset(&mut self) {
        tracing::info!(session_id = %self.id, "Workflow session reset");
        self.machine.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::MockGenerativeClient;
    use crate::models::enums::Gender;
    use crate::pipeline::extraction::ExtractionError;

    fn patient() -> PatientProfile {
        PatientProfile {
            name: "Jane Doe".into(),
            age: 34,
            weight_kg: 62.5,
            height_cm: 168,
            gender: Gender::Female,
            conditions: vec![],
            allergies: vec![],
            current_medications: vec![],
            symptoms: vec![],
        }
    }

    fn upload() -> UploadedFile {
        UploadedFile::new("rx.png", "image/png", b"fake-png-bytes".to_vec())
    }

    #[test]
    fn full_session_happy_path() {
        // One mock serves both engines: OCR returns the transcription, and
        // the validator gets the same unstructured text back, which lands in
        // the heuristic path.
        let mut session = WorkflowSession::new(Arc::new(MockGenerativeClient::new(
            "Amoxicillin 500mg - twice daily for 7 days",
        )));
        let text = session.process_upload(&upload()).unwrap();
        assert_eq!(text, "Amoxicillin 500mg - twice daily for 7 days");
        assert_eq!(session.step(), WorkflowStep::Upload);

        session.confirm_extraction().unwrap();
        assert_eq!(session.step(), WorkflowStep::PatientInfo);

        let result = session.submit_profile(patient()).unwrap();
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.extracted_medications[0].name, "Amoxicillin");
        assert_eq!(session.step(), WorkflowStep::Results);
        assert_eq!(session.result(), Some(&result));
    }

    #[test]
    fn failed_ocr_surfaces_extraction_error() {
        let mut session = WorkflowSession::new(Arc::new(MockGenerativeClient::failing()));
        let err = session.process_upload(&upload()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Extraction(ExtractionError::OcrProcessing(_))
        ));
        assert_eq!(session.step(), WorkflowStep::Upload);
        assert!(session.extracted_text().is_none());
    }

    #[test]
    fn upload_outside_upload_step_is_rejected() {
        let mut session = WorkflowSession::new(Arc::new(MockGenerativeClient::new("Rx text")));
        session.process_upload(&upload()).unwrap();
        session.confirm_extraction().unwrap();

        assert!(matches!(
            session.process_upload(&upload()),
            Err(WorkflowError::InvalidTransition {
                step: WorkflowStep::PatientInfo,
                event: "process_upload"
            })
        ));
    }

    #[test]
    fn submit_before_confirmation_is_rejected() {
        let mut session = WorkflowSession::new(Arc::new(MockGenerativeClient::new("Rx text")));
        assert!(matches!(
            session.submit_profile(patient()),
            Err(WorkflowError::InvalidTransition {
                step: WorkflowStep::Upload,
                event: "submit_profile"
            })
        ));
    }

    #[test]
    fn edited_text_is_what_validation_sees() {
        let mut session = WorkflowSession::new(Arc::new(MockGenerativeClient::failing()));
        // Failing client: skip OCR and stage text directly, then let the
        // failed validation call prove which text reached the validator.
        session
            .edit_extracted_text("Metformin 850mg - once daily".into())
            .unwrap();
        session.confirm_extraction().unwrap();

        let result = session.submit_profile(patient()).unwrap();
        assert_eq!(result.extracted_medications[0].name, "Metformin");
    }

    #[test]
    fn back_then_resubmit_uses_revised_text() {
        let mut session = WorkflowSession::new(Arc::new(MockGenerativeClient::failing()));
        session
            .edit_extracted_text("Metformin 850mg - once daily".into())
            .unwrap();
        session.confirm_extraction().unwrap();
        session.back().unwrap();
        session
            .edit_extracted_text("Lisinopril 10mg - once daily".into())
            .unwrap();
        session.confirm_extraction().unwrap();

        let result = session.submit_profile(patient()).unwrap();
        assert_eq!(result.extracted_medications[0].name, "Lisinopril");
    }

    #[test]
    fn reset_returns_to_fresh_upload() {
        let mut session = WorkflowSession::new(Arc::new(MockGenerativeClient::new("Rx text")));
        session.process_upload(&upload()).unwrap();
        session.confirm_extraction().unwrap();

        session.reset();
        assert_eq!(session.step(), WorkflowStep::Upload);
        assert!(session.extracted_text().is_none());
        assert!(session.result().is_none());
    }

    #[test]
    fn sessions_have_distinct_ids() {
        let a = WorkflowSession::new(Arc::new(MockGenerativeClient::new("x")));
        let b = WorkflowSession::new(Arc::new(MockGenerativeClient::new("x")));
        assert_ne!(a.id(), b.id());
    }
}
