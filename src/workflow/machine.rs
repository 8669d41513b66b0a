//! Workflow state machine for the upload → patient info → results flow.
//!
//! Transitions are gated on the current step. Invalid events return
//! `WorkflowError::InvalidTransition` and leave the machine unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::WorkflowError;
use crate::models::patient::PatientProfile;
use crate::pipeline::validation::ValidationResult;

/// The three user-facing steps of a validation workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStep {
    #[default]
    #[serde(rename = "upload")]
    Upload,
    #[serde(rename = "patient_info")]
    PatientInfo,
    #[serde(rename = "results")]
    Results,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::Upload => "upload",
            WorkflowStep::PatientInfo => "patient_info",
            WorkflowStep::Results => "results",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State carried across one validation workflow.
///
/// Stepping back keeps the accumulated data so the user can revise a step
/// without losing work. Only `reset` clears it.
#[derive(Debug, Default)]
pub struct Workflow {
    step: WorkflowStep,
    extracted_text: Option<String>,
    patient: Option<PatientProfile>,
    result: Option<ValidationResult>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn extracted_text(&self) -> Option<&str> {
        self.extracted_text.as_deref()
    }

    pub fn patient(&self) -> Option<&PatientProfile> {
        self.patient.as_ref()
    }

    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    /// Store or replace the extracted prescription text. Upload step only.
    pub fn set_extracted_text(&mut self, text: String) -> Result<(), WorkflowError> {
        self.require_step(WorkflowStep::Upload, "set_extracted_text")?;
        self.extracted_text = Some(text);
        Ok(())
    }

    /// Accept the extracted text and advance to patient intake.
    ///
    /// Requires non-blank extracted text; whitespace-only text cannot be
    /// confirmed.
    pub fn confirm_extraction(&mut self) -> Result<(), WorkflowError> {
        self.require_step(WorkflowStep::Upload, "confirm_extraction")?;
        match &self.extracted_text {
            Some(text) if !text.trim().is_empty() => {
                self.step = WorkflowStep::PatientInfo;
                Ok(())
            }
            _ => Err(WorkflowError::EmptyExtractedText),
        }
    }

    /// Accept a patient profile and advance to results.
    ///
    /// The profile is validated before it is stored; a rejected profile
    /// leaves the machine in the patient info step.
    pub fn submit_profile(&mut self, patient: PatientProfile) -> Result<(), WorkflowError> {
        self.require_step(WorkflowStep::PatientInfo, "submit_profile")?;
        patient.validate()?;
        self.patient = Some(patient);
        self.step = WorkflowStep::Results;
        Ok(())
    }

    /// Store the validation report. Results step only.
    pub fn record_result(&mut self, result: ValidationResult) -> Result<(), WorkflowError> {
        self.require_step(WorkflowStep::Results, "record_result")?;
        self.result = Some(result);
        Ok(())
    }

    /// Step back from patient intake to the upload step.
    ///
    /// Moves the step pointer only; extracted text and any stored profile
    /// are kept.
    pub fn back(&mut self) -> Result<(), WorkflowError> {
        self.require_step(WorkflowStep::PatientInfo, "back")?;
        self.step = WorkflowStep::Upload;
        Ok(())
    }

    /// Return to a fresh upload step, discarding all accumulated state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn require_step(
        &self,
        expected: WorkflowStep,
        event: &'static str,
    ) -> Result<(), WorkflowError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition {
                step: self.step,
                event,
            })
        }
    }
}
