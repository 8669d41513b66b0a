//! Validation orchestrator — one model call per prescription/patient pair.
//!
//! The orchestrator never fails: a successful model response goes through the
//! normalizer, and any transport or API error yields the fixed failure result
//! built from the original prescription text.

use std::sync::Arc;

use super::fallback::failure_result;
use super::normalizer::normalize_response;
use super::prompt::build_validation_prompt;
use super::types::ValidationResult;
use crate::gemini::{GenerationConfig, GenerativeClient};
use crate::models::patient::PatientProfile;

/// Prescription validator backed by the generative model.
pub struct PrescriptionValidator {
    client: Arc<dyn GenerativeClient>,
}

impl PrescriptionValidator {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self { client }
    }

    /// Validate a prescription for a patient.
    ///
    /// Always returns a report. Model output is normalized (structured decode
    /// with heuristic fallback); a failed model call produces the failure
    /// result, with medications re-extracted from the prescription text.
    pub fn validate(&self, prescription_text: &str, patient: &PatientProfile) -> ValidationResult {
        let _span = tracing::info_span!(
            "prescription_validation",
            patient_age = patient.age,
            text_len = prescription_text.len(),
        )
        .entered();
        let start = std::time::Instant::now();

        let prompt = build_validation_prompt(prescription_text, patient);

        match self
            .client
            .generate_text(&prompt, &GenerationConfig::validation())
        {
            Ok(raw) => {
                let result = normalize_response(&raw);
                tracing::info!(
                    elapsed_ms = %start.elapsed().as_millis(),
                    is_valid = result.is_valid,
                    alerts = result.alerts.len(),
                    medications = result.extracted_medications.len(),
                    "Prescription validation complete"
                );
                result
            }
            Err(e) => {
                tracing::warn!(
                    elapsed_ms = %start.elapsed().as_millis(),
                    error = %e,
                    "Validation call failed, returning failure result"
                );
                failure_result(prescription_text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::MockGenerativeClient;
    use crate::models::enums::{AlertCategory, AlertType, Gender, RiskLevel};

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

    #[test]
    fn structured_model_response_passes_through() {
        let raw = r#"{
            "isValid": true,
            "confidence": 0.88,
            "extractedMedications": [
                {"name": "Amoxicillin", "dosage": "500mg", "frequency": "twice daily", "duration": "7 days"}
            ],
            "alerts": [],
            "recommendations": ["Complete the full course"],
            "overallRisk": "low"
        }"#;
        let validator = PrescriptionValidator::new(Arc::new(MockGenerativeClient::new(raw)));
        let result = validator.validate("Amoxicillin 500mg - twice daily", &patient());
        assert!(result.is_valid);
        assert_eq!(result.confidence, 0.88);
        assert_eq!(result.overall_risk, RiskLevel::Low);
    }

    #[test]
    fn unstructured_model_response_uses_heuristics() {
        let validator = PrescriptionValidator::new(Arc::new(MockGenerativeClient::new(
            "Ibuprofen 400mg - three times a day for 5 days",
        )));
        let result = validator.validate("Ibuprofen 400mg - three times a day", &patient());
        assert_eq!(result.confidence, 0.7);
        assert_eq!(result.extracted_medications[0].name, "Ibuprofen");
    }

    #[test]
    fn model_failure_yields_failure_result() {
        let validator = PrescriptionValidator::new(Arc::new(MockGenerativeClient::failing()));
        let result = validator.validate("Metformin 850mg - once daily", &patient());
        assert!(!result.is_valid);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.alerts.len(), 1);
        assert_eq!(result.alerts[0].alert_type, AlertType::Error);
        assert_eq!(result.alerts[0].category, AlertCategory::Compliance);
        assert_eq!(result.overall_risk, RiskLevel::Medium);
    }

    #[test]
    fn failure_result_extracts_from_original_text() {
        // Medications come from the prescription text, not model output.
        let validator = PrescriptionValidator::new(Arc::new(MockGenerativeClient::failing()));
        let result = validator.validate("Metformin 850mg - once daily", &patient());
        assert_eq!(result.extracted_medications.len(), 1);
        assert_eq!(result.extracted_medications[0].name, "Metformin");
        assert_eq!(result.extracted_medications[0].dosage, "850mg");
    }
}
