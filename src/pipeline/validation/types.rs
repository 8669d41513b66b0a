use serde::{Deserialize, Serialize};

use crate::models::enums::{AlertCategory, AlertSeverity, AlertType, RiskLevel};

/// A single medication read out of the prescription text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A finding raised by validation.
///
/// `medication` is a weak label: it names the affected medication by string
/// only and is not required to match an extracted entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationAlert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub category: AlertCategory,
    pub message: String,
    pub severity: AlertSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication: Option<String>,
}

/// Complete result of one prescription validation request.
///
/// Serializes camelCase to match the schema the model is instructed to emit,
/// so a well-formed model response decodes directly into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub confidence: f64,
    pub extracted_medications: Vec<Medication>,
    pub alerts: Vec<ValidationAlert>,
    pub recommendations: Vec<String>,
    pub overall_risk: RiskLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_decodes_from_wire_names() {
        let raw = r#"{
            "isValid": true,
            "confidence": 0.9,
            "extractedMedications": [
                {
                    "name": "Amoxicillin",
                    "dosage": "500mg",
                    "frequency": "twice daily",
                    "duration": "7 days",
                    "instructions": "take with food"
                }
            ],
            "alerts": [
                {
                    "type": "warning",
                    "category": "dosage",
                    "message": "Check dosage",
                    "severity": "medium",
                    "medication": "Amoxicillin"
                }
            ],
            "recommendations": ["Follow up in one week"],
            "overallRisk": "low"
        }"#;

        let result: ValidationResult = serde_json::from_str(raw).unwrap();
        assert!(result.is_valid);
        assert_eq!(result.extracted_medications[0].name, "Amoxicillin");
        assert_eq!(result.alerts[0].alert_type, AlertType::Warning);
        assert_eq!(result.alerts[0].category, AlertCategory::Dosage);
        assert_eq!(result.overall_risk, RiskLevel::Low);
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let raw = r#"{
            "isValid": false,
            "confidence": 0.4,
            "extractedMedications": [
                {"name": "X", "dosage": "1mg", "frequency": "daily", "duration": "3 days"}
            ],
            "alerts": [
                {"type": "error", "category": "allergy", "message": "m", "severity": "high"}
            ],
            "recommendations": [],
            "overallRisk": "high"
        }"#;

        let result: ValidationResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.extracted_medications[0].instructions, None);
        assert_eq!(result.alerts[0].medication, None);
    }

    #[test]
    fn missing_required_field_fails_decode() {
        // No overallRisk
        let raw = r#"{
            "isValid": true,
            "confidence": 0.9,
            "extractedMedications": [],
            "alerts": [],
            "recommendations": []
        }"#;
        assert!(serde_json::from_str::<ValidationResult>(raw).is_err());
    }

    #[test]
    fn alert_type_field_serializes_as_type() {
        let alert = ValidationAlert {
            alert_type: AlertType::Info,
            category: AlertCategory::Compliance,
            message: "note".into(),
            severity: AlertSeverity::Low,
            medication: None,
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "info");
        assert!(json.get("alert_type").is_none());
        assert!(json.get("medication").is_none());
    }
}
