//! Heuristic fallback — regex and keyword extraction over raw model output.
//!
//! Used when the model response carries no decodable JSON, and (for
//! medications only) when the model call itself fails. Rule tables are
//! ordered; textual order is the precedence contract.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{Medication, ValidationAlert, ValidationResult};
use crate::models::enums::{AlertCategory, AlertSeverity, AlertType, RiskLevel};

/// Medication line patterns, tried in order per line; the first match wins.
/// Capture groups: name, dosage, remainder.
static MEDICATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "Amoxicillin 500mg - take twice daily for 7 days"
        rx(r"(?i)(\w+(?:\s+\w+)*)\s+(\d+(?:\.\d+)?(?:mg|mcg|g|ml|cc|units?))\s*[-–—]\s*(.+)$"),
        // "Amoxicillin 500mg take twice daily for 7 days"
        rx(r"(?i)(\w+(?:\s+\w+)*)\s+(\d+(?:\.\d+)?(?:mg|mcg|g|ml|cc|units?))\s+(.+)$"),
    ]
});

/// Frequency phrases, tried in order against the matched remainder.
static FREQUENCY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        rx(r"(?i)\d+\s*times?\s*(?:a\s*|per\s*)?day"),
        rx(r"(?i)\d+\s*times?\s*daily"),
        rx(r"(?i)once\s*daily"),
        rx(r"(?i)twice\s*daily"),
        rx(r"(?i)thrice\s*daily"),
        rx(r"(?i)every\s*\d+\s*hours?"),
        rx(r"(?i)morning|evening|night"),
    ]
});

/// Duration phrases, tried in order against the matched remainder.
static DURATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        rx(r"(?i)\d+\s*days?"),
        rx(r"(?i)\d+\s*weeks?"),
        rx(r"(?i)\d+\s*months?"),
        rx(r"(?i)for\s*\d+\s*days?"),
        rx(r"(?i)for\s*\d+\s*weeks?"),
    ]
});

fn rx(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid fallback regex pattern")
}

/// First matching phrase from an ordered table, or None.
fn find_first(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|p| p.find(text))
        .map(|m| m.as_str().to_string())
}

/// Extract medications line by line from free text.
///
/// Every line is tested against the dash-separated family first, then the
/// whitespace-separated family; a line contributes at most one medication.
/// When nothing matches, exactly one placeholder entry flags the text for
/// manual review.
pub fn extract_medications(text: &str) -> Vec<Medication> {
    let mut medications = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for pattern in MEDICATION_PATTERNS.iter() {
            if let Some(caps) = pattern.captures(line) {
                let remainder = caps[3].trim().to_string();
                medications.push(Medication {
                    name: caps[1].trim().to_string(),
                    dosage: caps[2].trim().to_string(),
                    frequency: find_first(&FREQUENCY_PATTERNS, &remainder)
                        .unwrap_or_else(|| "As directed".to_string()),
                    duration: find_first(&DURATION_PATTERNS, &remainder)
                        .unwrap_or_else(|| "Not specified".to_string()),
                    instructions: Some(remainder),
                });
                break;
            }
        }
    }

    if medications.is_empty() {
        medications.push(Medication {
            name: "Unable to parse medication".to_string(),
            dosage: "Not specified".to_string(),
            frequency: "Not specified".to_string(),
            duration: "Not specified".to_string(),
            instructions: Some("Manual review required".to_string()),
        });
    }

    medications
}

/// Scan free text for alert keywords.
///
/// Triggers are independent, fire at most once each, and are scanned in a
/// fixed order: interaction, dosage+high, allergy.
pub fn extract_alerts(text: &str) -> Vec<ValidationAlert> {
    let lower = text.to_lowercase();
    let mut alerts = Vec::new();

    if lower.contains("interaction") {
        alerts.push(ValidationAlert {
            alert_type: AlertType::Warning,
            category: AlertCategory::Interaction,
            message: "Potential drug interaction detected".to_string(),
            severity: AlertSeverity::Medium,
            medication: None,
        });
    }

    if lower.contains("dosage") && lower.contains("high") {
        alerts.push(ValidationAlert {
            alert_type: AlertType::Warning,
            category: AlertCategory::Dosage,
            message: "Dosage may be higher than recommended".to_string(),
            severity: AlertSeverity::Medium,
            medication: None,
        });
    }

    if lower.contains("allergy") || lower.contains("allergic") {
        alerts.push(ValidationAlert {
            alert_type: AlertType::Error,
            category: AlertCategory::Allergy,
            message: "Potential allergic reaction risk identified".to_string(),
            severity: AlertSeverity::High,
            medication: None,
        });
    }

    alerts
}

/// Assemble a result from heuristics over an undecodable model response.
///
/// Invariants: validity mirrors the absence of error alerts, and overall
/// risk is high exactly when a high-severity alert fired.
pub fn heuristic_result(raw: &str) -> ValidationResult {
    let medications = extract_medications(raw);
    let alerts = extract_alerts(raw);

    let is_valid = !alerts.iter().any(|a| a.alert_type == AlertType::Error);
    let overall_risk = if alerts.iter().any(|a| a.severity == AlertSeverity::High) {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    };

    ValidationResult {
        is_valid,
        confidence: 0.7,
        extracted_medications: medications,
        alerts,
        recommendations: vec![
            "Manual review recommended due to parsing limitations".to_string(),
            "Verify all medication dosages with medical references".to_string(),
            "Check for potential drug interactions".to_string(),
        ],
        overall_risk,
    }
}

/// Assemble the degraded result used when the model call itself fails.
///
/// Medications come from the original prescription text; the alert scan is
/// not run, because there is no model output to scan.
pub fn failure_result(prescription_text: &str) -> ValidationResult {
    ValidationResult {
        is_valid: false,
        confidence: 0.5,
        extracted_medications: extract_medications(prescription_text),
        alerts: vec![ValidationAlert {
            alert_type: AlertType::Error,
            category: AlertCategory::Compliance,
            message: "Unable to complete validation due to technical issues. Please review manually."
                .to_string(),
            severity: AlertSeverity::High,
            medication: None,
        }],
        recommendations: vec![
            "Manual review recommended due to validation system error".to_string()
        ],
        overall_risk: RiskLevel::Medium,
    }
}
