use crate::models::patient::PatientProfile;

/// Placeholder rendered when a patient list field is empty.
const NONE_REPORTED: &str = "None reported";

/// Build the validation prompt for one prescription/patient pair.
///
/// Deterministic: the same inputs always produce the same string. The
/// prescription text and patient fields are embedded verbatim, followed by
/// the exact output schema the normalizer expects the model to emit.
pub fn build_validation_prompt(prescription_text: &str, patient: &PatientProfile) -> String {
    format!(
        r#"You are a medical prescription validation AI. Analyze the following prescription for a specific patient and provide a detailed validation report.

PRESCRIPTION TEXT:
{prescription_text}

PATIENT INFORMATION:
- Name: {name}
- Age: {age} years
- Weight: {weight} kg
- Height: {height} cm
- Gender: {gender}
- Medical Conditions: {conditions}
- Known Allergies: {allergies}
- Current Medications: {medications}
- Current Symptoms: {symptoms}

Please provide your analysis in the following JSON format:

{{
  "isValid": boolean,
  "confidence": number (0-1),
  "extractedMedications": [
    {{
      "name": "medication name",
      "dosage": "dosage amount",
      "frequency": "how often",
      "duration": "treatment duration",
      "instructions": "additional instructions"
    }}
  ],
  "alerts": [
    {{
      "type": "error|warning|info",
      "category": "dosage|interaction|allergy|duplicate|compliance|contraindication",
      "message": "detailed alert message",
      "severity": "high|medium|low",
      "medication": "affected medication name (optional)"
    }}
  ],
  "recommendations": [
    "recommendation text"
  ],
  "overallRisk": "low|medium|high"
}}

VALIDATION CRITERIA:
1. Extract all medications with their dosages, frequencies, and durations
2. Check for appropriate dosages based on patient age, weight, and conditions
3. Identify potential drug interactions with current medications
4. Check for allergic reactions based on known allergies
5. Look for duplicate or conflicting medications
6. Verify prescription completeness and legibility
7. Check for contraindications based on patient conditions
8. Assess overall safety and compliance

Provide specific, actionable alerts and recommendations. Be thorough but practical.
"#,
        prescription_text = prescription_text,
        name = patient.name,
        age = patient.age,
        weight = patient.weight_kg,
        height = patient.height_cm,
        gender = patient.gender.as_str(),
        conditions = join_or_none(&patient.conditions),
        allergies = join_or_none(&patient.allergies),
        medications = join_or_none(&patient.current_medications),
        symptoms = join_or_none(&patient.symptoms),
    )
}

/// Comma-join a list field, or the literal placeholder when empty.
fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        NONE_REPORTED.to_string()
    } else {
        items.join(", ")
    }
}
