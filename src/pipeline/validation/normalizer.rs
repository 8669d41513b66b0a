//! Response normalization — turns raw model output into a `ValidationResult`.
//!
//! Normalization is total: a structured decode is attempted first, and any
//! failure (no JSON, malformed JSON, schema mismatch, out-of-range confidence)
//! drops to the heuristic fallback instead of surfacing an error.

use super::fallback::heuristic_result;
use super::types::ValidationResult;

/// Normalize a raw model response into a validation result.
///
/// The structured path slices the candidate JSON object out of the response
/// (models often wrap it in prose or markdown fences) and decodes it against
/// the result schema. When that fails, the heuristic fallback reads the raw
/// text directly.
pub fn normalize_response(raw: &str) -> ValidationResult {
    match decode_structured(raw) {
        Some(result) => result,
        None => {
            tracing::warn!(
                response_len = raw.len(),
                "Structured decode failed, using heuristic fallback"
            );
            heuristic_result(raw)
        }
    }
}

/// Slice the candidate JSON object out of the raw response.
///
/// Greedy scan: first `{` to last `}` inclusive. Prose before and after the
/// object is discarded; anything between the braces is kept as-is.
fn json_slice(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Decode the response as a schema-conforming result.
///
/// Returns `None` when no JSON object is present, the object does not decode
/// into the result schema, or the reported confidence is not a value in
/// [0.0, 1.0].
fn decode_structured(raw: &str) -> Option<ValidationResult> {
    let candidate = json_slice(raw)?;
    let result: ValidationResult = serde_json::from_str(candidate).ok()?;
    if !result.confidence.is_finite() || !(0.0..=1.0).contains(&result.confidence) {
        return None;
    }
    Some(result)
}
