use serde::{Deserialize, Serialize};

use super::enums::Gender;
use super::ModelError;

/// Patient intake data gathered before validation.
///
/// List fields are ordered and may repeat; entries are kept exactly as the
/// user typed them. The profile is treated as immutable once submitted to a
/// workflow and is destroyed on reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub name: String,
    /// Age in whole years.
    pub age: u32,
    /// Body weight in kilograms.
    pub weight_kg: f64,
    /// Height in centimeters.
    pub height_cm: u32,
    pub gender: Gender,
    pub conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub current_medications: Vec<String>,
    pub symptoms: Vec<String>,
}

impl PatientProfile {
    /// Boundary check applied before the profile may enter validation.
    ///
    /// The name must be non-blank and all numeric fields strictly positive.
    /// List fields are unconstrained.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.age == 0 {
            return Err(ModelError::InvalidAge);
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(ModelError::InvalidWeight);
        }
        if self.height_cm == 0 {
            return Err(ModelError::InvalidHeight);
        }
        Ok(())
    }
}
