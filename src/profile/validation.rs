// src/profile/validation.rs
//! Explicit validation between raw questionnaire input and a `PersonalityProfile`.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{ListField, PersonalityProfile, Trait, TraitScore};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid {field} value. Must be a number between 1 and 5.")]
    NonNumericTrait { field: Trait },

    #[error("Invalid {field} value {value}. Must be a number between 1 and 5.")]
    OutOfRangeTrait { field: Trait, value: f64 },

    #[error("Invalid {field} value {value}. Must be a whole number between 1 and 5.")]
    FractionalTrait { field: Trait, value: f64 },

    #[error("Invalid {field} value. Must be an array.")]
    NotAList { field: ListField },

    #[error("Invalid {field} entry. Entries must be strings.")]
    NonTextEntry { field: ListField },
}

impl ValidationError {
    /// Short machine-readable kind for API error codes.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::NonNumericTrait { .. } => "NON_NUMERIC_TRAIT",
            ValidationError::OutOfRangeTrait { .. } => "OUT_OF_RANGE_TRAIT",
            ValidationError::FractionalTrait { .. } => "FRACTIONAL_TRAIT",
            ValidationError::NotAList { .. } => "NOT_A_LIST",
            ValidationError::NonTextEntry { .. } => "NON_TEXT_ENTRY",
        }
    }
}

/// Check a coerced trait value and narrow it to a `TraitScore`.
pub fn validate_score(field: Trait, value: f64) -> Result<TraitScore, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonNumericTrait { field });
    }
    if value < TraitScore::MIN as f64 || value > TraitScore::MAX as f64 {
        return Err(ValidationError::OutOfRangeTrait { field, value });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::FractionalTrait { field, value });
    }
    TraitScore::new(value as u8).ok_or(ValidationError::OutOfRangeTrait { field, value })
}

/// Pre-aggregated test results in the wire shape: five numeric trait fields
/// and three string arrays. Field values are kept loose so that bad input
/// surfaces as a `ValidationError` instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ProfileSubmission(pub Map<String, Value>);

impl ProfileSubmission {
    pub fn validate(&self) -> Result<PersonalityProfile, ValidationError> {
        let mut scores = [TraitScore::NEUTRAL; 5];
        for field in Trait::ALL {
            let value = self
                .0
                .get(field.as_str())
                .and_then(Value::as_f64)
                .ok_or(ValidationError::NonNumericTrait { field })?;
            scores[field.index()] = validate_score(field, value)?;
        }

        let [openness, conscientiousness, extraversion, agreeableness, neuroticism] = scores;
        Ok(PersonalityProfile {
            openness,
            conscientiousness,
            extraversion,
            agreeableness,
            neuroticism,
            memories: self.list(ListField::Memories)?,
            aspirations: self.list(ListField::Aspirations)?,
            fears: self.list(ListField::Fears)?,
        })
    }

    fn list(&self, field: ListField) -> Result<Vec<String>, ValidationError> {
        let items = self
            .0
            .get(field.as_str())
            .and_then(Value::as_array)
            .ok_or(ValidationError::NotAList { field })?;

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let text = item.as_str().ok_or(ValidationError::NonTextEntry { field })?;
            let text = text.trim();
            if !text.is_empty() {
                entries.push(text.to_string());
            }
        }
        Ok(entries)
    }
}
