// src/profile/mod.rs
// Questionnaire answers -> validated personality profile.

pub mod extract;
pub mod questions;
pub mod types;
pub mod validation;

pub use extract::{classify, extract_profile, fold_answers, AnswerRoute, RawProfile};
pub use questions::{Question, QuestionKind, QUESTIONNAIRE};
pub use types::{AnswerValue, Band, ListField, PersonalityProfile, TestAnswer, Trait, TraitScore};
pub use validation::{validate_score, ProfileSubmission, ValidationError};
