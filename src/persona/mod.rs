// src/persona/mod.rs
// Persona derived from a personality profile, and the formatter that shapes
// every outbound message in that persona's voice.

pub mod derive;
pub mod description;
pub mod format;

pub use derive::derive_persona;
pub use description::describe;
pub use format::format_message;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Vocabulary tier, driven by openness and conscientiousness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageComplexity {
    Simple,
    Moderate,
    Complex,
}

/// Punctuation and interjection tier, driven by extraversion and neuroticism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalExpression {
    Reserved,
    Balanced,
    Expressive,
}

/// Shared band cut-offs for both tiers, inclusive.
pub const UPPER_TIER_THRESHOLD: f64 = 4.0;
pub const MIDDLE_TIER_THRESHOLD: f64 = 2.5;

impl LanguageComplexity {
    pub fn from_average(score: f64) -> Self {
        if score >= UPPER_TIER_THRESHOLD {
            LanguageComplexity::Complex
        } else if score >= MIDDLE_TIER_THRESHOLD {
            LanguageComplexity::Moderate
        } else {
            LanguageComplexity::Simple
        }
    }
}

impl EmotionalExpression {
    pub fn from_average(score: f64) -> Self {
        if score >= UPPER_TIER_THRESHOLD {
            EmotionalExpression::Expressive
        } else if score >= MIDDLE_TIER_THRESHOLD {
            EmotionalExpression::Balanced
        } else {
            EmotionalExpression::Reserved
        }
    }
}

impl std::fmt::Display for LanguageComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LanguageComplexity::Simple => "simple",
                LanguageComplexity::Moderate => "moderate",
                LanguageComplexity::Complex => "complex",
            }
        )
    }
}

impl std::str::FromStr for LanguageComplexity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(LanguageComplexity::Simple),
            "moderate" => Ok(LanguageComplexity::Moderate),
            "complex" => Ok(LanguageComplexity::Complex),
            _ => Err(format!("Invalid language complexity: {s}")),
        }
    }
}

impl std::fmt::Display for EmotionalExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                EmotionalExpression::Reserved => "reserved",
                EmotionalExpression::Balanced => "balanced",
                EmotionalExpression::Expressive => "expressive",
            }
        )
    }
}

impl std::str::FromStr for EmotionalExpression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reserved" => Ok(EmotionalExpression::Reserved),
            "balanced" => Ok(EmotionalExpression::Balanced),
            "expressive" => Ok(EmotionalExpression::Expressive),
            _ => Err(format!("Invalid emotional expression: {s}")),
        }
    }
}

/// Read-only view derived once per chat session. A new profile needs a new derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaConfig {
    pub tone_style: String,
    pub language_complexity: LanguageComplexity,
    pub emotional_expression: EmotionalExpression,
    pub interest_topics: Vec<String>,
    pub memories: Vec<String>,
    pub aspirations: Vec<String>,
    pub fears: Vec<String>,
    pub personality_description: String,
    pub conversation_starters: Vec<String>,
}

impl PersonaConfig {
    /// Opening line: a uniformly drawn conversation starter in the persona's voice.
    pub fn greeting<R: Rng>(&self, rng: &mut R) -> String {
        let index = pick_index(rng, self.conversation_starters.len());
        let starter = self
            .conversation_starters
            .get(index)
            .map(String::as_str)
            .unwrap_or_default();
        format_message(starter, self, rng)
    }
}

/// `floor(u * len)` for a uniform draw `u` in `[0, 1)`.
pub(crate) fn pick_index<R: Rng>(rng: &mut R, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let draw: f64 = rng.random();
    ((draw * len as f64) as usize).min(len - 1)
}
