// src/profile/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five Big-Five dimensions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Trait {
    pub const ALL: [Trait; 5] = [
        Trait::Openness,
        Trait::Conscientiousness,
        Trait::Extraversion,
        Trait::Agreeableness,
        Trait::Neuroticism,
    ];

    /// Field name on the wire, also the question-id prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trait::Openness => "openness",
            Trait::Conscientiousness => "conscientiousness",
            Trait::Extraversion => "extraversion",
            Trait::Agreeableness => "agreeableness",
            Trait::Neuroticism => "neuroticism",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Trait::Openness => 0,
            Trait::Conscientiousness => 1,
            Trait::Extraversion => 2,
            Trait::Agreeableness => 3,
            Trait::Neuroticism => 4,
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text lists collected by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    Memories,
    Aspirations,
    Fears,
}

impl ListField {
    pub const ALL: [ListField; 3] = [ListField::Memories, ListField::Aspirations, ListField::Fears];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListField::Memories => "memories",
            ListField::Aspirations => "aspirations",
            ListField::Fears => "fears",
        }
    }

    /// Question-id prefix routed into this list.
    pub fn prefix(&self) -> &'static str {
        match self {
            ListField::Memories => "childhood_memory",
            ListField::Aspirations => "aspiration",
            ListField::Fears => "fear",
        }
    }
}

impl fmt::Display for ListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-way band every trait-driven rule keys off: `>= 4`, `<= 2`, or in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    High,
    Middle,
    Low,
}

/// A trait score, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TraitScore(u8);

impl TraitScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const NEUTRAL: TraitScore = TraitScore(3);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn band(self) -> Band {
        match self.0 {
            4.. => Band::High,
            ..=2 => Band::Low,
            _ => Band::Middle,
        }
    }

    /// Gate used by the topic groups.
    pub fn at_least_neutral(self) -> bool {
        self.0 >= 3
    }
}

impl Default for TraitScore {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<u8> for TraitScore {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            format!(
                "trait score {value} outside {}..={}",
                Self::MIN,
                Self::MAX
            )
        })
    }
}

impl From<TraitScore> for u8 {
    fn from(score: TraitScore) -> Self {
        score.0
    }
}

impl fmt::Display for TraitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answer payload: scale questions send numbers, free-text questions send strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        AnswerValue::Number(value as f64)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

/// One questionnaire answer as submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAnswer {
    pub question_id: String,
    pub answer: AnswerValue,
}

impl TestAnswer {
    pub fn new(question_id: impl Into<String>, answer: impl Into<AnswerValue>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: answer.into(),
        }
    }
}

/// Validated personality record. Immutable once built; traits default to 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub openness: TraitScore,
    pub conscientiousness: TraitScore,
    pub extraversion: TraitScore,
    pub agreeableness: TraitScore,
    pub neuroticism: TraitScore,
    #[serde(default)]
    pub memories: Vec<String>,
    #[serde(default)]
    pub aspirations: Vec<String>,
    #[serde(default)]
    pub fears: Vec<String>,
}

impl PersonalityProfile {
    pub fn score(&self, field: Trait) -> TraitScore {
        match field {
            Trait::Openness => self.openness,
            Trait::Conscientiousness => self.conscientiousness,
            Trait::Extraversion => self.extraversion,
            Trait::Agreeableness => self.agreeableness,
            Trait::Neuroticism => self.neuroticism,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trait_score_bounds() {
        assert!(TraitScore::new(0).is_none());
        assert!(TraitScore::new(6).is_none());
        assert_eq!(TraitScore::new(1).map(TraitScore::get), Some(1));
        assert_eq!(TraitScore::new(5).map(TraitScore::get), Some(5));
        assert_eq!(TraitScore::default().get(), 3);
    }

    #[test]
    fn test_bands() {
        let band = |v| TraitScore::new(v).unwrap().band();
        assert_eq!(band(1), Band::Low);
        assert_eq!(band(2), Band::Low);
        assert_eq!(band(3), Band::Middle);
        assert_eq!(band(4), Band::High);
        assert_eq!(band(5), Band::High);
    }

    #[test]
    fn test_profile_wire_format() {
        let profile = PersonalityProfile {
            openness: TraitScore::new(5).unwrap(),
            memories: vec!["the lake house".to_string()],
            ..Default::default()
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["openness"], json!(5));
        assert_eq!(value["neuroticism"], json!(3));
        assert_eq!(value["memories"], json!(["the lake house"]));
        assert_eq!(value["fears"], json!([]));
    }

    #[test]
    fn test_profile_rejects_out_of_range_on_decode() {
        let bad = json!({
            "openness": 9, "conscientiousness": 3, "extraversion": 3,
            "agreeableness": 3, "neuroticism": 3
        });
        assert!(serde_json::from_value::<PersonalityProfile>(bad).is_err());
    }

    #[test]
    fn test_answer_value_untagged() {
        let answers: Vec<TestAnswer> = serde_json::from_value(json!([
            {"questionId": "openness_1", "answer": 4},
            {"questionId": "fear_1", "answer": "the dark"}
        ]))
        .unwrap();

        assert_eq!(answers[0].answer, AnswerValue::Number(4.0));
        assert_eq!(answers[1].answer, AnswerValue::Text("the dark".to_string()));
    }
}
