// src/profile/extract.rs

use tracing::debug;

use super::types::{AnswerValue, ListField, PersonalityProfile, TestAnswer, Trait};
use super::validation::{validate_score, ValidationError};

/// Where an answer lands, decided by its question-id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerRoute {
    Trait(Trait),
    List(ListField),
    Ignored,
}

/// Trait prefixes are tried first, then `childhood_memory`, `aspiration`, `fear`.
pub fn classify(question_id: &str) -> AnswerRoute {
    if let Some(field) = Trait::ALL.iter().find(|t| question_id.starts_with(t.as_str())) {
        return AnswerRoute::Trait(*field);
    }
    if let Some(field) = ListField::ALL.iter().find(|l| question_id.starts_with(l.prefix())) {
        return AnswerRoute::List(*field);
    }
    AnswerRoute::Ignored
}

/// Numeric reading of a trait answer. Text that does not parse becomes NaN.
pub fn coerce_number(answer: &AnswerValue) -> f64 {
    match answer {
        AnswerValue::Number(n) => *n,
        AnswerValue::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Answers folded into shape but not yet range-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProfile {
    scores: [f64; 5],
    pub memories: Vec<String>,
    pub aspirations: Vec<String>,
    pub fears: Vec<String>,
}

impl Default for RawProfile {
    fn default() -> Self {
        Self {
            scores: [3.0; 5],
            memories: Vec::new(),
            aspirations: Vec::new(),
            fears: Vec::new(),
        }
    }
}

impl RawProfile {
    pub fn score(&self, field: Trait) -> f64 {
        self.scores[field.index()]
    }

    fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Memories => &mut self.memories,
            ListField::Aspirations => &mut self.aspirations,
            ListField::Fears => &mut self.fears,
        }
    }

    pub fn validate(self) -> Result<PersonalityProfile, ValidationError> {
        Ok(PersonalityProfile {
            openness: validate_score(Trait::Openness, self.score(Trait::Openness))?,
            conscientiousness: validate_score(
                Trait::Conscientiousness,
                self.score(Trait::Conscientiousness),
            )?,
            extraversion: validate_score(Trait::Extraversion, self.score(Trait::Extraversion))?,
            agreeableness: validate_score(Trait::Agreeableness, self.score(Trait::Agreeableness))?,
            neuroticism: validate_score(Trait::Neuroticism, self.score(Trait::Neuroticism))?,
            memories: self.memories,
            aspirations: self.aspirations,
            fears: self.fears,
        })
    }
}

/// Fold answers in order. Later trait answers overwrite earlier ones, list
/// answers append; blank or numeric list answers and unknown ids are dropped.
/// Never fails and never clamps.
pub fn fold_answers(answers: &[TestAnswer]) -> RawProfile {
    let mut raw = RawProfile::default();

    for answer in answers {
        match classify(&answer.question_id) {
            AnswerRoute::Trait(field) => {
                raw.scores[field.index()] = coerce_number(&answer.answer);
            }
            AnswerRoute::List(field) => {
                if let AnswerValue::Text(text) = &answer.answer {
                    let text = text.trim();
                    if !text.is_empty() {
                        raw.list_mut(field).push(text.to_string());
                    }
                }
            }
            AnswerRoute::Ignored => {
                debug!("Ignoring answer for unknown question '{}'", answer.question_id);
            }
        }
    }

    raw
}

/// Fold then validate. An empty answer list yields the neutral default profile.
pub fn extract_profile(answers: &[TestAnswer]) -> Result<PersonalityProfile, ValidationError> {
    fold_answers(answers).validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_answers_give_defaults() {
        let profile = extract_profile(&[]).unwrap();
        assert_eq!(profile, PersonalityProfile::default());
        for field in Trait::ALL {
            assert_eq!(profile.score(field).get(), 3);
        }
        assert!(profile.memories.is_empty());
        assert!(profile.aspirations.is_empty());
        assert!(profile.fears.is_empty());
    }

    #[test]
    fn test_trait_and_trimmed_memory() {
        let profile = extract_profile(&[
            TestAnswer::new("openness_1", 5),
            TestAnswer::new("childhood_memory_1", "  winning a spelling bee  "),
        ])
        .unwrap();

        assert_eq!(profile.openness.get(), 5);
        assert_eq!(profile.memories, vec!["winning a spelling bee"]);
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("openness_2"), AnswerRoute::Trait(Trait::Openness));
        assert_eq!(classify("neuroticism"), AnswerRoute::Trait(Trait::Neuroticism));
        assert_eq!(classify("childhood_memory_9"), AnswerRoute::List(ListField::Memories));
        assert_eq!(classify("aspiration_1"), AnswerRoute::List(ListField::Aspirations));
        assert_eq!(classify("fear_1"), AnswerRoute::List(ListField::Fears));
        assert_eq!(classify("favourite_colour"), AnswerRoute::Ignored);
        // prefixes match only at the start
        assert_eq!(classify("my_fear"), AnswerRoute::Ignored);
    }

    #[test]
    fn test_last_write_wins_for_traits() {
        let raw = fold_answers(&[
            TestAnswer::new("extraversion_1", 1),
            TestAnswer::new("extraversion_2", 4),
        ]);
        assert_eq!(raw.score(Trait::Extraversion), 4.0);
    }

    #[test]
    fn test_lists_accumulate_in_order_and_drop_blanks() {
        let raw = fold_answers(&[
            TestAnswer::new("aspiration_1", "write a novel"),
            TestAnswer::new("aspiration_2", "   "),
            TestAnswer::new("aspiration_3", 5),
            TestAnswer::new("aspiration_4", "see Iceland"),
            TestAnswer::new("fear_1", "spiders"),
        ]);
        assert_eq!(raw.aspirations, vec!["write a novel", "see Iceland"]);
        assert_eq!(raw.fears, vec!["spiders"]);
        assert!(raw.memories.is_empty());
    }

    #[test]
    fn test_fold_does_not_clamp() {
        let raw = fold_answers(&[
            TestAnswer::new("openness_1", 9),
            TestAnswer::new("agreeableness_1", "very"),
            TestAnswer::new("neuroticism_1", " 2 "),
        ]);
        assert_eq!(raw.score(Trait::Openness), 9.0);
        assert!(raw.score(Trait::Agreeableness).is_nan());
        assert_eq!(raw.score(Trait::Neuroticism), 2.0);
    }

    #[test]
    fn test_extract_reports_out_of_range() {
        let err = extract_profile(&[TestAnswer::new("openness_1", 9)]).unwrap_err();
        assert_eq!(err, ValidationError::OutOfRangeTrait { field: Trait::Openness, value: 9.0 });
    }

    #[test]
    fn test_extract_reports_non_numeric() {
        let err = extract_profile(&[TestAnswer::new("conscientiousness_1", "lots")]).unwrap_err();
        assert_eq!(err, ValidationError::NonNumericTrait { field: Trait::Conscientiousness });
    }

    #[test]
    fn test_numeric_text_is_accepted() {
        let profile = extract_profile(&[TestAnswer::new("agreeableness_1", "2")]).unwrap();
        assert_eq!(profile.agreeableness.get(), 2);
    }
}
