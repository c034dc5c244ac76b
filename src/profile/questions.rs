// src/profile/questions.rs
//! Fixed questionnaire served to the client.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Scale,
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub question: &'static str,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u8>,
}

const fn scale(id: &'static str, question: &'static str) -> Question {
    Question {
        id,
        question,
        kind: QuestionKind::Scale,
        min: Some(1),
        max: Some(5),
    }
}

const fn text(id: &'static str, question: &'static str) -> Question {
    Question {
        id,
        question,
        kind: QuestionKind::Text,
        min: None,
        max: None,
    }
}

pub static QUESTIONNAIRE: &[Question] = &[
    scale("openness_1", "I am curious about many different things."),
    scale("conscientiousness_1", "I am always prepared and organized."),
    scale("extraversion_1", "I get energy from being around other people."),
    scale("agreeableness_1", "I am sympathetic to how others feel."),
    scale("neuroticism_1", "I worry about things often."),
    text("childhood_memory_1", "What is one of your fondest childhood memories?"),
    text("childhood_memory_2", "What was your favorite subject in school when you were younger?"),
    text("aspiration_1", "What did you dream of becoming when you were younger?"),
    text("fear_1", "What was one of your biggest fears when you were younger?"),
];
