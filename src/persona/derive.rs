// src/persona/derive.rs

use crate::profile::{Band, PersonalityProfile, Trait, TraitScore};

use super::description::describe;
use super::{EmotionalExpression, LanguageComplexity, PersonaConfig};

/// Tone clauses in the order they are appended: (trait, high, low).
const TONE_RULES: [(Trait, &str, &str); 4] = [
    (Trait::Extraversion, "enthusiastic, energetic", "thoughtful, reserved"),
    (Trait::Agreeableness, "warm, friendly", "direct, straightforward"),
    (Trait::Neuroticism, "emotional, cautious", "calm, confident"),
    (Trait::Openness, "curious, imaginative", "practical, conventional"),
];

/// Topic groups, each gated on its trait being at least 3.
const TOPIC_GROUPS: [(Trait, &[&str]); 5] = [
    (Trait::Openness, &["art", "music", "literature", "philosophy", "science"]),
    (Trait::Conscientiousness, &["organization", "planning", "achievement", "goals"]),
    (Trait::Extraversion, &["social events", "parties", "group activities", "sports"]),
    (Trait::Agreeableness, &["helping others", "community", "relationships", "cooperation"]),
    (Trait::Neuroticism, &["emotions", "self-improvement", "stress management"]),
];

pub const BASE_STARTERS: [&str; 4] = [
    "Hey there! It's like looking into the future. What's life like for you now?",
    "I've been wondering what becomes of me. What are you up to these days?",
    "This is so weird but cool! What would you like to talk about?",
    "I have so many questions about the future. Can you tell me if any of my dreams came true?",
];

fn average(a: TraitScore, b: TraitScore) -> f64 {
    (a.get() as f64 + b.get() as f64) / 2.0
}

fn tone_style(profile: &PersonalityProfile) -> String {
    TONE_RULES
        .iter()
        .filter_map(|(field, high, low)| match profile.score(*field).band() {
            Band::High => Some(*high),
            Band::Low => Some(*low),
            Band::Middle => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn interest_topics(profile: &PersonalityProfile) -> Vec<String> {
    TOPIC_GROUPS
        .iter()
        .filter(|(field, _)| profile.score(*field).at_least_neutral())
        .flat_map(|(_, topics)| topics.iter().map(|t| t.to_string()))
        .collect()
}

fn conversation_starters(profile: &PersonalityProfile) -> Vec<String> {
    let mut starters: Vec<String> = BASE_STARTERS.iter().map(|s| s.to_string()).collect();
    starters.extend(
        profile
            .memories
            .iter()
            .map(|memory| format!("I was just thinking about {memory}. Do you still remember that?")),
    );
    starters.extend(
        profile
            .aspirations
            .iter()
            .map(|aspiration| format!("I really want to {aspiration}. Did I ever get to do that?")),
    );
    starters
}

/// Map a profile onto its persona. Pure and total.
pub fn derive_persona(profile: &PersonalityProfile) -> PersonaConfig {
    PersonaConfig {
        tone_style: tone_style(profile),
        language_complexity: LanguageComplexity::from_average(average(
            profile.openness,
            profile.conscientiousness,
        )),
        emotional_expression: EmotionalExpression::from_average(average(
            profile.extraversion,
            profile.neuroticism,
        )),
        interest_topics: interest_topics(profile),
        memories: profile.memories.clone(),
        aspirations: profile.aspirations.clone(),
        fears: profile.fears.clone(),
        personality_description: describe(profile),
        conversation_starters: conversation_starters(profile),
    }
}
