// src/persona/format.rs
//! Rewrites outbound messages to match a persona: vocabulary first, then
//! emotional markers. All randomness comes from the caller's generator.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::{NoExpand, Regex};

use super::{pick_index, EmotionalExpression, LanguageComplexity, PersonaConfig};

// Order matters: each rule sees the output of the previous one.
const SIMPLIFY_TABLE: [(&str, &str); 5] = [
    ("utilize", "use"),
    ("commence", "start"),
    ("nevertheless", "still"),
    ("subsequently", "later"),
    ("approximately", "about"),
];

const ENHANCE_TABLE: [(&str, &str); 5] = [
    ("use", "utilize"),
    ("start", "commence"),
    ("still", "nevertheless"),
    ("later", "subsequently"),
    ("about", "approximately"),
];

pub const INTERJECTIONS: [&str; 4] = ["Wow, ", "Oh my gosh, ", "Seriously, ", "I can't believe it, "];

/// Draw above which every period becomes an exclamation mark.
const EXCLAIM_THRESHOLD: f64 = 0.7;
/// Draw above which an interjection is prepended.
const INTERJECT_THRESHOLD: f64 = 0.8;

static SIMPLIFY_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| compile(&SIMPLIFY_TABLE));
static ENHANCE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| compile(&ENHANCE_TABLE));

fn compile(table: &[(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    table
        .iter()
        .map(|(from, to)| {
            let pattern = format!(r"\b{}\b", regex::escape(from));
            (Regex::new(&pattern).expect("valid regex"), *to)
        })
        .collect()
}

fn apply_rules(text: &str, rules: &[(Regex, &'static str)]) -> String {
    rules.iter().fold(text.to_string(), |acc, (pattern, replacement)| {
        pattern.replace_all(&acc, NoExpand(replacement)).into_owned()
    })
}

/// Whole-word, case-sensitive swaps toward plainer words.
pub fn simplify_language(text: &str) -> String {
    apply_rules(text, &SIMPLIFY_RULES)
}

/// Whole-word, case-sensitive swaps toward fancier words.
pub fn enhance_language(text: &str) -> String {
    apply_rules(text, &ENHANCE_RULES)
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn add_emotional_markers<R: Rng>(text: &str, rng: &mut R) -> String {
    let mut text = text.to_string();

    if !text.contains('!') && rng.random::<f64>() > EXCLAIM_THRESHOLD {
        text = text.replace('.', "!");
    }

    if rng.random::<f64>() > INTERJECT_THRESHOLD {
        let interjection = INTERJECTIONS[pick_index(rng, INTERJECTIONS.len())];
        text = format!("{interjection}{}", lowercase_first(&text));
    }

    text
}

pub fn reduce_emotional_markers(text: &str) -> String {
    INTERJECTIONS
        .iter()
        .fold(text.replace('!', "."), |acc, interjection| acc.replace(interjection, ""))
}

/// Complexity transform, then expressiveness transform. Never mutates `raw`.
pub fn format_message<R: Rng>(raw: &str, config: &PersonaConfig, rng: &mut R) -> String {
    let text = match config.language_complexity {
        LanguageComplexity::Simple => simplify_language(raw),
        LanguageComplexity::Complex => enhance_language(raw),
        LanguageComplexity::Moderate => raw.to_string(),
    };

    match config.emotional_expression {
        EmotionalExpression::Expressive => add_emotional_markers(&text, rng),
        EmotionalExpression::Reserved => reduce_emotional_markers(&text),
        EmotionalExpression::Balanced => text,
    }
}
