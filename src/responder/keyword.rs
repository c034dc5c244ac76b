// src/responder/keyword.rs
// Topic-aware replies: the user's message is scanned for a few keyword
// families and the persona's own memories, aspirations and fears are echoed back.

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use tokio::sync::Mutex;

use super::{seeded_rng, ResponseSource};
use crate::persona::{pick_index, PersonaConfig};

const MEMORY_KEYWORDS: [&str; 2] = ["remember", "when you were"];
const ASPIRATION_KEYWORDS: [&str; 3] = ["dream", "want to be", "aspire"];
const FEAR_KEYWORDS: [&str; 3] = ["afraid", "fear", "scary"];
const FUTURE_KEYWORDS: [&str; 3] = ["future", "grow up", "older"];

pub const FUTURE_REPLY: &str = "I'm really curious about what happens in the future. What's it like being older? Have things worked out the way I hoped?";

pub const DEFAULT_REPLIES: [&str; 4] = [
    "That's interesting to hear. Tell me more about your life now.",
    "I've been wondering about that too. What else has changed since I was younger?",
    "I'm still trying to figure things out. What advice would you give to your younger self?",
    "It's so strange talking to my future self. What's the most important thing you've learned since you were my age?",
];

fn mentions(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

fn pick<'a, R: Rng>(rng: &mut R, items: &'a [String]) -> Option<&'a str> {
    if items.is_empty() {
        return None;
    }
    items.get(pick_index(rng, items.len())).map(String::as_str)
}

/// Pure reply selection; a keyword family with an empty list falls through to the next.
pub fn keyword_reply<R: Rng>(persona: &PersonaConfig, message: &str, rng: &mut R) -> String {
    let lower = message.to_lowercase();

    if mentions(&lower, &MEMORY_KEYWORDS) {
        if let Some(memory) = pick(rng, &persona.memories) {
            return format!("Yes, I remember {memory}. That was such an important time for me.");
        }
    }

    if mentions(&lower, &ASPIRATION_KEYWORDS) {
        if let Some(aspiration) = pick(rng, &persona.aspirations) {
            return format!(
                "I really want to {aspiration}. It's my biggest dream right now. Did I ever achieve that?"
            );
        }
    }

    if mentions(&lower, &FEAR_KEYWORDS) {
        if let Some(fear) = pick(rng, &persona.fears) {
            return format!("I'm kind of afraid of {fear}. Does that ever go away?");
        }
    }

    if mentions(&lower, &FUTURE_KEYWORDS) {
        return FUTURE_REPLY.to_string();
    }

    DEFAULT_REPLIES[pick_index(rng, DEFAULT_REPLIES.len())].to_string()
}

pub struct KeywordResponder {
    rng: Mutex<StdRng>,
}

impl KeywordResponder {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: Mutex::new(seeded_rng(seed)),
        }
    }
}

#[async_trait]
impl ResponseSource for KeywordResponder {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn reply(&self, persona: &PersonaConfig, message: &str) -> Result<String> {
        let mut rng = self.rng.lock().await;
        Ok(keyword_reply(persona, message, &mut *rng))
    }
}
