// src/responder/mod.rs
// Pluggable source of raw chat replies. Formatting into the persona's voice
// happens downstream, so implementations return plain text.

pub mod canned;
pub mod keyword;

pub use canned::CannedResponder;
pub use keyword::KeywordResponder;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::persona::PersonaConfig;

/// Anything that can answer a chat message on behalf of a persona.
#[async_trait]
pub trait ResponseSource: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    async fn reply(&self, persona: &PersonaConfig, message: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderKind {
    Keyword,
    Canned,
}

impl std::fmt::Display for ResponderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResponderKind::Keyword => "keyword",
                ResponderKind::Canned => "canned",
            }
        )
    }
}

impl std::str::FromStr for ResponderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(ResponderKind::Keyword),
            "canned" => Ok(ResponderKind::Canned),
            _ => Err(format!("Invalid responder: {s}")),
        }
    }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Build the configured responder.
pub fn build_responder(kind: ResponderKind, delay: Duration, seed: Option<u64>) -> Arc<dyn ResponseSource> {
    match kind {
        ResponderKind::Keyword => Arc::new(KeywordResponder::new(seed)),
        ResponderKind::Canned => Arc::new(CannedResponder::new(delay, seed)),
    }
}
