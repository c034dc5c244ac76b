// src/responder/canned.rs

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::debug;

use super::{seeded_rng, ResponseSource};
use crate::persona::{pick_index, PersonaConfig};

pub const CANNED_REPLIES: [&str; 6] = [
    "That's really interesting! I've always wondered what my future would be like.",
    "I'm still trying to figure things out. What advice would you give to your younger self?",
    "I remember thinking about that a lot when I was younger. How did things turn out for you?",
    "That's not what I expected to hear about my future! Tell me more.",
    "I have so many questions about what happens next in my life. Did I achieve my dreams?",
    "It's strange talking to my future self. What's the most important lesson you've learned since you were my age?",
];

/// Ignores the message and persona; picks a fixed reply after a simulated pause.
pub struct CannedResponder {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl CannedResponder {
    pub fn new(delay: Duration, seed: Option<u64>) -> Self {
        Self {
            delay,
            rng: Mutex::new(seeded_rng(seed)),
        }
    }
}

#[async_trait]
impl ResponseSource for CannedResponder {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn reply(&self, _persona: &PersonaConfig, _message: &str) -> Result<String> {
        if !self.delay.is_zero() {
            debug!("Simulating {}ms response delay", self.delay.as_millis());
            tokio::time::sleep(self.delay).await;
        }

        let index = {
            let mut rng = self.rng.lock().await;
            pick_index(&mut *rng, CANNED_REPLIES.len())
        };
        Ok(CANNED_REPLIES[index].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::derive_persona;
    use crate::profile::PersonalityProfile;

    #[tokio::test]
    async fn test_replies_come_from_table() {
        let responder = CannedResponder::new(Duration::ZERO, Some(11));
        let persona = derive_persona(&PersonalityProfile::default());

        for _ in 0..25 {
            let reply = responder.reply(&persona, "anything").await.unwrap();
            assert!(CANNED_REPLIES.contains(&reply.as_str()));
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_sequence() {
        let persona = derive_persona(&PersonalityProfile::default());
        let a = CannedResponder::new(Duration::ZERO, Some(5));
        let b = CannedResponder::new(Duration::ZERO, Some(5));

        for _ in 0..10 {
            assert_eq!(
                a.reply(&persona, "hi").await.unwrap(),
                b.reply(&persona, "hi").await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_delay_is_applied() {
        let responder = CannedResponder::new(Duration::from_millis(30), Some(1));
        let persona = derive_persona(&PersonalityProfile::default());

        let start = std::time::Instant::now();
        responder.reply(&persona, "hi").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
