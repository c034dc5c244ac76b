// src/services/chat.rs
// One chat turn: ask the responder, voice the reply through the persona
// formatter, then store the message and reply together.

use std::sync::Arc;

use anyhow::Result;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::persona::{derive_persona, format_message, PersonaConfig};
use crate::profile::PersonalityProfile;
use crate::responder::{seeded_rng, ResponseSource};
use crate::store::{ChatMessage, SqliteStore, User};

#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub user_message: ChatMessage,
    pub ai_message: ChatMessage,
}

pub struct ChatService {
    store: SqliteStore,
    responder: Arc<dyn ResponseSource>,
    rng: Mutex<StdRng>,
}

impl ChatService {
    pub fn new(store: SqliteStore, responder: Arc<dyn ResponseSource>, seed: Option<u64>) -> Self {
        Self {
            store,
            responder,
            rng: Mutex::new(seeded_rng(seed)),
        }
    }

    /// Persona for a user; users who skipped the questionnaire get the neutral profile.
    pub fn persona_for(&self, user: &User) -> PersonaConfig {
        match &user.profile {
            Some(profile) => derive_persona(profile),
            None => {
                debug!("No stored profile for {}, using defaults", user.nullifier_hash);
                derive_persona(&PersonalityProfile::default())
            }
        }
    }

    pub async fn greeting(&self, persona: &PersonaConfig) -> String {
        let mut rng = self.rng.lock().await;
        persona.greeting(&mut *rng)
    }

    pub async fn format(&self, raw: &str, persona: &PersonaConfig) -> String {
        let mut rng = self.rng.lock().await;
        format_message(raw, persona, &mut *rng)
    }

    #[instrument(skip(self, user, message), fields(user = %user.nullifier_hash))]
    pub async fn send(&self, user: &User, message: &str) -> Result<ChatExchange> {
        let persona = self.persona_for(user);
        let raw = self.responder.reply(&persona, message).await?;
        let reply = self.format(&raw, &persona).await;

        let (user_message, ai_message) = self
            .store
            .append_exchange(&user.nullifier_hash, message, &reply)
            .await?;

        info!(
            "Chat turn complete via {} responder ({} chars)",
            self.responder.name(),
            reply.len()
        );

        Ok(ChatExchange {
            user_message,
            ai_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{CannedResponder, KeywordResponder};
    use crate::store::Sender;
    use async_trait::async_trait;
    use crate::store::run_migrations;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::time::Duration;

    async fn store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("create in-memory sqlite");
        run_migrations(&pool).await.expect("run migrations");
        SqliteStore::new(pool)
    }

    #[tokio::test]
    async fn test_send_stores_both_sides() {
        let store = store().await;
        let user = store.mark_verified("0xabc").await.unwrap();
        let service = ChatService::new(
            store.clone(),
            Arc::new(CannedResponder::new(Duration::ZERO, Some(1))),
            Some(1),
        );

        let exchange = service.send(&user, "hello").await.unwrap();
        assert_eq!(exchange.user_message.content, "hello");
        assert_eq!(exchange.ai_message.sender, Sender::Ai);

        let history = store.history("0xabc", 10, None).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, exchange.ai_message.id);
        assert_eq!(history[1].id, exchange.user_message.id);
    }

    #[tokio::test]
    async fn test_reply_uses_stored_profile() {
        let store = store().await;
        store.mark_verified("0xabc").await.unwrap();
        let profile = PersonalityProfile {
            memories: vec!["the red bicycle".into()],
            ..Default::default()
        };
        store.save_profile("0xabc", &profile).await.unwrap();
        let user = store.get_user("0xabc").await.unwrap().unwrap();

        let service = ChatService::new(store, Arc::new(KeywordResponder::new(Some(2))), Some(2));
        let exchange = service.send(&user, "Do you remember?").await.unwrap();

        // neutral traits: moderate and balanced, so the reply is unformatted
        assert_eq!(
            exchange.ai_message.content,
            "Yes, I remember the red bicycle. That was such an important time for me."
        );
    }

    struct UnavailableResponder;

    #[async_trait]
    impl ResponseSource for UnavailableResponder {
        fn name(&self) -> &'static str {
            "unavailable"
        }

        async fn reply(&self, _persona: &PersonaConfig, _message: &str) -> Result<String> {
            Err(anyhow::anyhow!("backend offline"))
        }
    }

    #[tokio::test]
    async fn test_failed_reply_stores_nothing() {
        let store = store().await;
        let user = store.mark_verified("0xabc").await.unwrap();
        let service = ChatService::new(store.clone(), Arc::new(UnavailableResponder), None);

        assert!(service.send(&user, "hello?").await.is_err());
        assert!(store.history("0xabc", 10, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_profile_falls_back_to_default() {
        let store = store().await;
        let user = store.mark_verified("0xabc").await.unwrap();
        let service = ChatService::new(store, Arc::new(KeywordResponder::new(None)), None);

        assert_eq!(service.persona_for(&user), derive_persona(&PersonalityProfile::default()));
    }
}
