// src/state.rs

use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::YouYoungConfig;
use crate::identity::{ProofVerifier, WorldIdClient};
use crate::responder::{build_responder, ResponseSource};
use crate::services::ChatService;
use crate::store::SqliteStore;

#[derive(Clone)]
pub struct AppState {
    // -------- Storage --------
    pub store: SqliteStore,

    // -------- Collaborators --------
    pub verifier: Arc<dyn ProofVerifier>,

    // -------- Services --------
    pub chat_service: Arc<ChatService>,

    pub config: YouYoungConfig,
}

impl AppState {
    pub fn new(
        store: SqliteStore,
        verifier: Arc<dyn ProofVerifier>,
        responder: Arc<dyn ResponseSource>,
        config: &YouYoungConfig,
    ) -> Self {
        let chat_service = Arc::new(ChatService::new(store.clone(), responder, config.seed));
        Self {
            store,
            verifier,
            chat_service,
            config: config.clone(),
        }
    }
}

/// Production wiring: World ID over HTTPS and the configured responder.
pub fn create_app_state(pool: SqlitePool, config: &YouYoungConfig) -> Result<Arc<AppState>> {
    let verifier = Arc::new(WorldIdClient::new(
        config.world_id_base_url.clone(),
        config.world_app_id.clone(),
        config.world_id_timeout(),
    )?);
    let responder = build_responder(config.responder, config.response_delay(), config.seed);

    Ok(Arc::new(AppState::new(
        SqliteStore::new(pool),
        verifier,
        responder,
        config,
    )))
}
