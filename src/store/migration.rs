// src/store/migration.rs
//! Schema for users and chat messages. Run at startup; safe to repeat.

use anyhow::Result;
use sqlx::{Executor, SqlitePool};

/// One row per World ID nullifier hash. `profile` holds the PersonalityProfile as JSON.
const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    nullifier_hash TEXT PRIMARY KEY NOT NULL,
    is_verified BOOLEAN NOT NULL DEFAULT 0,
    profile TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// Timestamps are unix milliseconds.
const CREATE_CHAT_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS chat_messages (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL,
    sender TEXT NOT NULL CHECK (sender IN ('user', 'ai')),
    content TEXT NOT NULL,
    timestamp INTEGER NOT NULL
);
"#;

const CREATE_INDICES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_chat_messages_user_timestamp ON chat_messages(user_id, timestamp);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_USERS).await?;
    pool.execute(CREATE_CHAT_MESSAGES).await?;
    pool.execute(CREATE_INDICES).await?;
    Ok(())
}
