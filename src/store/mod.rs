// src/store/mod.rs
// SQLite persistence for verified users, their profiles, and chat history.
// Timestamps are stored as unix milliseconds.

pub mod migration;
pub mod types;

pub use migration::run_migrations;
pub use types::{ChatMessage, Sender, User};

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::profile::PersonalityProfile;

/// Open a pool, creating the database file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {database_url}"))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .context("Failed to connect to SQLite")
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or_else(|| anyhow!("Timestamp out of range: {ms}"))
}

/// Exclusive paging position in a user's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCursor {
    timestamp: i64,
    rowid: i64,
}

impl HistoryCursor {
    /// Everything stored before `at`, regardless of insertion order.
    pub fn before_time(at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.timestamp_millis(),
            rowid: i64::MIN,
        }
    }
}

#[derive(Clone)]
pub struct SqliteStore {
    pub pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: &SqliteRow) -> Result<User> {
        let profile = row
            .try_get::<Option<String>, _>("profile")?
            .map(|json| serde_json::from_str::<PersonalityProfile>(&json))
            .transpose()
            .context("Corrupt stored profile")?;

        Ok(User {
            nullifier_hash: row.try_get("nullifier_hash")?,
            is_verified: row.try_get("is_verified")?,
            profile,
            created_at: from_millis(row.try_get("created_at")?)?,
            updated_at: from_millis(row.try_get("updated_at")?)?,
        })
    }

    fn message_from_row(row: &SqliteRow) -> Result<ChatMessage> {
        let sender: String = row.try_get("sender")?;
        Ok(ChatMessage {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            sender: Sender::from_str(&sender).map_err(|e| anyhow!(e))?,
            content: row.try_get("content")?,
            timestamp: from_millis(row.try_get("timestamp")?)?,
        })
    }

    /// Insert the user or update its verification flag; returns the stored record.
    pub async fn upsert_user(&self, nullifier_hash: &str, is_verified: bool) -> Result<User> {
        let now = Utc::now().timestamp_millis();

        sqlx::query(
            r#"
            INSERT INTO users (nullifier_hash, is_verified, profile, created_at, updated_at)
            VALUES (?, ?, NULL, ?, ?)
            ON CONFLICT(nullifier_hash) DO UPDATE SET
                is_verified = excluded.is_verified,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(nullifier_hash)
        .bind(is_verified)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to upsert user")?;

        self.get_user(nullifier_hash)
            .await?
            .ok_or_else(|| anyhow!("User {nullifier_hash} missing after upsert"))
    }

    pub async fn mark_verified(&self, nullifier_hash: &str) -> Result<User> {
        debug!("Marking {} as verified", nullifier_hash);
        self.upsert_user(nullifier_hash, true).await
    }

    pub async fn get_user(&self, nullifier_hash: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT nullifier_hash, is_verified, profile, created_at, updated_at
            FROM users
            WHERE nullifier_hash = ?
            "#,
        )
        .bind(nullifier_hash)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user")?;

        row.as_ref().map(Self::user_from_row).transpose()
    }

    /// Replace the stored profile. Returns false when the user does not exist.
    pub async fn save_profile(&self, nullifier_hash: &str, profile: &PersonalityProfile) -> Result<bool> {
        let json = serde_json::to_string(profile)?;

        let result = sqlx::query("UPDATE users SET profile = ?, updated_at = ? WHERE nullifier_hash = ?")
            .bind(json)
            .bind(Utc::now().timestamp_millis())
            .bind(nullifier_hash)
            .execute(&self.pool)
            .await
            .context("Failed to save profile")?;

        Ok(result.rows_affected() > 0)
    }

    fn new_message(user_id: &str, sender: Sender, content: &str) -> ChatMessage {
        // millisecond precision, matching what history() reads back
        let now = Utc::now();
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            sender,
            content: content.to_string(),
            timestamp: DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now),
        }
    }

    async fn insert_message(conn: &mut SqliteConnection, message: &ChatMessage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, user_id, sender, content, timestamp)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.id)
        .bind(&message.user_id)
        .bind(message.sender.to_string())
        .bind(&message.content)
        .bind(message.timestamp.timestamp_millis())
        .execute(conn)
        .await
        .context("Failed to store chat message")?;
        Ok(())
    }

    pub async fn append_message(&self, user_id: &str, sender: Sender, content: &str) -> Result<ChatMessage> {
        let message = Self::new_message(user_id, sender, content);
        let mut conn = self.pool.acquire().await?;
        Self::insert_message(&mut conn, &message).await?;
        Ok(message)
    }

    /// Store a user message and its reply atomically, user first.
    pub async fn append_exchange(
        &self,
        user_id: &str,
        user_content: &str,
        ai_content: &str,
    ) -> Result<(ChatMessage, ChatMessage)> {
        let user_message = Self::new_message(user_id, Sender::User, user_content);
        let ai_message = Self::new_message(user_id, Sender::Ai, ai_content);

        let mut tx = self.pool.begin().await?;
        Self::insert_message(&mut tx, &user_message).await?;
        Self::insert_message(&mut tx, &ai_message).await?;
        tx.commit().await.context("Failed to commit chat exchange")?;

        Ok((user_message, ai_message))
    }

    /// Paging position of one of the user's messages.
    pub async fn cursor_for_message(&self, user_id: &str, message_id: &str) -> Result<Option<HistoryCursor>> {
        let row = sqlx::query("SELECT timestamp, rowid AS position FROM chat_messages WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(message_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to resolve history cursor")?;

        row.map(|row| -> Result<HistoryCursor> {
            Ok(HistoryCursor {
                timestamp: row.try_get("timestamp")?,
                rowid: row.try_get("position")?,
            })
        })
        .transpose()
    }

    /// Newest first, ordered by (timestamp, rowid). Only rows strictly older
    /// than `before` are returned.
    pub async fn history(
        &self,
        user_id: &str,
        limit: u32,
        before: Option<HistoryCursor>,
    ) -> Result<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, sender, content, timestamp
            FROM chat_messages
            WHERE user_id = ?
              AND (? IS NULL OR timestamp < ? OR (timestamp = ? AND rowid < ?))
            ORDER BY timestamp DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(before.map(|c| c.timestamp))
        .bind(before.map(|c| c.timestamp))
        .bind(before.map(|c| c.timestamp))
        .bind(before.map(|c| c.rowid))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch chat history")?;

        rows.iter().map(Self::message_from_row).collect()
    }
}
