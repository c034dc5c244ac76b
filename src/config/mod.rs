// src/config/mod.rs
// All settings come from the environment (after loading .env), with defaults.

use once_cell::sync::Lazy;
use std::str::FromStr;
use std::time::Duration;

use crate::responder::ResponderKind;

#[derive(Debug, Clone)]
pub struct YouYoungConfig {
    // ── Server
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub cors_origin: String,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── World ID
    pub world_app_id: String,
    pub world_id_base_url: String,
    pub world_id_timeout_secs: u64,

    // ── Chat
    pub responder: ResponderKind,
    pub response_delay_ms: u64,
    pub seed: Option<u64>,
    pub history_default_limit: u32,
    pub history_max_limit: u32,
}

/// Strip trailing `# comments` and whitespace from a raw env value.
fn clean(raw: &str) -> &str {
    raw.split('#').next().unwrap_or("").trim()
}

fn env_var_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => match clean(&val).parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                default
            }
        },
        None => default,
    }
}

impl YouYoungConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: env_var_or(&lookup, "HOST", "0.0.0.0".to_string()),
            port: env_var_or(&lookup, "PORT", 5000),
            environment: env_var_or(&lookup, "YOUYOUNG_ENV", "development".to_string()),
            log_level: env_var_or(&lookup, "YOUYOUNG_LOG_LEVEL", "info".to_string()),
            cors_origin: env_var_or(&lookup, "CORS_ORIGIN", "*".to_string()),

            database_url: env_var_or(&lookup, "DATABASE_URL", "sqlite:./youyoung.db".to_string()),
            sqlite_max_connections: env_var_or(&lookup, "SQLITE_MAX_CONNECTIONS", 5),

            world_app_id: env_var_or(&lookup, "WORLD_APP_ID", "app_staging_youyoung".to_string()),
            world_id_base_url: env_var_or(
                &lookup,
                "WORLD_ID_BASE_URL",
                "https://developer.worldcoin.org".to_string(),
            ),
            world_id_timeout_secs: env_var_or(&lookup, "WORLD_ID_TIMEOUT_SECS", 10),

            responder: env_var_or(&lookup, "YOUYOUNG_RESPONDER", ResponderKind::Keyword),
            response_delay_ms: env_var_or(&lookup, "YOUYOUNG_RESPONSE_DELAY_MS", 500),
            seed: lookup("YOUYOUNG_SEED").and_then(|v| clean(&v).parse().ok()),
            history_default_limit: env_var_or(&lookup, "HISTORY_DEFAULT_LIMIT", 50),
            history_max_limit: env_var_or(&lookup, "HISTORY_MAX_LIMIT", 100),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn world_id_timeout(&self) -> Duration {
        Duration::from_secs(self.world_id_timeout_secs)
    }

    /// Requested page size, defaulted and clamped to `1..=history_max_limit`.
    pub fn history_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.history_default_limit)
            .clamp(1, self.history_max_limit.max(1))
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl Default for YouYoungConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

pub static CONFIG: Lazy<YouYoungConfig> = Lazy::new(YouYoungConfig::from_env);
