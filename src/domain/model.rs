use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub url: String,
    pub batch_size: u64,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub postgres: PostgresConfig,
    pub log_level: String,
    pub mode: AppMode,
    pub timezone: Tz,
}

/// Coarse classification of fetch failures. All variants are fatal; the run
/// never retries.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("{0}")]
    Unexpected(String),
}

/// Row counts reported by a completed run, one field per pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub raw_inserted: u64,
    pub identities_inserted: u64,
    pub profiles_inserted: u64,
}
