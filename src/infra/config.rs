//! Loads the TOML configuration file and normalizes it into `AppConfig`.
//! Every key has a default, so an empty file is a valid config.
use std::path::Path;

use chrono_tz::Tz;
use serde::Deserialize;
use tokio::fs;

use crate::domain::model::{ApiConfig, AppConfig, AppMode, PostgresConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Default)]
struct RawFile {
    #[serde(default)]
    app: RawApp,
    #[serde(default)]
    api: RawApi,
    #[serde(default)]
    postgres: RawPostgres,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Debug, Deserialize, Default)]
struct RawApp {
    mode: Option<String>,
    timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawApi {
    #[serde(default = "default_api_url")]
    url: String,
    #[serde(default = "default_batch_size")]
    batch_size: u64,
    #[serde(default = "default_user_agent")]
    user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct RawPostgres {
    #[serde(default = "default_pg_user")]
    user: String,
    #[serde(default = "default_pg_password")]
    password: String,
    #[serde(default = "default_pg_host")]
    host: String,
    #[serde(default = "default_pg_port")]
    port: u16,
    #[serde(default = "default_pg_database")]
    db: String,
}

#[derive(Debug, Deserialize, Default)]
struct RawLogging {
    level: Option<String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub async fn load(config_path: &Path) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(config_path).await?;
        let raw: RawFile = toml::from_str(&content)?;

        let mode = parse_mode(raw.app.mode.as_deref())?;
        let tz_str = raw
            .app
            .timezone
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("UTC");
        let timezone: Tz = tz_str
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid timezone '{tz_str}'")))?;

        let api = raw.api;
        if api.url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.url cannot be empty".into()));
        }
        if api.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_seconds must be at least 1".into(),
            ));
        }

        let log_level = normalize_log_level(raw.logging.level.as_deref())?;

        Ok(AppConfig {
            api: ApiConfig {
                url: api.url,
                batch_size: api.batch_size,
                user_agent: api.user_agent,
                timeout_seconds: api.timeout_seconds,
            },
            postgres: PostgresConfig {
                user: raw.postgres.user,
                password: raw.postgres.password,
                host: raw.postgres.host,
                port: raw.postgres.port,
                database: raw.postgres.db,
            },
            log_level,
            mode,
            timezone,
        })
    }
}

fn parse_mode(s: Option<&str>) -> Result<AppMode, ConfigError> {
    match s.map(|x| x.to_ascii_lowercase()) {
        None => Ok(AppMode::Prod),
        Some(m) if m == "prod" => Ok(AppMode::Prod),
        Some(m) if m == "dev" => Ok(AppMode::Dev),
        Some(other) => Err(ConfigError::Invalid(format!(
            "invalid app.mode '{other}', expected 'dev' or 'prod'"
        ))),
    }
}

fn normalize_log_level(level: Option<&str>) -> Result<String, ConfigError> {
    let l = level.unwrap_or("info").trim().to_ascii_lowercase();
    match l.as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => Ok(l),
        _ => Err(ConfigError::Invalid(format!(
            "invalid logging.level '{}', expected error|warn|info|debug|trace",
            level.unwrap_or_default()
        ))),
    }
}

fn default_api_url() -> String {
    "https://randomuser.me/api/".to_string()
}

fn default_batch_size() -> u64 {
    5000
}

fn default_user_agent() -> String {
    "randpop/0.1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_pg_user() -> String {
    "admin".to_string()
}

fn default_pg_password() -> String {
    "admin".to_string()
}

fn default_pg_host() -> String {
    "localhost".to_string()
}

fn default_pg_port() -> u16 {
    5432
}

fn default_pg_database() -> String {
    "random_user_sample".to_string()
}

impl Default for RawApi {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            batch_size: default_batch_size(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for RawPostgres {
    fn default() -> Self {
        Self {
            user: default_pg_user(),
            password: default_pg_password(),
            host: default_pg_host(),
            port: default_pg_port(),
            db: default_pg_database(),
        }
    }
}
