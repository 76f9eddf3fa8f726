//! Postgres-backed repository implementing raw storage and normalization.
mod connection;
mod migrations;
mod normalize;
mod raw_results;

use chrono_tz::Tz;
use serde_json::Value;
use sqlx::PgPool;

use crate::domain::model::PostgresConfig;
use crate::ports::repo::Repo;

pub struct PostgresRepo {
    pool: PgPool,
}

impl PostgresRepo {
    pub async fn new(cfg: &PostgresConfig, timezone: &Tz) -> Result<Self, String> {
        let pool = connection::create_pool(cfg, timezone).await?;
        Ok(Self { pool })
    }
}

pub async fn wipe_database(cfg: &PostgresConfig, timezone: &Tz) -> Result<(), String> {
    connection::wipe_database(cfg, timezone).await
}

#[async_trait::async_trait]
impl Repo for PostgresRepo {
    async fn migrate(&self) -> Result<(), String> {
        migrations::migrate(&self.pool).await
    }

    async fn insert_raw_batch(&self, users: &[Value]) -> Result<u64, String> {
        raw_results::insert_raw_batch(&self.pool, users).await
    }

    async fn derive_identities(&self) -> Result<u64, String> {
        normalize::derive_identities(&self.pool).await
    }

    async fn derive_profiles(&self) -> Result<u64, String> {
        normalize::derive_profiles(&self.pool).await
    }
}
