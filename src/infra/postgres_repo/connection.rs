//! Pool setup for the target database, creating it on first run if absent.
use chrono_tz::Tz;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tracing::info;

use crate::domain::model::PostgresConfig;

// The pipeline is single-flight; a couple of connections cover the whole run.
const POOL_SIZE: u32 = 4;

pub async fn create_pool(cfg: &PostgresConfig, timezone: &Tz) -> Result<PgPool, String> {
    match connect(cfg, &cfg.database, timezone).await {
        Ok(pool) => Ok(pool),
        Err(e) if is_database_missing(&e) => {
            create_database(cfg).await?;
            connect(cfg, &cfg.database, timezone)
                .await
                .map_err(|e| format!("postgres connect error after create: {e}"))
        }
        Err(e) => Err(format!("postgres connect error: {e}")),
    }
}

pub async fn wipe_database(cfg: &PostgresConfig, timezone: &Tz) -> Result<(), String> {
    let pool = create_pool(cfg, timezone).await?;
    sqlx::query("DROP SCHEMA public CASCADE")
        .execute(&pool)
        .await
        .map_err(|e| format!("postgres drop schema error: {e}"))?;
    sqlx::query("CREATE SCHEMA public")
        .execute(&pool)
        .await
        .map_err(|e| format!("postgres create schema error: {e}"))?;
    Ok(())
}

async fn connect(cfg: &PostgresConfig, database: &str, timezone: &Tz) -> Result<PgPool, sqlx::Error> {
    let opts = PgConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.password)
        .database(database);

    let tz_name = timezone.name().to_string();
    PgPoolOptions::new()
        .max_connections(POOL_SIZE)
        .after_connect(move |conn, _meta| {
            let tz = tz_name.clone();
            Box::pin(async move {
                // SET TIME ZONE takes no bind params; embed the literal safely.
                let stmt = format!("SET TIME ZONE '{}'", tz.replace('\'', "''"));
                sqlx::query(&stmt).execute(conn).await?;
                Ok(())
            })
        })
        .connect_with(opts)
        .await
}

async fn create_database(cfg: &PostgresConfig) -> Result<(), String> {
    validate_db_name(&cfg.database)?;
    info!(db = %cfg.database, "Target database missing, creating it");

    let admin = connect(cfg, "postgres", &chrono_tz::UTC)
        .await
        .map_err(|e| format!("postgres connect error (admin db): {e}"))?;

    let ddl = format!("CREATE DATABASE \"{}\"", &cfg.database);
    match sqlx::query(&ddl).execute(&admin).await {
        Ok(_) => Ok(()),
        // 42P04: someone else created it between our connect and now.
        Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("42P04") => Ok(()),
        Err(e) => Err(format!("postgres create database error: {e}")),
    }
}

// 3D000 is invalid_catalog_name: the database does not exist.
fn is_database_missing(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("3D000"))
}

fn validate_db_name(name: &str) -> Result<(), String> {
    if name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(())
    } else {
        Err(format!("postgres database name '{name}' contains unsupported characters"))
    }
}
