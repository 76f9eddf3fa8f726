//! Schema initialization for Postgres: creates the three tables if missing.
use sqlx::PgPool;
use tracing::info;

const POSTGRES_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/res/sql/postgres/schema.sql"
));

pub async fn migrate(pool: &PgPool) -> Result<(), String> {
    info!("Schema init start");

    for ddl in chunk_statements(POSTGRES_SCHEMA) {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .map_err(|e| format!("schema init (ddl): {e}"))?;
    }

    info!("Schema init done");
    Ok(())
}

fn chunk_statements(schema: &str) -> impl Iterator<Item = &str> {
    schema.split(';').map(str::trim).filter(|s| !s.is_empty())
}
