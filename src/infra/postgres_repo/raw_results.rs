//! Bulk insert of raw user documents into `api_results`.
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

/// One round-trip for the whole batch: the records travel as a single JSONB
/// array parameter and fan out to one row each. The statement is atomic, so
/// a failed batch leaves no partial rows behind.
pub async fn insert_raw_batch(pool: &PgPool, users: &[Value]) -> Result<u64, String> {
    if users.is_empty() {
        return Ok(0);
    }

    let batch = Value::Array(users.to_vec());
    let res = sqlx::query(
        r#"
      INSERT INTO api_results (data)
      SELECT jsonb_array_elements($1::jsonb)
      "#,
    )
    .bind(&batch)
    .execute(pool)
    .await
    .map_err(|e| format!("insert raw batch: {e}"))?;

    debug!(rows = res.rows_affected(), "Inserted raw batch");
    Ok(res.rows_affected())
}
