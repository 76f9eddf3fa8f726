//! Set-based derivation of `identities` and `profiles` from raw storage.
//! Both statements are conflict-ignoring, so re-running them is a no-op.
use sqlx::PgPool;
use tracing::debug;

/// Key is the text concatenation of the external id's name and value; CONCAT
/// treats a missing part as empty, so records without an external id collapse
/// onto the empty key. Scan order is unspecified, first write wins.
const DERIVE_IDENTITIES: &str = r#"
INSERT INTO identities (id, username)
SELECT
    CONCAT(data->'id'->>'name', data->'id'->>'value'),
    data->'login'->>'username'
FROM api_results
ON CONFLICT (id) DO NOTHING
"#;

/// One candidate row per distinct derived key. The dob string is ISO 8601
/// with millisecond fractions; the timestamptz cast parses it natively. The
/// zip column sources from location.postcode, the field the API actually has.
const DERIVE_PROFILES: &str = r#"
INSERT INTO profiles (identity_id, date_of_birth, gender, state, city, zip, picture_url, cell)
SELECT DISTINCT ON (CONCAT(data->'id'->>'name', data->'id'->>'value'))
    CONCAT(data->'id'->>'name', data->'id'->>'value'),
    (data->'dob'->>'date')::timestamptz,
    data->>'gender',
    data->'location'->>'state',
    data->'location'->>'city',
    data->'location'->>'postcode',
    data->'picture'->>'large',
    data->>'cell'
FROM api_results
ON CONFLICT (identity_id) DO NOTHING
"#;

pub async fn derive_identities(pool: &PgPool) -> Result<u64, String> {
    let res = sqlx::query(DERIVE_IDENTITIES)
        .execute(pool)
        .await
        .map_err(|e| format!("derive identities: {e}"))?;
    debug!(rows = res.rows_affected(), "Derived identities");
    Ok(res.rows_affected())
}

pub async fn derive_profiles(pool: &PgPool) -> Result<u64, String> {
    let res = sqlx::query(DERIVE_PROFILES)
        .execute(pool)
        .await
        .map_err(|e| format!("derive profiles: {e}"))?;
    debug!(rows = res.rows_affected(), "Derived profiles");
    Ok(res.rows_affected())
}
