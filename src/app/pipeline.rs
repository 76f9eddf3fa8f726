//! The ETL run: schema init, one bulk fetch, raw load, then the two
//! normalization passes. Strictly sequential; any stage error aborts the run.
use std::collections::HashSet;
use std::time::Instant;

use serde_json::Value;
use tracing::{info, warn};

use crate::app::context::AppContext;
use crate::domain::model::RunSummary;
use crate::domain::record;
use crate::ports::{http::UserApi, repo::Repo};

pub struct Pipeline;

impl Pipeline {
    pub async fn run<R, H>(ctx: &AppContext<R, H>) -> Result<RunSummary, String>
    where
        R: Repo,
        H: UserApi,
    {
        let run_started = Instant::now();

        let started = Instant::now();
        ctx.repo.migrate().await?;
        info!(elapsed_ms = started.elapsed().as_millis() as u64, "Schema ready");

        let started = Instant::now();
        let users = ctx
            .http
            .fetch_users(ctx.cfg.api.batch_size)
            .await
            .map_err(|e| format!("fetch users: {e}"))?;
        info!(
            requested = ctx.cfg.api.batch_size,
            fetched = users.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Fetched user batch"
        );
        scan_batch(&users);

        let started = Instant::now();
        let raw_inserted = ctx.repo.insert_raw_batch(&users).await?;
        info!(
            rows = raw_inserted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Raw load done"
        );

        let started = Instant::now();
        let identities_inserted = ctx.repo.derive_identities().await?;
        let profiles_inserted = ctx.repo.derive_profiles().await?;
        info!(
            identities = identities_inserted,
            profiles = profiles_inserted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Normalize done"
        );

        let summary = RunSummary {
            fetched: users.len(),
            raw_inserted,
            identities_inserted,
            profiles_inserted,
        };
        info!(
            fetched = summary.fetched,
            raw = summary.raw_inserted,
            identities = summary.identities_inserted,
            profiles = summary.profiles_inserted,
            total_ms = run_started.elapsed().as_millis() as u64,
            "Run complete"
        );
        Ok(summary)
    }
}

/// Surfaces batch anomalies before they reach the database: records without
/// an external id all collapse onto the empty identity key, and malformed dob
/// strings would abort the profile derivation statement.
fn scan_batch(users: &[Value]) {
    let missing_external_id = users
        .iter()
        .filter(|u| !record::has_external_id(u))
        .count();
    if missing_external_id > 0 {
        warn!(
            records = missing_external_id,
            "Records without an external id share one identity key"
        );
    }

    let malformed_dob = users
        .iter()
        .filter(|u| !record::dob_is_well_formed(u))
        .count();
    if malformed_dob > 0 {
        warn!(records = malformed_dob, "Records with unparseable dob date");
    }

    let distinct_keys: HashSet<String> = users.iter().map(record::identity_key).collect();
    if distinct_keys.len() < users.len() {
        info!(
            duplicates = users.len() - distinct_keys.len(),
            "Batch contains duplicate identity keys; conflicts will be skipped"
        );
    }
}
