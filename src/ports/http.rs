//! User-source abstraction: one bulk request for a batch of raw records.
use serde_json::Value;

use crate::domain::model::FetchError;

#[async_trait::async_trait]
pub trait UserApi: Send + Sync {
    /// Fetches `count` synthetic user records in a single request and returns
    /// them unmodified. `count` of zero is valid and yields an empty batch.
    async fn fetch_users(&self, count: u64) -> Result<Vec<Value>, FetchError>;
}
