//! Repository abstraction for the three tables: raw storage, identities,
//! profiles.
use serde_json::Value;

#[async_trait::async_trait]
pub trait Repo: Send + Sync {
    /// Ensures the three tables exist. Idempotent.
    async fn migrate(&self) -> Result<(), String>;

    /// Bulk-inserts one raw document per row into raw storage and returns the
    /// number of rows written. An empty batch writes nothing.
    async fn insert_raw_batch(&self, users: &[Value]) -> Result<u64, String>;

    /// Derives identity rows from raw storage, skipping conflicting keys.
    /// Returns rows actually inserted.
    async fn derive_identities(&self) -> Result<u64, String>;

    /// Derives profile rows from raw storage, one per distinct identity key,
    /// skipping conflicts. Must run after `derive_identities` so the foreign
    /// key resolves. Returns rows actually inserted.
    async fn derive_profiles(&self) -> Result<u64, String>;
}
