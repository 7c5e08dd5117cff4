use anyhow::Result;
use serde_json::Value;

pub const SUBMISSIONS: &str = "submissions";
pub const FLAGS: &str = "flags";

/// Outcome of a conditional update.
///
/// `StatusMismatch` carries the status actually stored so the caller can
/// report what the record already transitioned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    StatusMismatch(String),
}

/// Keyed JSON document storage with status-filtered queries.
///
/// Every handler in the pipeline goes through this trait; the backing engine
/// (Postgres in production, in-memory for development and tests) is chosen at
/// startup. `update_if_status` is the single mechanism that keeps moderation
/// transitions one-shot: the patch applies only while the stored `status`
/// field still equals the expected value, in one atomic step.
#[axum::async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> Result<()>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Inserts a new record. A key collision is an error, never an overwrite.
    async fn put(&self, collection: &str, id: &str, record: Value) -> Result<()>;

    async fn query_by_status(&self, collection: &str, status: &str) -> Result<Vec<(String, Value)>>;

    /// Merges `patch` into the stored record, but only while the record's
    /// `status` field equals `expected_status`.
    async fn update_if_status(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
        expected_status: &str,
    ) -> Result<UpdateOutcome>;
}
