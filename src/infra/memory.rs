use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::infra::store::{Store, UpdateOutcome};

/// In-memory document store for development and hermetic tests.
///
/// `update_if_status` holds the write lock across the status check and the
/// patch, giving it the same atomicity as the Postgres backend's conditional
/// UPDATE.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<(String, String), Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[axum::async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let records = self.records.read().await;
        Ok(records.get(&(collection.to_string(), id.to_string())).cloned())
    }

    async fn put(&self, collection: &str, id: &str, record: Value) -> Result<()> {
        let mut records = self.records.write().await;
        let key = (collection.to_string(), id.to_string());
        if records.contains_key(&key) {
            return Err(anyhow!("key collision in {}: {}", collection, id));
        }
        records.insert(key, record);
        Ok(())
    }

    async fn query_by_status(&self, collection: &str, status: &str) -> Result<Vec<(String, Value)>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|((coll, _), record)| {
                coll == collection && record.get("status").and_then(Value::as_str) == Some(status)
            })
            .map(|((_, id), record)| (id.clone(), record.clone()))
            .collect())
    }

    async fn update_if_status(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
        expected_status: &str,
    ) -> Result<UpdateOutcome> {
        let mut records = self.records.write().await;
        let key = (collection.to_string(), id.to_string());
        let Some(record) = records.get_mut(&key) else {
            return Ok(UpdateOutcome::NotFound);
        };

        let current = record
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if current != expected_status {
            return Ok(UpdateOutcome::StatusMismatch(current.to_string()));
        }

        if let (Some(target), Some(fields)) = (record.as_object_mut(), patch.as_object()) {
            for (field, value) in fields {
                target.insert(field.clone(), value.clone());
            }
        }
        Ok(UpdateOutcome::Updated)
    }
}
