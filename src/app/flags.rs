use anyhow::{anyhow, Result};
use serde_json::Value;
use std::sync::Arc;
use time::OffsetDateTime;

use crate::domain::flag::{Flag, FlagReason, FlagStatus};
use crate::infra::store::{Store, FLAGS};

#[derive(Clone)]
pub struct FlagService {
    store: Arc<dyn Store>,
}

impl FlagService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Persists a validated flag body in `pending` state and returns the
    /// derived identifier `flag_<activityId>_<millis>`.
    pub async fn flag(&self, body: &Value) -> Result<String> {
        let activity_id = body
            .get("activityId")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("flag body missing activityId"))?;
        let activity_name = body
            .get("activityName")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("flag body missing activityName"))?;
        let reason = body
            .get("reason")
            .and_then(Value::as_str)
            .and_then(FlagReason::parse)
            .ok_or_else(|| anyhow!("flag body has invalid reason"))?;

        let now = OffsetDateTime::now_utc();
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        let id = format!("flag_{}_{}", activity_id, millis);

        let flag = Flag {
            activity_id: activity_id.to_string(),
            activity_name: activity_name.to_string(),
            reason,
            details: body
                .get("details")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            status: FlagStatus::Pending,
            flagged_at: now,
            resolved_at: None,
            resolution_notes: None,
        };

        self.store.put(FLAGS, &id, serde_json::to_value(&flag)?).await?;
        Ok(id)
    }
}
