use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::infra::store::{Store, SUBMISSIONS};

#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn Store>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Persists a validated submission body in `pending` state and returns
    /// the derived identifier, which doubles as the store key.
    pub async fn submit(&self, mut body: Value) -> Result<String> {
        let now = OffsetDateTime::now_utc();
        let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
        let id = submission_id(name, now);

        if let Some(record) = body.as_object_mut() {
            record.insert("status".to_string(), json!("pending"));
            record.insert("submittedAt".to_string(), json!(now.format(&Rfc3339)?));
        }

        self.store.put(SUBMISSIONS, &id, body).await?;
        Ok(id)
    }
}

/// Lower-cases the name, collapses every run of non-alphanumeric characters
/// to a single hyphen, trims hyphens at both ends, and truncates to 30
/// characters.
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    for ch in name.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').chars().take(30).collect()
}

fn submission_id(name: &str, now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    format!("{}_{}", slugify(name), millis)
}
