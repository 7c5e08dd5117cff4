use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::activity::Activity;
use crate::domain::submission::{Submission, SubmissionStatus};
use crate::infra::store::{Store, SUBMISSIONS};

/// Read-time merger of the static catalog asset and approved submissions.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
    catalog_path: PathBuf,
}

impl CatalogService {
    pub fn new(store: Arc<dyn Store>, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            catalog_path: catalog_path.into(),
        }
    }

    /// Returns the static catalog followed by every approved submission.
    ///
    /// A store failure degrades to the static list alone; only an unreadable
    /// static asset is an error.
    pub async fn list_published(&self) -> Result<Vec<Activity>> {
        let mut activities = self.load_static().await?;

        match self.store.query_by_status(SUBMISSIONS, SubmissionStatus::Approved.as_str()).await {
            Ok(rows) => {
                for (id, record) in rows {
                    match serde_json::from_value::<Submission>(record) {
                        Ok(submission) => activities.push(submission.into_activity(&id)),
                        Err(err) => {
                            tracing::warn!(submission_id = %id, error = %err, "skipping malformed approved submission");
                        }
                    }
                }
            }
            Err(err) => {
                tracing::error!(error = ?err, "store query failed; serving static catalog only");
            }
        }

        Ok(activities)
    }

    async fn load_static(&self) -> Result<Vec<Activity>> {
        let raw = tokio::fs::read_to_string(&self.catalog_path)
            .await
            .with_context(|| format!("cannot read catalog asset {}", self.catalog_path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("cannot parse catalog asset {}", self.catalog_path.display()))
    }
}
