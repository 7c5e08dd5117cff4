use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::submission::{Submission, SubmissionStatus};
use crate::infra::store::{Store, UpdateOutcome, SUBMISSIONS};

/// Result of an approve/reject attempt.
///
/// `AlreadyDecided` carries the status the submission had already reached,
/// so a double-click on "approve" reports a conflict instead of silently
/// rewriting the approval timestamp.
#[derive(Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    NotFound,
    AlreadyDecided(String),
}

#[derive(Clone)]
pub struct ModerationService {
    store: Arc<dyn Store>,
}

impl ModerationService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Lists submissions with the given status, newest submitted first.
    pub async fn list(&self, status: SubmissionStatus) -> Result<Vec<(String, Submission)>> {
        let rows = self.store.query_by_status(SUBMISSIONS, status.as_str()).await?;

        let mut submissions = Vec::with_capacity(rows.len());
        for (id, record) in rows {
            match serde_json::from_value::<Submission>(record) {
                Ok(submission) => submissions.push((id, submission)),
                Err(err) => {
                    tracing::warn!(submission_id = %id, error = %err, "skipping malformed submission record");
                }
            }
        }

        submissions.sort_by(|a, b| b.1.submitted_at.cmp(&a.1.submitted_at));
        Ok(submissions)
    }

    pub async fn approve(&self, id: &str) -> Result<TransitionOutcome> {
        let now = OffsetDateTime::now_utc().format(&Rfc3339)?;
        let patch = json!({
            "status": SubmissionStatus::Approved.as_str(),
            "approvedAt": now,
        });
        self.transition(id, patch).await
    }

    /// The caller must have checked that `reason` is non-blank.
    pub async fn reject(&self, id: &str, reason: &str) -> Result<TransitionOutcome> {
        let now = OffsetDateTime::now_utc().format(&Rfc3339)?;
        let patch = json!({
            "status": SubmissionStatus::Rejected.as_str(),
            "rejectedAt": now,
            "rejectionReason": reason,
        });
        self.transition(id, patch).await
    }

    async fn transition(&self, id: &str, patch: serde_json::Value) -> Result<TransitionOutcome> {
        let outcome = self
            .store
            .update_if_status(SUBMISSIONS, id, patch, SubmissionStatus::Pending.as_str())
            .await?;

        Ok(match outcome {
            UpdateOutcome::Updated => TransitionOutcome::Applied,
            UpdateOutcome::NotFound => TransitionOutcome::NotFound,
            UpdateOutcome::StatusMismatch(status) => TransitionOutcome::AlreadyDecided(status),
        })
    }
}
