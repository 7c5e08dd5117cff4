use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::catalog::CatalogService;
use crate::app::flags::FlagService;
use crate::app::moderation::{ModerationService, TransitionOutcome};
use crate::app::submissions::SubmissionService;
use crate::app::validate::{validate_flag, validate_submission};
use crate::domain::activity::Activity;
use crate::domain::submission::{Submission, SubmissionStatus};
use crate::http::{AdminToken, AppError};
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.store.ping().await.is_ok() {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse { status })
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

/// The merged catalog. A store failure already degraded inside the service;
/// an unreadable static asset answers 500 with an empty array so catalog
/// consumers always receive a list.
pub async fn list_activities(State(state): State<AppState>) -> Response {
    let service = CatalogService::new(state.store.clone(), &state.catalog_path);
    match service.list_published().await {
        Ok(activities) => (StatusCode::OK, Json(activities)).into_response(),
        Err(err) => {
            tracing::error!(error = ?err, "failed to load static catalog");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::<Activity>::new())).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Public submissions and flags
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(rename = "submissionId")]
    pub submission_id: String,
    pub message: &'static str,
}

pub async fn submit_activity(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<SubmitResponse>), AppError> {
    validate_submission(&body).map_err(AppError::bad_request)?;

    let service = SubmissionService::new(state.store.clone());
    let submission_id = service.submit(body).await.map_err(|err| {
        tracing::error!(error = ?err, "failed to persist submission");
        AppError::internal("Failed to submit activity")
    })?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            submission_id,
            message: "Activity submitted successfully. We will review it soon!",
        }),
    ))
}

#[derive(Serialize)]
pub struct FlagResponse {
    pub success: bool,
    #[serde(rename = "flagId")]
    pub flag_id: String,
    pub message: &'static str,
}

pub async fn flag_activity(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<FlagResponse>), AppError> {
    validate_flag(&body).map_err(AppError::bad_request)?;

    let service = FlagService::new(state.store.clone());
    let flag_id = service.flag(&body).await.map_err(|err| {
        tracing::error!(error = ?err, "failed to persist flag");
        AppError::internal("Failed to flag activity")
    })?;

    Ok((
        StatusCode::CREATED,
        Json(FlagResponse {
            success: true,
            flag_id,
            message: "Thank you for reporting this activity. We will review it shortly.",
        }),
    ))
}

// ---------------------------------------------------------------------------
// Moderation surface (admin token required)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct StatusFilterQuery {
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct SubmissionView {
    #[serde(rename = "submissionId")]
    pub submission_id: String,
    #[serde(flatten)]
    pub submission: Submission,
}

pub async fn list_submissions(
    _admin: AdminToken,
    State(state): State<AppState>,
    Query(query): Query<StatusFilterQuery>,
) -> Result<Json<Vec<SubmissionView>>, AppError> {
    let status = match query.status.as_deref() {
        None => SubmissionStatus::Pending,
        Some(raw) => SubmissionStatus::parse(raw)
            .ok_or_else(|| AppError::bad_request(format!("invalid status filter: {}", raw)))?,
    };

    let service = ModerationService::new(state.store.clone());
    let submissions = service.list(status).await.map_err(|err| {
        tracing::error!(error = ?err, "failed to list submissions");
        AppError::internal("Failed to list submissions")
    })?;

    Ok(Json(
        submissions
            .into_iter()
            .map(|(submission_id, submission)| SubmissionView {
                submission_id,
                submission,
            })
            .collect(),
    ))
}

#[derive(Serialize)]
pub struct ModerationResponse {
    pub success: bool,
    #[serde(rename = "submissionId")]
    pub submission_id: String,
    pub status: &'static str,
}

pub async fn approve_submission(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ModerationResponse>, AppError> {
    let service = ModerationService::new(state.store.clone());
    let outcome = service.approve(&id).await.map_err(|err| {
        tracing::error!(error = ?err, submission_id = %id, "failed to approve submission");
        AppError::internal("Failed to approve submission")
    })?;

    transition_response(outcome, id, SubmissionStatus::Approved)
}

#[derive(Deserialize)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: String,
}

pub async fn reject_submission(
    _admin: AdminToken,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RejectRequest>,
) -> Result<Json<ModerationResponse>, AppError> {
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError::bad_request("rejection reason is required"));
    }

    let service = ModerationService::new(state.store.clone());
    let outcome = service.reject(&id, reason).await.map_err(|err| {
        tracing::error!(error = ?err, submission_id = %id, "failed to reject submission");
        AppError::internal("Failed to reject submission")
    })?;

    transition_response(outcome, id, SubmissionStatus::Rejected)
}

fn transition_response(
    outcome: TransitionOutcome,
    submission_id: String,
    target: SubmissionStatus,
) -> Result<Json<ModerationResponse>, AppError> {
    match outcome {
        TransitionOutcome::Applied => Ok(Json(ModerationResponse {
            success: true,
            submission_id,
            status: target.as_str(),
        })),
        TransitionOutcome::NotFound => Err(AppError::not_found(format!(
            "submission not found: {}",
            submission_id
        ))),
        TransitionOutcome::AlreadyDecided(status) => Err(AppError::conflict(format!(
            "submission already {}",
            status
        ))),
    }
}
