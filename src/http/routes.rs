use axum::{routing::get, routing::post, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn activities() -> Router<AppState> {
    Router::new()
        .route("/activities", get(handlers::list_activities))
        .route("/activities/submit", post(handlers::submit_activity))
        .route("/activities/flag", post(handlers::flag_activity))
}

pub fn moderation() -> Router<AppState> {
    Router::new()
        .route("/moderation/submissions", get(handlers::list_submissions))
        .route(
            "/moderation/submissions/:id/approve",
            post(handlers::approve_submission),
        )
        .route(
            "/moderation/submissions/:id/reject",
            post(handlers::reject_submission),
        )
}
