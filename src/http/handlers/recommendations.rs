use crate::service::advisor_service::{err, RecommendRequest};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

/// Wizard submission: score the profile against the live catalog and persist
/// the run so reports can be regenerated from it later.
pub async fn create_run(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> impl IntoResponse {
    match state
        .advisor_service
        .run(req, &state.providers_repo, true)
        .await
    {
        Ok(run) => (axum::http::StatusCode::OK, Json(run)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn get_run(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.advisor_service.replay(run_id).await {
        Ok(Some(run)) => (axum::http::StatusCode::OK, Json(run)).into_response(),
        Ok(None) => (
            axum::http::StatusCode::NOT_FOUND,
            Json(err("RUN_NOT_FOUND", "no run with that id")),
        )
            .into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
