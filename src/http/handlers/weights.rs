use crate::domain::weights::ScoringWeights;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn get_weights(State(state): State<AppState>) -> impl IntoResponse {
    match state.weights_repo.load().await {
        Ok(weights) => (axum::http::StatusCode::OK, Json(weights)).into_response(),
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

/// Admin update of the weight vector. Validation happens here, at
/// configuration-write time, so runs never see an invalid vector.
pub async fn put_weights(
    State(state): State<AppState>,
    Json(weights): Json<ScoringWeights>,
) -> impl IntoResponse {
    if let Err(e) = weights.validate() {
        return (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response();
    }
    match state.weights_repo.update(&weights).await {
        Ok(()) => {
            state.advisor_service.config_cache.invalidate().await;
            (
                axum::http::StatusCode::OK,
                Json(serde_json::json!({"updated": true})),
            )
                .into_response()
        }
        Err(e) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
