use crate::catalog::CatalogSource;
use crate::domain::profile::TransactionProfile;
use crate::engine;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DebugQuery {
    pub source: Option<String>,
}

/// Full-candidate view of one scoring pass: every provider with its sub-scores
/// and exclusions, no top-N truncation. Diagnostic only, nothing is persisted.
pub async fn scoring_debug(
    State(state): State<AppState>,
    Query(query): Query<DebugQuery>,
    Json(profile): Json<TransactionProfile>,
) -> impl IntoResponse {
    let source: &dyn CatalogSource = if query.source.as_deref() == Some("fixture") {
        &state.fixture
    } else {
        &state.providers_repo
    };

    let weights = match state.advisor_service.config_cache.scoring_weights().await {
        Ok(w) => w,
        Err(e) => {
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    };
    let listings = match source.list_active().await {
        Ok(l) => l,
        Err(e) => {
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    };

    let top_n = listings.len();
    match engine::recommend(&profile, &listings, &weights, top_n, chrono::Utc::now()) {
        Ok(outcome) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "input": profile,
                "source": source.name(),
                "outcome": outcome,
            })),
        )
            .into_response(),
        Err(e) => (
            axum::http::StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
