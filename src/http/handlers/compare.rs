use crate::catalog::CatalogSource;
use crate::service::advisor_service::{err, RecommendRequest};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub source: Option<String>,
}

/// Stateless comparison: same engine and output shape as the wizard path, but
/// nothing is persisted and the catalog source is picked per request.
pub async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
    Json(req): Json<RecommendRequest>,
) -> impl IntoResponse {
    let source: &dyn CatalogSource = match query.source.as_deref() {
        None | Some("live") => &state.providers_repo,
        Some("fixture") => &state.fixture,
        Some(other) => {
            return (
                axum::http::StatusCode::BAD_REQUEST,
                Json(err(
                    "UNKNOWN_SOURCE",
                    &format!("unknown catalog source `{other}`, expected live or fixture"),
                )),
            )
                .into_response()
        }
    };

    match state.advisor_service.run(req, source, false).await {
        Ok(run) => (axum::http::StatusCode::OK, Json(run)).into_response(),
        Err((status, body)) => (status, Json(body)).into_response(),
    }
}
