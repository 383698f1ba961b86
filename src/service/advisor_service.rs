use crate::catalog::CatalogSource;
use crate::domain::profile::TransactionProfile;
use crate::domain::recommendation::{ErrorEnvelope, ErrorPayload, RecommendationRun};
use crate::engine;
use crate::engine::EngineError;
use crate::repo::runs_repo::RunsRepo;
use crate::service::config_cache::ConfigCache;
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

pub const DEFAULT_TOP_N: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    pub profile: TransactionProfile,
    pub top_n: Option<usize>,
}

#[derive(Clone)]
pub struct AdvisorService {
    pub runs_repo: RunsRepo,
    pub config_cache: ConfigCache,
}

impl AdvisorService {
    /// One full run against the given catalog source. The wizard path
    /// persists; the stateless compare path does not. Both produce the same
    /// shape from the same engine.
    pub async fn run(
        &self,
        req: RecommendRequest,
        source: &dyn CatalogSource,
        persist: bool,
    ) -> Result<RecommendationRun, (StatusCode, ErrorEnvelope)> {
        let weights = self
            .config_cache
            .scoring_weights()
            .await
            .map_err(|e| config_error(&e))?;
        let listings = source.list_active().await.map_err(internal)?;

        let top_n = req.top_n.unwrap_or(DEFAULT_TOP_N);
        let generated_at = chrono::Utc::now();
        let outcome = engine::recommend(&req.profile, &listings, &weights, top_n, generated_at)
            .map_err(engine_error)?;

        let run = RecommendationRun {
            run_id: Uuid::new_v4(),
            generated_at: outcome.generated_at,
            source: source.name().to_string(),
            weights: outcome.weights,
            recommendations: outcome.recommendations,
            excluded: outcome.excluded,
        };
        tracing::info!(
            run_id = %run.run_id,
            source = %run.source,
            candidates = run.recommendations.len(),
            excluded = run.excluded.len(),
            "recommendation run complete"
        );

        if persist {
            self.runs_repo
                .insert(&run, &req.profile)
                .await
                .map_err(internal)?;
        }
        Ok(run)
    }

    pub async fn replay(
        &self,
        run_id: Uuid,
    ) -> Result<Option<RecommendationRun>, (StatusCode, ErrorEnvelope)> {
        self.runs_repo.get(run_id).await.map_err(internal)
    }
}

fn engine_error(e: EngineError) -> (StatusCode, ErrorEnvelope) {
    match &e {
        EngineError::InvalidProfile { field, .. } => (
            StatusCode::BAD_REQUEST,
            err_with_details("INVALID_PROFILE", &e.to_string(), Some(*field)),
        ),
        EngineError::InvalidWeights(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            err_with_details("INVALID_SCORING_CONFIG", &e.to_string(), None),
        ),
    }
}

fn config_error(e: &anyhow::Error) -> (StatusCode, ErrorEnvelope) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        err_with_details(
            "SCORING_CONFIG_UNAVAILABLE",
            "could not load a valid scoring configuration",
            Some(&e.to_string()),
        ),
    )
}

pub fn err(code: &str, message: &str) -> ErrorEnvelope {
    err_with_details(code, message, None)
}

fn err_with_details(code: &str, message: &str, details: Option<&str>) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
            details: details.map(str::to_string),
        },
    }
}

pub fn internal(e: anyhow::Error) -> (StatusCode, ErrorEnvelope) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        err("INTERNAL_ERROR", &e.to_string()),
    )
}
