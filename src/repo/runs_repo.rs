use crate::domain::profile::TransactionProfile;
use crate::domain::recommendation::RecommendationRun;
use anyhow::Result;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Persistence of finished runs. The engine never writes; the service stores
/// runs here so the PDF/report path can re-read the exact ranking that was
/// shown to the merchant.
#[derive(Clone)]
pub struct RunsRepo {
    pub pool: PgPool,
}

impl RunsRepo {
    pub async fn insert(&self, run: &RecommendationRun, profile: &TransactionProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO recommendation_runs (
                run_id,
                generated_at,
                source,
                profile_json,
                weights_json,
                recommendations_json,
                excluded_json
            ) VALUES ($1,$2,$3,$4,$5,$6,$7)
            ON CONFLICT (run_id) DO NOTHING
            "#,
        )
        .bind(run.run_id)
        .bind(run.generated_at)
        .bind(&run.source)
        .bind(serde_json::to_value(profile)?)
        .bind(serde_json::to_value(&run.weights)?)
        .bind(serde_json::to_value(&run.recommendations)?)
        .bind(serde_json::to_value(&run.excluded)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get(&self, run_id: Uuid) -> Result<Option<RecommendationRun>> {
        let row = sqlx::query(
            r#"
            SELECT run_id, generated_at, source, weights_json, recommendations_json, excluded_json
            FROM recommendation_runs WHERE run_id=$1
            "#,
        )
        .bind(run_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else { return Ok(None) };
        Ok(Some(RecommendationRun {
            run_id: row.get("run_id"),
            generated_at: row.get("generated_at"),
            source: row.get("source"),
            weights: serde_json::from_value(row.get("weights_json"))?,
            recommendations: serde_json::from_value(row.get("recommendations_json"))?,
            excluded: serde_json::from_value(row.get("excluded_json"))?,
        }))
    }
}
