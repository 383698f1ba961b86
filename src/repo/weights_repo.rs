use crate::domain::weights::ScoringWeights;
use anyhow::Result;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct WeightsRepo {
    pub pool: PgPool,
}

impl WeightsRepo {
    /// Loads the current weight vector. A vector that does not sum to 100 is a
    /// configuration error and fails the load; scoring never guesses a
    /// normalization.
    pub async fn load(&self) -> Result<ScoringWeights> {
        let row = sqlx::query(
            "SELECT cost_weight, fit_weight, ops_weight, risk_weight FROM scoring_weights WHERE config_id='default'",
        )
        .fetch_one(&self.pool)
        .await?;

        let weights = ScoringWeights {
            cost_weight: row.get("cost_weight"),
            fit_weight: row.get("fit_weight"),
            ops_weight: row.get("ops_weight"),
            risk_weight: row.get("risk_weight"),
        };
        weights.validate()?;
        Ok(weights)
    }

    pub async fn update(&self, weights: &ScoringWeights) -> Result<()> {
        weights.validate()?;
        sqlx::query(
            r#"
            UPDATE scoring_weights
            SET cost_weight = $1, fit_weight = $2, ops_weight = $3, risk_weight = $4,
                updated_at = now()
            WHERE config_id = 'default'
            "#,
        )
        .bind(weights.cost_weight)
        .bind(weights.fit_weight)
        .bind(weights.ops_weight)
        .bind(weights.risk_weight)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
