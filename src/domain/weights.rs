use serde::{Deserialize, Serialize};

pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight vector for the four scoring dimensions, in percent. The sum must be
/// exactly 100; an off-by-anything vector is rejected rather than renormalized
/// so a persisted ranking can always be traced back to the numbers that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub cost_weight: f64,
    pub fit_weight: f64,
    pub ops_weight: f64,
    pub risk_weight: f64,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum WeightsError {
    #[error("scoring weights sum to {sum}, expected 100")]
    BadSum { sum: f64 },
    #[error("{field} must be >= 0")]
    NegativeWeight { field: &'static str },
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.cost_weight + self.fit_weight + self.ops_weight + self.risk_weight
    }

    pub fn validate(&self) -> Result<(), WeightsError> {
        for (field, value) in [
            ("cost_weight", self.cost_weight),
            ("fit_weight", self.fit_weight),
            ("ops_weight", self.ops_weight),
            ("risk_weight", self.risk_weight),
        ] {
            if value < 0.0 {
                return Err(WeightsError::NegativeWeight { field });
            }
        }
        let sum = self.sum();
        if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::BadSum { sum });
        }
        Ok(())
    }
}
