use provider_advisor::domain::weights::{ScoringWeights, WeightsError};

fn vector(cost: f64, fit: f64, ops: f64, risk: f64) -> ScoringWeights {
    ScoringWeights {
        cost_weight: cost,
        fit_weight: fit,
        ops_weight: ops,
        risk_weight: risk,
    }
}

#[test]
fn default_seed_vector_is_valid() {
    assert!(vector(35.0, 30.0, 20.0, 15.0).validate().is_ok());
}

#[test]
fn under_hundred_is_rejected() {
    assert!(matches!(
        vector(35.0, 30.0, 20.0, 10.0).validate(),
        Err(WeightsError::BadSum { .. })
    ));
}

#[test]
fn over_hundred_is_rejected() {
    assert!(matches!(
        vector(40.0, 30.0, 20.0, 15.0).validate(),
        Err(WeightsError::BadSum { .. })
    ));
}

#[test]
fn fractional_weights_summing_to_hundred_are_accepted() {
    assert!(vector(33.5, 31.5, 20.0, 15.0).validate().is_ok());
}

#[test]
fn slightly_off_sum_is_rejected() {
    assert!(vector(35.0, 30.0, 20.0, 15.5).validate().is_err());
}

#[test]
fn negative_weight_is_rejected_even_when_sum_is_hundred() {
    assert!(matches!(
        vector(-10.0, 60.0, 30.0, 20.0).validate(),
        Err(WeightsError::NegativeWeight { .. })
    ));
}

#[test]
fn single_dimension_vector_is_valid() {
    assert!(vector(100.0, 0.0, 0.0, 0.0).validate().is_ok());
}
