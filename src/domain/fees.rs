use crate::domain::profile::PaymentMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One provider's priced terms for one payment method. Monetary fields are in
/// minor units of the profile currency; `*_percent` fields are percentages
/// (3.49 means 3.49%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub provider_id: String,
    pub payment_method: PaymentMethod,
    pub percent_rate: f64,
    pub fixed_fee_minor: i64,
    pub monthly_fee_minor: Option<i64>,
    pub setup_fee_minor: Option<i64>,
    pub refund_fee_percent: f64,
    pub refund_fee_fixed_minor: i64,
    pub chargeback_fee_minor: i64,
    pub cross_border_percent: f64,
    pub currency_conversion_percent: f64,
    pub payout_fee_minor: i64,
    pub min_fee_minor: Option<i64>,
    pub max_fee_minor: Option<i64>,
    /// Ticket-size band the schedule applies to. Applicability metadata only,
    /// the aggregate cost model does not consult it.
    pub min_txn_minor: Option<i64>,
    pub max_txn_minor: Option<i64>,
    pub tier_label: Option<String>,
    pub is_estimated: bool,
    pub is_active: bool,
    pub verified_at: DateTime<Utc>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FeeScheduleIssue {
    #[error("{field} must be >= 0")]
    NegativeField { field: &'static str },
    #[error("{field} must be <= 100")]
    PercentOutOfRange { field: &'static str },
    #[error("{low} must be <= {high}")]
    InvertedBounds {
        low: &'static str,
        high: &'static str,
    },
}

impl FeeSchedule {
    /// Structural validation. Cross-border and conversion surcharges are only
    /// bounded below; they may legitimately exceed 100%.
    pub fn validate(&self) -> Result<(), FeeScheduleIssue> {
        let non_negative: [(&'static str, f64); 5] = [
            ("percent_rate", self.percent_rate),
            ("refund_fee_percent", self.refund_fee_percent),
            ("cross_border_percent", self.cross_border_percent),
            (
                "currency_conversion_percent",
                self.currency_conversion_percent,
            ),
            ("fixed_fee_minor", self.fixed_fee_minor as f64),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(FeeScheduleIssue::NegativeField { field });
            }
        }
        for (field, value) in [
            ("refund_fee_fixed_minor", self.refund_fee_fixed_minor),
            ("chargeback_fee_minor", self.chargeback_fee_minor),
            ("payout_fee_minor", self.payout_fee_minor),
        ] {
            if value < 0 {
                return Err(FeeScheduleIssue::NegativeField { field });
            }
        }
        for (field, value) in [
            ("monthly_fee_minor", self.monthly_fee_minor),
            ("setup_fee_minor", self.setup_fee_minor),
            ("min_fee_minor", self.min_fee_minor),
            ("max_fee_minor", self.max_fee_minor),
            ("min_txn_minor", self.min_txn_minor),
            ("max_txn_minor", self.max_txn_minor),
        ] {
            if value.unwrap_or(0) < 0 {
                return Err(FeeScheduleIssue::NegativeField { field });
            }
        }
        for (field, value) in [
            ("percent_rate", self.percent_rate),
            ("refund_fee_percent", self.refund_fee_percent),
        ] {
            if value > 100.0 {
                return Err(FeeScheduleIssue::PercentOutOfRange { field });
            }
        }
        if let (Some(min), Some(max)) = (self.min_fee_minor, self.max_fee_minor) {
            if min > max {
                return Err(FeeScheduleIssue::InvertedBounds {
                    low: "min_fee_minor",
                    high: "max_fee_minor",
                });
            }
        }
        if let (Some(min), Some(max)) = (self.min_txn_minor, self.max_txn_minor) {
            if min > max {
                return Err(FeeScheduleIssue::InvertedBounds {
                    low: "min_txn_minor",
                    high: "max_txn_minor",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn schedule() -> FeeSchedule {
        FeeSchedule {
            provider_id: "p1".to_string(),
            payment_method: PaymentMethod::CreditCard,
            percent_rate: 3.49,
            fixed_fee_minor: 39,
            monthly_fee_minor: None,
            setup_fee_minor: None,
            refund_fee_percent: 0.0,
            refund_fee_fixed_minor: 0,
            chargeback_fee_minor: 1500,
            cross_border_percent: 0.0,
            currency_conversion_percent: 0.0,
            payout_fee_minor: 0,
            min_fee_minor: None,
            max_fee_minor: None,
            min_txn_minor: None,
            max_txn_minor: None,
            tier_label: None,
            is_estimated: false,
            is_active: true,
            verified_at: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn accepts_well_formed_schedule() {
        assert!(schedule().validate().is_ok());
    }

    #[test]
    fn rejects_negative_rate() {
        let mut s = schedule();
        s.percent_rate = -0.1;
        assert_eq!(
            s.validate(),
            Err(FeeScheduleIssue::NegativeField {
                field: "percent_rate"
            })
        );
    }

    #[test]
    fn rejects_rate_above_hundred() {
        let mut s = schedule();
        s.percent_rate = 101.0;
        assert_eq!(
            s.validate(),
            Err(FeeScheduleIssue::PercentOutOfRange {
                field: "percent_rate"
            })
        );
    }

    #[test]
    fn surcharges_may_exceed_hundred() {
        let mut s = schedule();
        s.cross_border_percent = 140.0;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_fee_caps() {
        let mut s = schedule();
        s.min_fee_minor = Some(500);
        s.max_fee_minor = Some(100);
        assert_eq!(
            s.validate(),
            Err(FeeScheduleIssue::InvertedBounds {
                low: "min_fee_minor",
                high: "max_fee_minor"
            })
        );
    }
}
