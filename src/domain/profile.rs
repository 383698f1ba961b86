use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Pix,
    Boleto,
    Wallet,
}

impl PaymentMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "CREDIT_CARD",
            Self::DebitCard => "DEBIT_CARD",
            Self::Pix => "PIX",
            Self::Boleto => "BOLETO",
            Self::Wallet => "WALLET",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CREDIT_CARD" => Some(Self::CreditCard),
            "DEBIT_CARD" => Some(Self::DebitCard),
            "PIX" => Some(Self::Pix),
            "BOLETO" => Some(Self::Boleto),
            "WALLET" => Some(Self::Wallet),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixShare {
    pub method: PaymentMethod,
    pub share_percent: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeclaredNeeds {
    #[serde(default)]
    pub recurring_billing: bool,
    #[serde(default)]
    pub tokenization: bool,
    #[serde(default)]
    pub multi_currency: bool,
    #[serde(default)]
    pub fast_settlement: bool,
    #[serde(default)]
    pub wallet_support: bool,
    #[serde(default)]
    pub buy_now_pay_later: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionProfile {
    pub monthly_volume_minor: i64,
    pub transaction_count: i64,
    pub average_ticket_minor: i64,
    pub mix: Vec<MixShare>,
    pub refund_rate_percent: f64,
    pub chargeback_rate_percent: f64,
    /// Share of volume coming from international customers. 0 means domestic-only,
    /// in which case cross-border and conversion surcharges never apply.
    #[serde(default)]
    pub international_share_percent: f64,
    #[serde(default)]
    pub needs: DeclaredNeeds,
    #[serde(default)]
    pub platform: Option<String>,
    pub locale: String,
}

#[cfg(test)]
mod tests {
    use super::PaymentMethod;

    #[test]
    fn method_labels_round_trip() {
        for method in [
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Pix,
            PaymentMethod::Boleto,
            PaymentMethod::Wallet,
        ] {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("CHEQUE"), None);
    }
}
