use chrono::{DateTime, TimeZone, Utc};
use provider_advisor::domain::fees::FeeSchedule;
use provider_advisor::domain::profile::{
    DeclaredNeeds, MixShare, PaymentMethod, TransactionProfile,
};
use provider_advisor::domain::provider::{
    ProviderCapabilities, ProviderListing, ProviderRecord,
};
use provider_advisor::domain::weights::ScoringWeights;
use provider_advisor::engine;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 7, 15, 12, 0, 0).unwrap()
}

fn weights() -> ScoringWeights {
    ScoringWeights {
        cost_weight: 35.0,
        fit_weight: 30.0,
        ops_weight: 20.0,
        risk_weight: 15.0,
    }
}

fn profile() -> TransactionProfile {
    TransactionProfile {
        monthly_volume_minor: 10_000_000,
        transaction_count: 1_000,
        average_ticket_minor: 10_000,
        mix: vec![
            MixShare {
                method: PaymentMethod::CreditCard,
                share_percent: 60.0,
            },
            MixShare {
                method: PaymentMethod::Pix,
                share_percent: 40.0,
            },
        ],
        refund_rate_percent: 0.0,
        chargeback_rate_percent: 0.0,
        international_share_percent: 0.0,
        needs: DeclaredNeeds::default(),
        platform: None,
        locale: "pt-BR".to_string(),
    }
}

fn schedule(provider_id: &str, method: PaymentMethod, percent_rate: f64) -> FeeSchedule {
    FeeSchedule {
        provider_id: provider_id.to_string(),
        payment_method: method,
        percent_rate,
        fixed_fee_minor: 0,
        monthly_fee_minor: None,
        setup_fee_minor: None,
        refund_fee_percent: 0.0,
        refund_fee_fixed_minor: 0,
        chargeback_fee_minor: 0,
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
        verified_at: Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(),
    }
}

fn listing(provider_id: &str, display_name: &str, schedules: Vec<FeeSchedule>) -> ProviderListing {
    ProviderListing {
        provider: ProviderRecord {
            provider_id: provider_id.to_string(),
            display_name: display_name.to_string(),
            is_active: true,
        },
        capabilities: ProviderCapabilities {
            supported_methods: schedules.iter().map(|s| s.payment_method).collect(),
            activation_days_min: 2,
            activation_days_max: 4,
            settlement_days_min: 1,
            settlement_days_max: 2,
            ..ProviderCapabilities::default()
        },
        schedules,
    }
}

#[test]
fn partial_coverage_never_wins_on_ignored_volume() {
    // X covers the whole mix; Y only covers cards, with a headline rate that
    // looks cheaper than X's blended total.
    let x = listing(
        "x",
        "Provider X",
        vec![
            schedule("x", PaymentMethod::CreditCard, 2.0),
            schedule("x", PaymentMethod::Pix, 1.0),
        ],
    );
    let y = listing(
        "y",
        "Provider Y",
        vec![schedule("y", PaymentMethod::CreditCard, 2.2)],
    );

    let outcome = engine::recommend(&profile(), &[x, y], &weights(), 10, now()).unwrap();
    assert_eq!(outcome.recommendations.len(), 2);

    let first = &outcome.recommendations[0];
    let second = &outcome.recommendations[1];
    assert_eq!(first.provider_id, "x");
    assert_eq!(second.provider_id, "y");

    // Y's displayed cost is lower because 40% of the volume is simply not
    // processed, but scoring extrapolates coverage so it cannot win on that.
    assert!(second.cost.midpoint_minor() < first.cost.midpoint_minor());
    assert!(second.cost_score < first.cost_score);
    assert_eq!(second.fit_score, 60.0);
    assert_eq!(second.uncovered_methods, vec![PaymentMethod::Pix]);
    assert!(second
        .caveats
        .iter()
        .any(|c| c == "cannot process: PIX"));
}

#[test]
fn zero_coverage_is_excluded_not_scored() {
    let covers = listing(
        "covers",
        "Covers",
        vec![
            schedule("covers", PaymentMethod::CreditCard, 2.0),
            schedule("covers", PaymentMethod::Pix, 1.0),
        ],
    );
    let boleto_only = listing(
        "boleto-only",
        "Boleto Only",
        vec![schedule("boleto-only", PaymentMethod::Boleto, 1.5)],
    );

    let outcome = engine::recommend(&profile(), &[covers, boleto_only], &weights(), 10, now()).unwrap();
    assert_eq!(outcome.recommendations.len(), 1);
    assert_eq!(outcome.recommendations[0].provider_id, "covers");
    assert_eq!(outcome.excluded.len(), 1);
    assert_eq!(outcome.excluded[0].provider_id, "boleto-only");
}

#[test]
fn empty_catalog_is_a_valid_empty_result() {
    let outcome = engine::recommend(&profile(), &[], &weights(), 3, now()).unwrap();
    assert!(outcome.recommendations.is_empty());
}

#[test]
fn top_n_bounds_the_result() {
    let listings: Vec<ProviderListing> = (1..=5)
        .map(|i| {
            listing(
                &format!("p{i}"),
                &format!("Provider {i}"),
                vec![
                    schedule(&format!("p{i}"), PaymentMethod::CreditCard, 2.0 + i as f64 * 0.1),
                    schedule(&format!("p{i}"), PaymentMethod::Pix, 1.0),
                ],
            )
        })
        .collect();

    let outcome = engine::recommend(&profile(), &listings, &weights(), 3, now()).unwrap();
    assert_eq!(outcome.recommendations.len(), 3);
    assert_eq!(
        outcome
            .recommendations
            .iter()
            .map(|r| r.rank)
            .collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let single = engine::recommend(&profile(), &listings[..1], &weights(), 3, now()).unwrap();
    assert_eq!(single.recommendations.len(), 1);
    assert_eq!(single.recommendations[0].rank, 1);
}

#[test]
fn confirmed_full_coverage_collapses_range() {
    let full = listing(
        "full",
        "Full",
        vec![
            schedule("full", PaymentMethod::CreditCard, 2.0),
            schedule("full", PaymentMethod::Pix, 1.0),
        ],
    );
    let outcome = engine::recommend(&profile(), &[full], &weights(), 3, now()).unwrap();
    let rec = &outcome.recommendations[0];
    assert_eq!(rec.cost.low_minor, rec.cost.high_minor);
    assert!(rec.cost.low_minor >= 0.0);
}

#[test]
fn estimated_pricing_widens_range_and_adds_caveat() {
    let mut credit = schedule("est", PaymentMethod::CreditCard, 2.0);
    credit.is_estimated = true;
    let est = listing(
        "est",
        "Estimado",
        vec![credit, schedule("est", PaymentMethod::Pix, 1.0)],
    );
    let outcome = engine::recommend(&profile(), &[est], &weights(), 3, now()).unwrap();
    let rec = &outcome.recommendations[0];
    assert!(rec.cost.low_minor < rec.cost.high_minor);
    assert!(rec.cost.low_minor >= 0.0);
    assert!(rec.caveats.iter().any(|c| c == "pricing partially estimated"));
}

#[test]
fn stale_verification_adds_caveat_and_risk_penalty() {
    let mut credit = schedule("stale", PaymentMethod::CreditCard, 2.0);
    credit.verified_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let mut pix = schedule("stale", PaymentMethod::Pix, 1.0);
    pix.verified_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let stale = listing("stale", "Stale", vec![credit, pix]);

    let outcome = engine::recommend(&profile(), &[stale], &weights(), 3, now()).unwrap();
    let rec = &outcome.recommendations[0];
    assert!(rec.risk_score < 100.0);
    assert!(rec
        .caveats
        .iter()
        .any(|c| c == "pricing last verified more than 90 days ago"));
}

#[test]
fn zero_declared_needs_is_full_fit() {
    let full = listing(
        "full",
        "Full",
        vec![
            schedule("full", PaymentMethod::CreditCard, 2.0),
            schedule("full", PaymentMethod::Pix, 1.0),
        ],
    );
    let outcome = engine::recommend(&profile(), &[full], &weights(), 3, now()).unwrap();
    assert_eq!(outcome.recommendations[0].fit_score, 100.0);
}

#[test]
fn invalid_mix_fails_before_any_recommendation() {
    let mut p = profile();
    p.mix[0].share_percent = 50.0;
    let full = listing(
        "full",
        "Full",
        vec![schedule("full", PaymentMethod::CreditCard, 2.0)],
    );
    let result = engine::recommend(&p, &[full], &weights(), 3, now());
    assert!(result.is_err());
}

#[test]
fn identical_inputs_produce_identical_output() {
    let listings = vec![
        listing(
            "a",
            "Alpha",
            vec![
                schedule("a", PaymentMethod::CreditCard, 2.0),
                schedule("a", PaymentMethod::Pix, 1.0),
            ],
        ),
        listing(
            "b",
            "Beta",
            vec![
                schedule("b", PaymentMethod::CreditCard, 2.4),
                schedule("b", PaymentMethod::Pix, 0.9),
            ],
        ),
    ];

    let first = engine::recommend(&profile(), &listings, &weights(), 3, now()).unwrap();
    let second = engine::recommend(&profile(), &listings, &weights(), 3, now()).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn reasons_fire_for_set_leaders() {
    let cheap = listing(
        "cheap",
        "Cheap",
        vec![
            schedule("cheap", PaymentMethod::CreditCard, 1.5),
            schedule("cheap", PaymentMethod::Pix, 0.8),
        ],
    );
    let dear = listing(
        "dear",
        "Dear",
        vec![
            schedule("dear", PaymentMethod::CreditCard, 3.0),
            schedule("dear", PaymentMethod::Pix, 1.5),
        ],
    );
    let outcome = engine::recommend(&profile(), &[cheap, dear], &weights(), 10, now()).unwrap();
    let winner = &outcome.recommendations[0];
    assert_eq!(winner.provider_id, "cheap");
    assert!(winner
        .reasons
        .iter()
        .any(|r| r == "lowest estimated cost in comparison set"));
    assert!(winner.reasons.iter().any(|r| r == "pricing fully verified"));
}
