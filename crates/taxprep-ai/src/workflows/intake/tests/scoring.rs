use super::common::*;

use crate::workflows::intake::domain::{
    ComplexityLevel, Dependent, FilingStatus, IncomeType, Specialization,
};
use crate::workflows::intake::routing::{
    complexity_level, complexity_score, required_specializations,
};

#[test]
fn worked_example_scores_fifty_five_and_maps_to_complex() {
    let client = crypto_client("worked");

    // 0 (single) + 0 (wages) + 30 (crypto income) + 25 (crypto flag)
    let score = complexity_score(&client);
    assert_eq!(score, 55);
    assert_eq!(complexity_level(score), ComplexityLevel::Complex);
}

#[test]
fn score_saturates_at_one_hundred() {
    let client = saturated_client("saturated");
    assert_eq!(complexity_score(&client), 100);
}

#[test]
fn score_is_idempotent_for_unmodified_client() {
    let client = saturated_client("idempotent");
    assert_eq!(complexity_score(&client), complexity_score(&client));
}

#[test]
fn empty_profile_scores_zero() {
    let client = simple_client("empty");
    assert_eq!(complexity_score(&client), 0);
}

#[test]
fn level_boundaries_map_to_exactly_one_tier() {
    let expectations = [
        (0, ComplexityLevel::Simple),
        (20, ComplexityLevel::Simple),
        (21, ComplexityLevel::Moderate),
        (50, ComplexityLevel::Moderate),
        (51, ComplexityLevel::Complex),
        (80, ComplexityLevel::Complex),
        (81, ComplexityLevel::Expert),
        (100, ComplexityLevel::Expert),
    ];

    for (score, expected) in expectations {
        assert_eq!(complexity_level(score), expected, "score {score}");
    }
}

#[test]
fn dependent_bonus_is_capped() {
    let mut client = simple_client("dependents");
    client.dependents = (1..=2).map(Dependent::unnamed).collect();
    assert_eq!(complexity_score(&client), 10);

    client.dependents = (1..=10).map(Dependent::unnamed).collect();
    assert_eq!(complexity_score(&client), 15);
}

#[test]
fn filing_status_contributes_its_table_weight() {
    let mut client = simple_client("filing");
    client.filing_status = FilingStatus::MarriedSeparate;
    assert_eq!(complexity_score(&client), 10);
}

#[test]
fn specializations_always_include_individual() {
    let client = simple_client("base-spec");
    assert_eq!(
        required_specializations(&client),
        vec![Specialization::Individual]
    );
}

#[test]
fn crypto_client_requires_crypto_specialization() {
    let client = crypto_client("crypto-spec");
    let required = required_specializations(&client);
    assert_eq!(
        required,
        vec![Specialization::Individual, Specialization::Crypto]
    );
}

#[test]
fn business_flag_adds_small_business_only_with_self_employment() {
    let mut client = simple_client("business");
    client.has_business_income = true;
    let required = required_specializations(&client);
    assert!(!required.contains(&Specialization::SmallBusiness));

    client.income_types.insert(IncomeType::Freelance);
    let required = required_specializations(&client);
    assert_eq!(
        required,
        vec![
            Specialization::Individual,
            Specialization::SelfEmployment,
            Specialization::SmallBusiness,
        ]
    );
}

#[test]
fn specialization_order_is_stable_for_display() {
    let client = saturated_client("order");
    let first = required_specializations(&client);
    let second = required_specializations(&client);
    assert_eq!(first, second);
    assert_eq!(first[0], Specialization::Individual);
}
