use super::super::domain::{Client, ComplexityLevel, IncomeType, SituationFlag, Specialization};
use super::weights::{
    deduction_weight, filing_status_weight, income_weight, situation_weight, DEPENDENT_CAP,
    DEPENDENT_WEIGHT, MAX_COMPLEXITY_SCORE,
};

/// Derive the 0-100 complexity score from a client's attributes. Pure and
/// idempotent: identical attributes always produce the identical score.
pub fn complexity_score(client: &Client) -> u8 {
    let mut total = filing_status_weight(client.filing_status);

    for income in &client.income_types {
        total += income_weight(*income);
    }

    for deduction in &client.deductions {
        total += deduction_weight(*deduction);
    }

    if client.has_crypto {
        total += situation_weight(SituationFlag::Crypto);
    }
    if client.has_foreign_accounts {
        total += situation_weight(SituationFlag::ForeignAccounts);
    }
    if client.has_rental_property {
        total += situation_weight(SituationFlag::RentalProperty);
    }
    if client.has_business_income {
        total += situation_weight(SituationFlag::BusinessIncome);
    }

    total += (client.dependents.len() as u32 * DEPENDENT_WEIGHT).min(DEPENDENT_CAP);

    total.min(MAX_COMPLEXITY_SCORE) as u8
}

/// Bucket a score into its tier. Ranges are inclusive on both ends so every
/// boundary value maps to exactly one tier.
pub fn complexity_level(score: u8) -> ComplexityLevel {
    match score {
        0..=20 => ComplexityLevel::Simple,
        21..=50 => ComplexityLevel::Moderate,
        51..=80 => ComplexityLevel::Complex,
        _ => ComplexityLevel::Expert,
    }
}

/// The specialization tags a client's situation calls for. Emission order is
/// fixed so display stays stable; routing itself only checks membership.
pub fn required_specializations(client: &Client) -> Vec<Specialization> {
    let mut required = vec![Specialization::Individual];

    let self_employed = client.income_types.contains(&IncomeType::SelfEmployment)
        || client.income_types.contains(&IncomeType::Freelance)
        || client.income_types.contains(&IncomeType::GigEconomy);
    if self_employed {
        required.push(Specialization::SelfEmployment);
        if client.has_business_income {
            required.push(Specialization::SmallBusiness);
        }
    }

    if client.income_types.contains(&IncomeType::Investments)
        || client.income_types.contains(&IncomeType::Dividends)
        || client.income_types.contains(&IncomeType::CapitalGains)
    {
        required.push(Specialization::Investments);
    }

    if client.has_rental_property || client.income_types.contains(&IncomeType::RentalIncome) {
        required.push(Specialization::RealEstate);
    }

    if client.has_crypto || client.income_types.contains(&IncomeType::CryptoIncome) {
        required.push(Specialization::Crypto);
    }

    if client.has_foreign_accounts || client.income_types.contains(&IncomeType::ForeignIncome) {
        required.push(Specialization::ForeignIncome);
    }

    required
}
