use serde::{Deserialize, Serialize};

use super::super::domain::{DeductionType, FilingStatus, IncomeType, SituationFlag};

pub(crate) const MAX_COMPLEXITY_SCORE: u32 = 100;
pub(crate) const DEPENDENT_WEIGHT: u32 = 5;
pub(crate) const DEPENDENT_CAP: u32 = 15;

pub(crate) const fn filing_status_weight(status: FilingStatus) -> u32 {
    match status {
        FilingStatus::Single => 0,
        FilingStatus::MarriedJoint => 5,
        FilingStatus::MarriedSeparate => 10,
        FilingStatus::HeadOfHousehold => 5,
        FilingStatus::QualifyingWidow => 5,
    }
}

pub(crate) const fn income_weight(income: IncomeType) -> u32 {
    match income {
        IncomeType::WagesW2 => 0,
        IncomeType::SelfEmployment => 25,
        IncomeType::Freelance => 20,
        IncomeType::GigEconomy => 20,
        IncomeType::Investments => 15,
        IncomeType::Dividends => 10,
        IncomeType::CapitalGains => 15,
        IncomeType::RentalIncome => 20,
        IncomeType::CryptoIncome => 30,
        IncomeType::ForeignIncome => 25,
        IncomeType::Retirement => 5,
        IncomeType::Unemployment => 5,
    }
}

pub(crate) const fn deduction_weight(deduction: DeductionType) -> u32 {
    match deduction {
        DeductionType::MortgageInterest => 10,
        DeductionType::CharitableGiving => 5,
        DeductionType::MedicalExpenses => 10,
        DeductionType::Education => 5,
        DeductionType::Childcare => 5,
        DeductionType::HomeOffice => 15,
        DeductionType::RetirementContributions => 5,
        DeductionType::StateLocalTaxes => 5,
    }
}

pub(crate) const fn situation_weight(flag: SituationFlag) -> u32 {
    match flag {
        SituationFlag::Crypto => 25,
        SituationFlag::ForeignAccounts => 30,
        SituationFlag::RentalProperty => 20,
        SituationFlag::BusinessIncome => 25,
    }
}

/// Candidate-scoring weights for staff matching. The tier shortfall is an
/// additive penalty rather than a hard filter: a shortfall candidate is only
/// selectable if its remaining terms outweigh the penalty, which the default
/// weights cannot reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingPolicy {
    pub tier_shortfall_penalty: f32,
    pub tier_bonus: f32,
    pub specialization_weight: f32,
    pub load_balance_weight: f32,
    pub rating_weight: f32,
    pub alternate_count: usize,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            tier_shortfall_penalty: -100.0,
            tier_bonus: 20.0,
            specialization_weight: 50.0,
            load_balance_weight: 20.0,
            rating_weight: 2.0,
            alternate_count: 2,
        }
    }
}
