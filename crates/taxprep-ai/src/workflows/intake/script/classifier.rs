use std::sync::OnceLock;

use regex::Regex;

use super::super::domain::{DeductionType, FilingStatus, IncomeType, IntakeStep, SituationFlag};

/// A single attribute change inferred from a free-text answer.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeDelta {
    FullName(String),
    Email(String),
    Phone(String),
    Filing(FilingStatus),
    DependentCount(usize),
    Income(IncomeType),
    Deduction(DeductionType),
    Situation(SituationFlag),
    DocumentCollected(&'static str),
}

/// Capability seam for answer classification, so the keyword tables can later
/// be swapped for a real classifier without touching the session machine.
pub trait ResponseClassifier: Send + Sync {
    fn classify(&self, step: IntakeStep, answer: &str) -> Vec<AttributeDelta>;
}

/// Default classifier: lowercase substring tables plus a phone-shaped regex.
/// Unrecognized text produces no deltas; intake never fails on bad input.
#[derive(Debug, Default, Clone)]
pub struct KeywordClassifier;

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| {
        Regex::new(r"(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
            .expect("phone pattern compiles")
    })
}

fn count_regex() -> &'static Regex {
    static COUNT: OnceLock<Regex> = OnceLock::new();
    COUNT.get_or_init(|| Regex::new(r"\d+").expect("count pattern compiles"))
}

fn normalize(answer: &str) -> String {
    answer
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl ResponseClassifier for KeywordClassifier {
    fn classify(&self, step: IntakeStep, answer: &str) -> Vec<AttributeDelta> {
        let text = normalize(answer);
        if text.is_empty() {
            return Vec::new();
        }

        match step {
            IntakeStep::PersonalInfo => personal_info_deltas(answer, &text),
            IntakeStep::FilingStatus => filing_status_deltas(&text),
            IntakeStep::Dependents => dependent_deltas(&text),
            IntakeStep::Employment => employment_deltas(&text),
            IntakeStep::IncomeTypes => income_deltas(&text),
            IntakeStep::Deductions => deduction_deltas(&text),
            IntakeStep::SpecialSituations => special_situation_deltas(&text),
            IntakeStep::DocumentUpload => document_deltas(&text),
            IntakeStep::Review | IntakeStep::Complete => Vec::new(),
        }
    }
}

fn personal_info_deltas(raw: &str, text: &str) -> Vec<AttributeDelta> {
    if let Some(token) = raw.split_whitespace().find(|token| token.contains('@')) {
        let email = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '@' && c != '.');
        return vec![AttributeDelta::Email(email.to_string())];
    }

    if let Some(found) = phone_regex().find(raw) {
        return vec![AttributeDelta::Phone(found.as_str().to_string())];
    }

    let looks_like_name = text.split(' ').count() >= 2
        && text
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '\'' || c == '.');
    if looks_like_name {
        return vec![AttributeDelta::FullName(raw.trim().to_string())];
    }

    Vec::new()
}

fn filing_status_deltas(text: &str) -> Vec<AttributeDelta> {
    let status = if text.contains("married") {
        if text.contains("separate") {
            Some(FilingStatus::MarriedSeparate)
        } else {
            Some(FilingStatus::MarriedJoint)
        }
    } else if text.contains("head of household") {
        Some(FilingStatus::HeadOfHousehold)
    } else if text.contains("widow") {
        Some(FilingStatus::QualifyingWidow)
    } else if text.contains("single") {
        Some(FilingStatus::Single)
    } else {
        None
    };

    status.map(AttributeDelta::Filing).into_iter().collect()
}

const NUMBER_WORDS: [(&str, usize); 11] = [
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
];

fn dependent_deltas(text: &str) -> Vec<AttributeDelta> {
    if let Some(found) = count_regex().find(text) {
        if let Ok(count) = found.as_str().parse::<usize>() {
            return vec![AttributeDelta::DependentCount(count.min(15))];
        }
    }

    if text.contains("none") || text.contains("no dependents") {
        return vec![AttributeDelta::DependentCount(0)];
    }

    for (word, count) in NUMBER_WORDS {
        if text.split(|c: char| !c.is_alphabetic()).any(|w| w == word) {
            return vec![AttributeDelta::DependentCount(count)];
        }
    }

    Vec::new()
}

fn employment_deltas(text: &str) -> Vec<AttributeDelta> {
    let mut deltas = Vec::new();

    if contains_any(text, &["w-2", "w2", "salary", "salaried", "employer", "wages", "full-time", "full time"]) {
        deltas.push(AttributeDelta::Income(IncomeType::WagesW2));
    }
    if contains_any(text, &["self-employed", "self employed", "sole proprietor", "1099"]) {
        deltas.push(AttributeDelta::Income(IncomeType::SelfEmployment));
    }
    if contains_any(text, &["freelance", "freelancer", "contractor", "consulting"]) {
        deltas.push(AttributeDelta::Income(IncomeType::Freelance));
    }
    if contains_any(text, &["gig", "uber", "lyft", "doordash", "instacart", "rideshare"]) {
        deltas.push(AttributeDelta::Income(IncomeType::GigEconomy));
    }
    if contains_any(text, &["llc", "s-corp", "s corp", "my business", "own a business"]) {
        deltas.push(AttributeDelta::Situation(SituationFlag::BusinessIncome));
        deltas.push(AttributeDelta::Income(IncomeType::SelfEmployment));
    }

    deltas
}

fn income_deltas(text: &str) -> Vec<AttributeDelta> {
    let mut deltas = Vec::new();

    if contains_any(text, &["invest", "stock", "brokerage", "mutual fund", "etf"]) {
        deltas.push(AttributeDelta::Income(IncomeType::Investments));
    }
    if text.contains("dividend") {
        deltas.push(AttributeDelta::Income(IncomeType::Dividends));
    }
    if contains_any(text, &["capital gain", "sold stock", "sold shares"]) {
        deltas.push(AttributeDelta::Income(IncomeType::CapitalGains));
    }
    if contains_any(text, &["crypto", "bitcoin", "ethereum", "coinbase", "nft"]) {
        deltas.push(AttributeDelta::Income(IncomeType::CryptoIncome));
        deltas.push(AttributeDelta::Situation(SituationFlag::Crypto));
    }
    if contains_any(text, &["rental", "rent out", "landlord", "airbnb", "tenant"]) {
        deltas.push(AttributeDelta::Income(IncomeType::RentalIncome));
        deltas.push(AttributeDelta::Situation(SituationFlag::RentalProperty));
    }
    if contains_any(text, &["foreign", "overseas", "abroad"]) {
        deltas.push(AttributeDelta::Income(IncomeType::ForeignIncome));
        deltas.push(AttributeDelta::Situation(SituationFlag::ForeignAccounts));
    }
    if contains_any(text, &["401k", "401(k)", "ira", "pension", "retire"]) {
        deltas.push(AttributeDelta::Income(IncomeType::Retirement));
    }
    if text.contains("unemploy") {
        deltas.push(AttributeDelta::Income(IncomeType::Unemployment));
    }

    deltas
}

fn deduction_deltas(text: &str) -> Vec<AttributeDelta> {
    let mut deltas = Vec::new();

    if text.contains("mortgage") {
        deltas.push(AttributeDelta::Deduction(DeductionType::MortgageInterest));
    }
    if contains_any(text, &["charit", "donat", "tithe"]) {
        deltas.push(AttributeDelta::Deduction(DeductionType::CharitableGiving));
    }
    if contains_any(text, &["medical", "doctor", "hospital", "dental"]) {
        deltas.push(AttributeDelta::Deduction(DeductionType::MedicalExpenses));
    }
    if contains_any(text, &["student loan", "tuition", "education"]) {
        deltas.push(AttributeDelta::Deduction(DeductionType::Education));
    }
    if contains_any(text, &["childcare", "child care", "daycare", "day care"]) {
        deltas.push(AttributeDelta::Deduction(DeductionType::Childcare));
    }
    if text.contains("home office") {
        deltas.push(AttributeDelta::Deduction(DeductionType::HomeOffice));
        deltas.push(AttributeDelta::Situation(SituationFlag::BusinessIncome));
    }
    if contains_any(text, &["401k", "401(k)", "ira", "retirement"]) {
        deltas.push(AttributeDelta::Deduction(
            DeductionType::RetirementContributions,
        ));
    }
    if contains_any(text, &["property tax", "state tax", "local tax", "salt"]) {
        deltas.push(AttributeDelta::Deduction(DeductionType::StateLocalTaxes));
    }

    deltas
}

fn special_situation_deltas(text: &str) -> Vec<AttributeDelta> {
    let mut deltas = Vec::new();

    if contains_any(text, &["crypto", "bitcoin", "ethereum", "coinbase", "nft"]) {
        deltas.push(AttributeDelta::Situation(SituationFlag::Crypto));
        deltas.push(AttributeDelta::Income(IncomeType::CryptoIncome));
    }
    if contains_any(text, &["foreign", "overseas", "abroad", "fbar"]) {
        deltas.push(AttributeDelta::Situation(SituationFlag::ForeignAccounts));
    }
    if contains_any(text, &["rental", "rent out", "landlord", "airbnb"]) {
        deltas.push(AttributeDelta::Situation(SituationFlag::RentalProperty));
        deltas.push(AttributeDelta::Income(IncomeType::RentalIncome));
    }
    if contains_any(text, &["business", "llc", "s-corp", "side hustle"]) {
        deltas.push(AttributeDelta::Situation(SituationFlag::BusinessIncome));
    }

    deltas
}

fn document_deltas(text: &str) -> Vec<AttributeDelta> {
    let mut deltas = Vec::new();

    if contains_any(text, &["w-2", "w2"]) {
        deltas.push(AttributeDelta::DocumentCollected("form_w2"));
    }
    if contains_any(text, &["1099-nec", "1099 nec", "1099s", "1099"]) {
        deltas.push(AttributeDelta::DocumentCollected("forms_1099_nec"));
    }
    if contains_any(text, &["license", "passport", "photo id", "state id"]) {
        deltas.push(AttributeDelta::DocumentCollected("government_id"));
    }
    if text.contains("social security") {
        deltas.push(AttributeDelta::DocumentCollected("social_security_cards"));
    }
    if contains_any(text, &["last year", "prior year", "previous return"]) {
        deltas.push(AttributeDelta::DocumentCollected("prior_year_return"));
    }
    if contains_any(text, &["1098-t", "1098 t"]) {
        deltas.push(AttributeDelta::DocumentCollected("form_1098_t"));
    } else if text.contains("1098") {
        deltas.push(AttributeDelta::DocumentCollected("form_1098"));
    }

    deltas
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}
