use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for client records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Identifier wrapper for intake sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// Identifier wrapper for staff members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(pub String);

/// Identifier wrapper for appointments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppointmentId(pub String);

/// Identifier wrapper for reminders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReminderId(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedJoint,
    MarriedSeparate,
    HeadOfHousehold,
    QualifyingWidow,
}

impl FilingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedJoint => "married filing jointly",
            Self::MarriedSeparate => "married filing separately",
            Self::HeadOfHousehold => "head of household",
            Self::QualifyingWidow => "qualifying widow(er)",
        }
    }
}

/// Income categories inferred from intake answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeType {
    WagesW2,
    SelfEmployment,
    Freelance,
    GigEconomy,
    Investments,
    Dividends,
    CapitalGains,
    RentalIncome,
    CryptoIncome,
    ForeignIncome,
    Retirement,
    Unemployment,
}

impl IncomeType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WagesW2 => "W-2 wages",
            Self::SelfEmployment => "self-employment",
            Self::Freelance => "freelance",
            Self::GigEconomy => "gig economy",
            Self::Investments => "investments",
            Self::Dividends => "dividends",
            Self::CapitalGains => "capital gains",
            Self::RentalIncome => "rental income",
            Self::CryptoIncome => "crypto income",
            Self::ForeignIncome => "foreign income",
            Self::Retirement => "retirement distributions",
            Self::Unemployment => "unemployment compensation",
        }
    }
}

/// Deduction categories inferred from intake answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionType {
    MortgageInterest,
    CharitableGiving,
    MedicalExpenses,
    Education,
    Childcare,
    HomeOffice,
    RetirementContributions,
    StateLocalTaxes,
}

impl DeductionType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MortgageInterest => "mortgage interest",
            Self::CharitableGiving => "charitable giving",
            Self::MedicalExpenses => "medical expenses",
            Self::Education => "education expenses",
            Self::Childcare => "childcare expenses",
            Self::HomeOffice => "home office",
            Self::RetirementContributions => "retirement contributions",
            Self::StateLocalTaxes => "state and local taxes",
        }
    }
}

/// The four special-situation booleans tracked on a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SituationFlag {
    Crypto,
    ForeignAccounts,
    RentalProperty,
    BusinessIncome,
}

/// A claimed dependent. Scoring only consumes the count; names are kept for
/// the preparer's reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    pub name: String,
    pub relationship: String,
}

impl Dependent {
    pub fn unnamed(position: usize) -> Self {
        Self {
            name: format!("Dependent {position}"),
            relationship: "dependent".to_string(),
        }
    }
}

/// The client profile built up incrementally by the intake script and
/// checklist generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub filing_status: FilingStatus,
    pub dependents: Vec<Dependent>,
    pub income_types: BTreeSet<IncomeType>,
    pub deductions: BTreeSet<DeductionType>,
    pub has_crypto: bool,
    pub has_foreign_accounts: bool,
    pub has_rental_property: bool,
    pub has_business_income: bool,
    /// Template keys the client has already handed over.
    pub documents_collected: BTreeSet<String>,
    /// Item ids of required checklist documents still outstanding.
    pub documents_pending: Vec<String>,
    pub complexity_score: u8,
    pub assigned_pro: Option<StaffId>,
    pub intake_completed: bool,
    pub intake_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(id: ClientId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            full_name: None,
            email: None,
            phone: None,
            filing_status: FilingStatus::default(),
            dependents: Vec::new(),
            income_types: BTreeSet::new(),
            deductions: BTreeSet::new(),
            has_crypto: false,
            has_foreign_accounts: false,
            has_rental_property: false,
            has_business_income: false,
            documents_collected: BTreeSet::new(),
            documents_pending: Vec::new(),
            complexity_score: 0,
            assigned_pro: None,
            intake_completed: false,
            intake_completed_at: None,
            created_at,
        }
    }

    pub fn situation(&self, flag: SituationFlag) -> bool {
        match flag {
            SituationFlag::Crypto => self.has_crypto,
            SituationFlag::ForeignAccounts => self.has_foreign_accounts,
            SituationFlag::RentalProperty => self.has_rental_property,
            SituationFlag::BusinessIncome => self.has_business_income,
        }
    }

    pub fn set_situation(&mut self, flag: SituationFlag) {
        match flag {
            SituationFlag::Crypto => self.has_crypto = true,
            SituationFlag::ForeignAccounts => self.has_foreign_accounts = true,
            SituationFlag::RentalProperty => self.has_rental_property = true,
            SituationFlag::BusinessIncome => self.has_business_income = true,
        }
    }
}

/// The fixed ten-stage questionnaire sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStep {
    PersonalInfo,
    FilingStatus,
    Dependents,
    Employment,
    IncomeTypes,
    Deductions,
    SpecialSituations,
    DocumentUpload,
    Review,
    Complete,
}

impl IntakeStep {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::PersonalInfo,
            Self::FilingStatus,
            Self::Dependents,
            Self::Employment,
            Self::IncomeTypes,
            Self::Deductions,
            Self::SpecialSituations,
            Self::DocumentUpload,
            Self::Review,
            Self::Complete,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::FilingStatus => "Filing Status",
            Self::Dependents => "Dependents",
            Self::Employment => "Employment",
            Self::IncomeTypes => "Other Income",
            Self::Deductions => "Deductions",
            Self::SpecialSituations => "Special Situations",
            Self::DocumentUpload => "Document Upload",
            Self::Review => "Review",
            Self::Complete => "Complete",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => Some(Self::FilingStatus),
            Self::FilingStatus => Some(Self::Dependents),
            Self::Dependents => Some(Self::Employment),
            Self::Employment => Some(Self::IncomeTypes),
            Self::IncomeTypes => Some(Self::Deductions),
            Self::Deductions => Some(Self::SpecialSituations),
            Self::SpecialSituations => Some(Self::DocumentUpload),
            Self::DocumentUpload => Some(Self::Review),
            Self::Review => Some(Self::Complete),
            Self::Complete => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl SessionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

/// One recorded question/answer exchange within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeResponse {
    pub step: IntakeStep,
    pub question: String,
    pub answer: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeSession {
    pub id: SessionId,
    pub client_id: ClientId,
    pub current_step: IntakeStep,
    pub completed_steps: Vec<IntakeStep>,
    pub responses: Vec<IntakeResponse>,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
}

impl IntakeSession {
    pub fn new(id: SessionId, client_id: ClientId, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            client_id,
            current_step: IntakeStep::PersonalInfo,
            completed_steps: Vec::new(),
            responses: Vec::new(),
            status: SessionStatus::InProgress,
            started_at,
        }
    }

    /// How many answers have been recorded against the current step.
    pub fn answered_on_current_step(&self) -> usize {
        self.responses
            .iter()
            .filter(|response| response.step == self.current_step)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Identification,
    Income,
    Deduction,
    Investment,
    Business,
    Property,
    Foreign,
    Other,
}

impl DocumentCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Identification => "identification",
            Self::Income => "income",
            Self::Deduction => "deduction",
            Self::Investment => "investment",
            Self::Business => "business",
            Self::Property => "property",
            Self::Foreign => "foreign",
            Self::Other => "other",
        }
    }
}

/// A concrete checklist entry generated from a document template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub id: String,
    /// Stable key into the static template table; distinct from `id`.
    pub key: String,
    pub name: String,
    pub description: String,
    pub category: DocumentCategory,
    pub required: bool,
    pub collected: bool,
    pub source_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChecklist {
    pub client_id: ClientId,
    pub items: Vec<DocumentItem>,
    pub generated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Complexity tiers in ascending ordinal order; the derived `Ord` is what
/// routing uses to compare a candidate's ceiling against a client's tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
    Expert,
}

impl ComplexityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Moderate => "moderate",
            Self::Complex => "complex",
            Self::Expert => "expert",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "moderate" => Some(Self::Moderate),
            "complex" => Some(Self::Complex),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

/// Staff expertise tags matched against a client's inferred needs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    Individual,
    SelfEmployment,
    SmallBusiness,
    Investments,
    RealEstate,
    Crypto,
    ForeignIncome,
}

impl Specialization {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::SelfEmployment => "self_employment",
            Self::SmallBusiness => "small_business",
            Self::Investments => "investments",
            Self::RealEstate => "real_estate",
            Self::Crypto => "crypto",
            Self::ForeignIncome => "foreign_income",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "individual" => Some(Self::Individual),
            "self_employment" => Some(Self::SelfEmployment),
            "small_business" => Some(Self::SmallBusiness),
            "investments" => Some(Self::Investments),
            "real_estate" => Some(Self::RealEstate),
            "crypto" => Some(Self::Crypto),
            "foreign_income" => Some(Self::ForeignIncome),
            _ => None,
        }
    }
}

/// A tax professional on the office roster. Seeded at startup; only the load
/// counter changes at runtime, and only through routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxPro {
    pub id: StaffId,
    pub name: String,
    pub specializations: Vec<Specialization>,
    pub max_complexity: ComplexityLevel,
    pub current_load: u32,
    pub max_daily_appointments: u32,
    pub available: bool,
    pub rating: f32,
}

impl TaxPro {
    pub fn has_capacity(&self) -> bool {
        self.available && self.current_load < self.max_daily_appointments
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Virtual,
    InPerson,
}

impl AppointmentType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::InPerson => "in_person",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: ClientId,
    pub staff_id: StaffId,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub kind: AppointmentType,
    /// 100 when intake was complete at booking time, otherwise 0.
    pub intake_score_snapshot: u8,
    pub complexity_snapshot: ComplexityLevel,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    DocumentRequest,
    AppointmentPrep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderChannel {
    Email,
    Sms,
}

impl ReminderChannel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub client_id: ClientId,
    pub appointment_id: Option<AppointmentId>,
    pub kind: ReminderType,
    pub message: String,
    pub scheduled_for: DateTime<Utc>,
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub channel: ReminderChannel,
    pub document_item_ids: Vec<String>,
}
