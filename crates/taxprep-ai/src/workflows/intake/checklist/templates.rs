use super::super::domain::{DeductionType, DocumentCategory, IncomeType, SituationFlag};

/// Static description of a document the office may request. The `key` is the
/// stable identifier used for collected-document tracking; generated checklist
/// items get their own instance ids on top of it.
#[derive(Debug, Clone)]
pub struct DocumentTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: DocumentCategory,
    pub required: bool,
    pub source_hint: Option<&'static str>,
}

/// Identity documents requested from every client.
pub(crate) const BASE_DOCUMENT_KEYS: [&str; 3] =
    ["government_id", "social_security_cards", "prior_year_return"];

pub(crate) fn template(key: &str) -> Option<&'static DocumentTemplate> {
    TEMPLATES.iter().find(|template| template.key == key)
}

pub(crate) const fn income_document_keys(income: IncomeType) -> &'static [&'static str] {
    match income {
        IncomeType::WagesW2 => &["form_w2"],
        IncomeType::SelfEmployment => &["forms_1099_nec", "business_expense_records"],
        IncomeType::Freelance => &["forms_1099_nec", "business_expense_records"],
        IncomeType::GigEconomy => &["forms_1099_nec", "platform_earnings_summary"],
        IncomeType::Investments => &["forms_1099_b", "brokerage_statements"],
        IncomeType::Dividends => &["forms_1099_div"],
        IncomeType::CapitalGains => &["forms_1099_b", "cost_basis_records"],
        IncomeType::RentalIncome => &["rental_income_ledger", "rental_expense_receipts"],
        IncomeType::CryptoIncome => &["crypto_transaction_history", "exchange_statements"],
        IncomeType::ForeignIncome => &["foreign_income_statements"],
        IncomeType::Retirement => &["forms_1099_r"],
        IncomeType::Unemployment => &["form_1099_g"],
    }
}

pub(crate) const fn deduction_document_keys(deduction: DeductionType) -> &'static [&'static str] {
    match deduction {
        DeductionType::MortgageInterest => &["form_1098"],
        DeductionType::CharitableGiving => &["donation_receipts"],
        DeductionType::MedicalExpenses => &["medical_expense_receipts"],
        DeductionType::Education => &["form_1098_t", "form_1098_e"],
        DeductionType::Childcare => &["childcare_provider_statement"],
        DeductionType::HomeOffice => &["home_office_records"],
        DeductionType::RetirementContributions => &["form_5498"],
        DeductionType::StateLocalTaxes => &["property_tax_statements"],
    }
}

pub(crate) const fn situation_document_keys(flag: SituationFlag) -> &'static [&'static str] {
    match flag {
        SituationFlag::Crypto => &["crypto_transaction_history", "exchange_statements"],
        SituationFlag::ForeignAccounts => &["foreign_account_statements"],
        SituationFlag::RentalProperty => &["rental_income_ledger", "rental_expense_receipts"],
        SituationFlag::BusinessIncome => {
            &["business_expense_records", "profit_and_loss_statement"]
        }
    }
}

static TEMPLATES: &[DocumentTemplate] = &[
    DocumentTemplate {
        key: "government_id",
        name: "Government-issued photo ID",
        description: "Driver's license, state ID, or passport for the primary filer (and spouse if filing jointly).",
        category: DocumentCategory::Identification,
        required: true,
        source_hint: None,
    },
    DocumentTemplate {
        key: "social_security_cards",
        name: "Social Security cards",
        description: "Cards or ITIN letters for everyone listed on the return, including dependents.",
        category: DocumentCategory::Identification,
        required: true,
        source_hint: None,
    },
    DocumentTemplate {
        key: "prior_year_return",
        name: "Prior-year tax return",
        description: "Last year's federal and state returns, used for carryovers and identity checks.",
        category: DocumentCategory::Identification,
        required: true,
        source_hint: Some("your previous preparer, or an IRS transcript"),
    },
    DocumentTemplate {
        key: "form_w2",
        name: "Form W-2",
        description: "Wage and tax statement from each employer you worked for during the year.",
        category: DocumentCategory::Income,
        required: true,
        source_hint: Some("employer payroll portal, mailed by early February"),
    },
    DocumentTemplate {
        key: "forms_1099_nec",
        name: "Forms 1099-NEC",
        description: "Nonemployee compensation statements from each client or platform that paid you $600 or more.",
        category: DocumentCategory::Income,
        required: true,
        source_hint: Some("each client or gig platform's tax documents page"),
    },
    DocumentTemplate {
        key: "platform_earnings_summary",
        name: "Platform earnings summary",
        description: "Annual earnings and mileage summary from rideshare or delivery apps.",
        category: DocumentCategory::Income,
        required: false,
        source_hint: Some("driver or seller dashboard"),
    },
    DocumentTemplate {
        key: "forms_1099_r",
        name: "Forms 1099-R",
        description: "Distribution statements for pensions, annuities, and retirement account withdrawals.",
        category: DocumentCategory::Income,
        required: true,
        source_hint: Some("plan administrator"),
    },
    DocumentTemplate {
        key: "form_1099_g",
        name: "Form 1099-G",
        description: "Unemployment compensation and state refund statement.",
        category: DocumentCategory::Income,
        required: true,
        source_hint: Some("state unemployment portal"),
    },
    DocumentTemplate {
        key: "forms_1099_b",
        name: "Forms 1099-B",
        description: "Broker proceeds statements covering every sale of stocks or other securities.",
        category: DocumentCategory::Investment,
        required: true,
        source_hint: Some("brokerage tax center"),
    },
    DocumentTemplate {
        key: "forms_1099_div",
        name: "Forms 1099-DIV",
        description: "Dividend income statements from each brokerage or fund.",
        category: DocumentCategory::Investment,
        required: true,
        source_hint: Some("brokerage tax center"),
    },
    DocumentTemplate {
        key: "brokerage_statements",
        name: "Year-end brokerage statements",
        description: "December statements for each investment account, for reconciliation.",
        category: DocumentCategory::Investment,
        required: false,
        source_hint: None,
    },
    DocumentTemplate {
        key: "cost_basis_records",
        name: "Cost basis records",
        description: "Purchase records for any securities sold where the broker did not report basis.",
        category: DocumentCategory::Investment,
        required: false,
        source_hint: None,
    },
    DocumentTemplate {
        key: "crypto_transaction_history",
        name: "Crypto transaction history",
        description: "Full-year export of every buy, sell, swap, and transfer across wallets and exchanges.",
        category: DocumentCategory::Investment,
        required: true,
        source_hint: Some("each exchange's tax export, e.g. Coinbase reports"),
    },
    DocumentTemplate {
        key: "exchange_statements",
        name: "Exchange gain/loss statements",
        description: "Any 1099-DA or gain/loss summaries issued by crypto exchanges.",
        category: DocumentCategory::Investment,
        required: false,
        source_hint: Some("exchange tax documents page"),
    },
    DocumentTemplate {
        key: "rental_income_ledger",
        name: "Rental income ledger",
        description: "Rent received per property, including deposits kept and fees charged.",
        category: DocumentCategory::Property,
        required: true,
        source_hint: None,
    },
    DocumentTemplate {
        key: "rental_expense_receipts",
        name: "Rental expense records",
        description: "Repairs, insurance, property tax, mortgage interest, and management fees per property.",
        category: DocumentCategory::Property,
        required: true,
        source_hint: None,
    },
    DocumentTemplate {
        key: "foreign_income_statements",
        name: "Foreign income statements",
        description: "Wage or pension statements for income earned outside the United States.",
        category: DocumentCategory::Foreign,
        required: true,
        source_hint: None,
    },
    DocumentTemplate {
        key: "foreign_account_statements",
        name: "Foreign account statements",
        description: "Year-end balances for every non-US account; needed to check FBAR/FATCA thresholds.",
        category: DocumentCategory::Foreign,
        required: true,
        source_hint: Some("each foreign bank; note the maximum balance during the year"),
    },
    DocumentTemplate {
        key: "business_expense_records",
        name: "Business expense records",
        description: "Categorized business expenses: supplies, software, mileage, home office share.",
        category: DocumentCategory::Business,
        required: true,
        source_hint: None,
    },
    DocumentTemplate {
        key: "profit_and_loss_statement",
        name: "Profit and loss statement",
        description: "Year-end P&L if you keep books for the business.",
        category: DocumentCategory::Business,
        required: false,
        source_hint: Some("bookkeeping software export"),
    },
    DocumentTemplate {
        key: "home_office_records",
        name: "Home office records",
        description: "Square footage of the office and whole-home figures for utilities and rent or mortgage.",
        category: DocumentCategory::Business,
        required: false,
        source_hint: None,
    },
    DocumentTemplate {
        key: "form_1098",
        name: "Form 1098",
        description: "Mortgage interest statement from your loan servicer.",
        category: DocumentCategory::Deduction,
        required: true,
        source_hint: Some("mortgage servicer portal, posted late January"),
    },
    DocumentTemplate {
        key: "donation_receipts",
        name: "Donation receipts",
        description: "Receipts or acknowledgment letters for cash and non-cash charitable gifts.",
        category: DocumentCategory::Deduction,
        required: true,
        source_hint: Some("letters are required for any single gift of $250 or more"),
    },
    DocumentTemplate {
        key: "medical_expense_receipts",
        name: "Medical expense receipts",
        description: "Out-of-pocket medical and dental costs, mileage to appointments, and insurance premiums.",
        category: DocumentCategory::Deduction,
        required: false,
        source_hint: None,
    },
    DocumentTemplate {
        key: "form_1098_t",
        name: "Form 1098-T",
        description: "Tuition statement for education credits.",
        category: DocumentCategory::Deduction,
        required: true,
        source_hint: Some("school's student account portal"),
    },
    DocumentTemplate {
        key: "form_1098_e",
        name: "Form 1098-E",
        description: "Student loan interest statement.",
        category: DocumentCategory::Deduction,
        required: false,
        source_hint: Some("student loan servicer"),
    },
    DocumentTemplate {
        key: "childcare_provider_statement",
        name: "Childcare provider statement",
        description: "Amount paid plus the provider's name, address, and EIN or SSN.",
        category: DocumentCategory::Deduction,
        required: true,
        source_hint: Some("ask the provider; their EIN is required for the credit"),
    },
    DocumentTemplate {
        key: "form_5498",
        name: "Form 5498",
        description: "IRA contribution statement.",
        category: DocumentCategory::Deduction,
        required: false,
        source_hint: Some("IRA custodian, often issued in May"),
    },
    DocumentTemplate {
        key: "property_tax_statements",
        name: "Property tax statements",
        description: "Property tax paid during the year for the state and local tax deduction.",
        category: DocumentCategory::Deduction,
        required: false,
        source_hint: Some("county assessor or escrow statement"),
    },
];
