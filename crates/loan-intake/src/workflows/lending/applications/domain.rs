use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored loan applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// The borrower attributes consumed by the risk scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationInput {
    pub credit_score: u16,
    pub dti: f64,
    pub months_employed: u32,
    pub loan_amount: f64,
    /// Annual income. Must be positive for the loan-to-income ratio.
    pub income: f64,
    pub has_co_signer: bool,
    pub credit_lines: u32,
    pub dependents: u32,
}

impl LoanApplicationInput {
    pub const ADVISORY_MONTHS_EMPLOYED: u32 = 24;
    pub const ADVISORY_CREDIT_LINES: u32 = 2;
    pub const ADVISORY_DTI: f64 = 0.35;
    pub const ADVISORY_DEPENDENTS: u32 = 1;

    /// Build an input for a quick estimate when only income, loan amount and
    /// credit score are known. The remaining factors use fixed advisory defaults.
    pub fn advisory(income: f64, loan_amount: f64, credit_score: u16) -> Self {
        Self {
            credit_score,
            dti: Self::ADVISORY_DTI,
            months_employed: Self::ADVISORY_MONTHS_EMPLOYED,
            loan_amount,
            income,
            has_co_signer: false,
            credit_lines: Self::ADVISORY_CREDIT_LINES,
            dependents: Self::ADVISORY_DEPENDENTS,
        }
    }

    pub fn loan_to_income(&self) -> f64 {
        self.loan_amount / self.income
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    #[serde(rename = "High School")]
    HighSchool,
    Bachelor,
    Master,
    #[serde(rename = "PhD")]
    Phd,
    Other,
}

impl Education {
    pub const ALL: [Education; 5] = [
        Education::HighSchool,
        Education::Bachelor,
        Education::Master,
        Education::Phd,
        Education::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Education::HighSchool => "High School",
            Education::Bachelor => "Bachelor",
            Education::Master => "Master",
            Education::Phd => "PhD",
            Education::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    Unemployed,
    Retired,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 5] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::SelfEmployed,
        EmploymentType::Unemployed,
        EmploymentType::Retired,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::SelfEmployed => "Self-employed",
            EmploymentType::Unemployed => "Unemployed",
            EmploymentType::Retired => "Retired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub const ALL: [MaritalStatus; 4] = [
        MaritalStatus::Single,
        MaritalStatus::Married,
        MaritalStatus::Divorced,
        MaritalStatus::Widowed,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanPurpose {
    Home,
    Auto,
    Education,
    Personal,
    Business,
    #[serde(rename = "Debt Consolidation")]
    DebtConsolidation,
    Other,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 7] = [
        LoanPurpose::Home,
        LoanPurpose::Auto,
        LoanPurpose::Education,
        LoanPurpose::Personal,
        LoanPurpose::Business,
        LoanPurpose::DebtConsolidation,
        LoanPurpose::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            LoanPurpose::Home => "Home",
            LoanPurpose::Auto => "Auto",
            LoanPurpose::Education => "Education",
            LoanPurpose::Personal => "Personal",
            LoanPurpose::Business => "Business",
            LoanPurpose::DebtConsolidation => "Debt Consolidation",
            LoanPurpose::Other => "Other",
        }
    }
}

/// Optional contact and background details collected by the intake form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub previous_bankruptcy: Option<bool>,
    #[serde(default)]
    pub previous_default_count: Option<u32>,
    #[serde(default)]
    pub asset_value: Option<f64>,
    #[serde(default)]
    pub liability_value: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ApplicantDetails {
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(name), None) | (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        }
    }
}

/// Full intake payload submitted by a borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationSubmission {
    pub loan_id: String,
    pub age: u8,
    pub income: f64,
    pub loan_amount: f64,
    pub credit_score: u16,
    pub months_employed: u32,
    pub credit_lines: u32,
    /// Annual interest rate, in percent.
    pub interest_rate: f64,
    /// Loan term in months.
    pub loan_term: u32,
    pub dti: f64,
    pub education: Education,
    pub employment_type: EmploymentType,
    pub marital_status: MaritalStatus,
    pub has_mortgage: bool,
    pub dependents: u32,
    pub loan_purpose: LoanPurpose,
    pub has_co_signer: bool,
    #[serde(default)]
    pub applicant: ApplicantDetails,
}

impl LoanApplicationSubmission {
    /// Project the fields the risk scorer consumes.
    pub fn risk_input(&self) -> LoanApplicationInput {
        LoanApplicationInput {
            credit_score: self.credit_score,
            dti: self.dti,
            months_employed: self.months_employed,
            loan_amount: self.loan_amount,
            income: self.income,
            has_co_signer: self.has_co_signer,
            credit_lines: self.credit_lines,
            dependents: self.dependents,
        }
    }
}
