use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, LoanApplicationSubmission};
use super::risk::{RiskAssessment, RiskLevel};

/// Stored application with its risk assessment and submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: ApplicationId,
    pub application: LoanApplicationSubmission,
    pub assessment: RiskAssessment,
    pub submitted_at: DateTime<Utc>,
}

impl LoanRecord {
    pub fn risk_score(&self) -> u8 {
        self.assessment.score
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.assessment.level
    }

    pub fn summary_view(&self) -> LoanSummaryView {
        LoanSummaryView {
            id: self.id.clone(),
            loan_id: self.application.loan_id.clone(),
            loan_amount: self.application.loan_amount,
            credit_score: self.application.credit_score,
            risk_score: self.assessment.score,
            risk_level: self.assessment.level,
            submitted_at: self.submitted_at,
        }
    }
}

/// Row shown on the review dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummaryView {
    pub id: ApplicationId,
    pub loan_id: String,
    pub loan_amount: f64,
    pub credit_score: u16,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub submitted_at: DateTime<Utc>,
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait LoanRepository: Send + Sync {
    fn insert(&self, record: LoanRecord) -> Result<LoanRecord, RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanRecord>, RepositoryError>;
    /// Every stored record, newest submission first.
    fn all(&self) -> Result<Vec<LoanRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook told about every processed application.
pub trait SubmissionNotifier: Send + Sync {
    fn notify(&self, notice: SubmissionNotice) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionNotice {
    pub application_id: ApplicationId,
    pub loan_id: String,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub message: String,
}

impl SubmissionNotice {
    pub fn for_record(record: &LoanRecord) -> Self {
        Self {
            application_id: record.id.clone(),
            loan_id: record.application.loan_id.clone(),
            risk_score: record.assessment.score,
            risk_level: record.assessment.level,
            message: format!(
                "Loan ID: {} has been processed with a risk score of {}",
                record.application.loan_id, record.assessment.score
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
