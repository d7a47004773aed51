//! Loan application intake, risk scoring and portfolio review.
//!
//! Every submission passes the intake guard, is scored by the rubric-driven
//! [`RiskScorer`], and is stored with its assessment. The stateless scoring and
//! advisory paths use the same scorer so an estimate always matches what a
//! submitted application would receive.

pub mod domain;
pub mod intake;
pub mod portfolio;
pub mod repository;
pub mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantDetails, ApplicationId, Education, EmploymentType, LoanApplicationInput,
    LoanApplicationSubmission, LoanPurpose, MaritalStatus,
};
pub use intake::{IntakeGuard, IntakeLimits, IntakeViolation};
pub use portfolio::{LevelBreakdown, LoanQuery, PortfolioStats, SortDirection, SortField};
pub use repository::{
    LoanRecord, LoanRepository, LoanSummaryView, NotifyError, RepositoryError, SubmissionNotice,
    SubmissionNotifier,
};
pub use risk::{
    classify, score, RiskAssessment, RiskComponent, RiskFactor, RiskInputError, RiskLevel,
    RiskRubric, RiskScorer, RiskThresholds, RubricError,
};
pub use router::application_router;
pub use service::{LoanIntakeService, LoanServiceError};
