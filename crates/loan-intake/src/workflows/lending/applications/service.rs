use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{ApplicationId, LoanApplicationInput, LoanApplicationSubmission};
use super::intake::{IntakeGuard, IntakeViolation};
use super::portfolio::{LoanQuery, PortfolioStats};
use super::repository::{
    LoanRecord, LoanRepository, RepositoryError, SubmissionNotice, SubmissionNotifier,
};
use super::risk::{RiskAssessment, RiskInputError, RiskRubric, RiskScorer};

/// Service composing the intake guard, risk scorer, repository and notifier.
pub struct LoanIntakeService<R, N> {
    guard: Arc<IntakeGuard>,
    scorer: Arc<RiskScorer>,
    repository: Arc<R>,
    notifier: Arc<N>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("loan-{id:06}"))
}

impl<R, N> LoanIntakeService<R, N>
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>, rubric: RiskRubric) -> Self {
        Self::with_guard(IntakeGuard::default(), repository, notifier, rubric)
    }

    pub fn with_guard(
        guard: IntakeGuard,
        repository: Arc<R>,
        notifier: Arc<N>,
        rubric: RiskRubric,
    ) -> Self {
        Self {
            guard: Arc::new(guard),
            scorer: Arc::new(RiskScorer::new(rubric)),
            repository,
            notifier,
        }
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }

    /// Validate, score and store a new application.
    pub fn submit(
        &self,
        submission: LoanApplicationSubmission,
    ) -> Result<LoanRecord, LoanServiceError> {
        let application = self.guard.admit(submission).map_err(|violation| {
            warn!(%violation, "loan application rejected at intake");
            violation
        })?;

        let assessment = self.scorer.assess(&application.risk_input())?;
        debug!(
            loan_id = %application.loan_id,
            penalty = assessment.total_penalty(),
            "risk components applied"
        );

        let record = LoanRecord {
            id: next_application_id(),
            application,
            assessment,
            submitted_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            id = %stored.id.0,
            loan_id = %stored.application.loan_id,
            score = stored.assessment.score,
            level = %stored.assessment.level,
            "loan application processed"
        );

        if let Err(err) = self.notifier.notify(SubmissionNotice::for_record(&stored)) {
            warn!(id = %stored.id.0, error = %err, "submission notice not delivered");
        }

        Ok(stored)
    }

    /// Store an already scored record, e.g. when seeding a sample portfolio.
    pub fn import(&self, record: LoanRecord) -> Result<LoanRecord, LoanServiceError> {
        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<LoanRecord, LoanServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self, query: &LoanQuery) -> Result<Vec<LoanRecord>, LoanServiceError> {
        let records = self.repository.all()?;
        Ok(query.apply(records))
    }

    pub fn stats(&self) -> Result<PortfolioStats, LoanServiceError> {
        let records = self.repository.all()?;
        Ok(PortfolioStats::from_records(&records))
    }

    /// Score an input without storing anything.
    pub fn assess(&self, input: &LoanApplicationInput) -> Result<RiskAssessment, LoanServiceError> {
        Ok(self.scorer.assess(input)?)
    }

    /// Quick estimate from income, loan amount and credit score alone.
    pub fn advisory(
        &self,
        income: f64,
        loan_amount: f64,
        credit_score: u16,
    ) -> Result<RiskAssessment, LoanServiceError> {
        self.assess(&LoanApplicationInput::advisory(
            income,
            loan_amount,
            credit_score,
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoanServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Risk(#[from] RiskInputError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
