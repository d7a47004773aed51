use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::lending::applications::domain::{
    ApplicantDetails, ApplicationId, Education, EmploymentType, LoanApplicationInput,
    LoanApplicationSubmission, LoanPurpose, MaritalStatus,
};
use crate::workflows::lending::applications::repository::{
    LoanRecord, LoanRepository, NotifyError, RepositoryError, SubmissionNotice, SubmissionNotifier,
};
use crate::workflows::lending::applications::risk::{RiskAssessment, RiskLevel, RiskRubric};
use crate::workflows::lending::applications::{application_router, LoanIntakeService};

/// Borrower with no penalties under the standard rubric.
pub(super) fn clean_input() -> LoanApplicationInput {
    LoanApplicationInput {
        credit_score: 800,
        dti: 0.2,
        months_employed: 36,
        loan_amount: 100_000.0,
        income: 1_000_000.0,
        has_co_signer: true,
        credit_lines: 2,
        dependents: 0,
    }
}

pub(super) fn worst_input() -> LoanApplicationInput {
    LoanApplicationInput {
        credit_score: 300,
        dti: 0.9,
        months_employed: 0,
        loan_amount: 1_000_000.0,
        income: 50_000.0,
        has_co_signer: false,
        credit_lines: 20,
        dependents: 5,
    }
}

/// Scores 75 (Medium): credit tier -10, dti -5, loan-to-income -5, no co-signer -5.
pub(super) fn submission() -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        loan_id: "LN-48151623".to_string(),
        age: 34,
        income: 90_000.0,
        loan_amount: 250_000.0,
        credit_score: 712,
        months_employed: 30,
        credit_lines: 4,
        interest_rate: 9.5,
        loan_term: 60,
        dti: 0.31,
        education: Education::Bachelor,
        employment_type: EmploymentType::FullTime,
        marital_status: MaritalStatus::Married,
        has_mortgage: false,
        dependents: 2,
        loan_purpose: LoanPurpose::Home,
        has_co_signer: false,
        applicant: ApplicantDetails {
            first_name: Some("Priya".to_string()),
            last_name: Some("Raman".to_string()),
            email: Some("priya.raman@example.com".to_string()),
            city: Some("Pune".to_string()),
            ..ApplicantDetails::default()
        },
    }
}

pub(super) fn submission_with_id(loan_id: &str) -> LoanApplicationSubmission {
    LoanApplicationSubmission {
        loan_id: loan_id.to_string(),
        ..submission()
    }
}

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Record with a hand-set assessment so dashboard math is easy to follow.
pub(super) fn record_with(
    id: &str,
    loan_id: &str,
    loan_amount: f64,
    score: u8,
    level: RiskLevel,
    hours_ago: i64,
) -> LoanRecord {
    LoanRecord {
        id: ApplicationId(id.to_string()),
        application: LoanApplicationSubmission {
            loan_amount,
            ..submission_with_id(loan_id)
        },
        assessment: RiskAssessment {
            score,
            level,
            components: Vec::new(),
        },
        submitted_at: fixed_now() - Duration::hours(hours_ago),
    }
}

pub(super) fn build_service() -> (
    LoanIntakeService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service =
        LoanIntakeService::new(repository.clone(), notifier.clone(), RiskRubric::default());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<LoanRecord>>>,
}

impl LoanRepository for MemoryRepository {
    fn insert(&self, record: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(0, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("repository mutex poisoned")
            .clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    notices: Arc<Mutex<Vec<SubmissionNotice>>>,
}

impl MemoryNotifier {
    pub(super) fn notices(&self) -> Vec<SubmissionNotice> {
        self.notices.lock().expect("notifier mutex poisoned").clone()
    }
}

impl SubmissionNotifier for MemoryNotifier {
    fn notify(&self, notice: SubmissionNotice) -> Result<(), NotifyError> {
        self.notices
            .lock()
            .expect("notifier mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct OfflineNotifier;

impl SubmissionNotifier for OfflineNotifier {
    fn notify(&self, _notice: SubmissionNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl LoanRepository for ConflictRepository {
    fn insert(&self, _record: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<LoanRecord>, RepositoryError> {
        Ok(None)
    }

    fn all(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl LoanRepository for UnavailableRepository {
    fn insert(&self, _record: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: LoanIntakeService<MemoryRepository, MemoryNotifier>,
) -> axum::Router {
    application_router(Arc::new(service))
}
