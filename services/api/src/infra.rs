use loan_intake::workflows::lending::applications::{
    ApplicationId, LoanRecord, LoanRepository, NotifyError, RepositoryError, SubmissionNotice,
    SubmissionNotifier,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-lifetime store kept newest submission first. Inserts are a linear
/// scan under the lock, sized for demo portfolios.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLoanRepository {
    records: Arc<Mutex<Vec<LoanRecord>>>,
}

impl InMemoryLoanRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<LoanRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl LoanRepository for InMemoryLoanRepository {
    fn insert(&self, record: LoanRecord) -> Result<LoanRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let mut position = None;
        for (index, existing) in guard.iter().enumerate() {
            if existing.id == record.id {
                return Err(RepositoryError::Conflict);
            }
            if position.is_none() && existing.submitted_at <= record.submitted_at {
                position = Some(index);
            }
        }
        let position = position.unwrap_or(guard.len());
        guard.insert(position, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<LoanRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn all(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        Ok(self.lock()?.clone())
    }
}

/// Stands in for the borrower notification channel by logging each notice.
#[derive(Default, Clone, Copy)]
pub(crate) struct LoggingNotifier;

impl SubmissionNotifier for LoggingNotifier {
    fn notify(&self, notice: SubmissionNotice) -> Result<(), NotifyError> {
        info!(
            id = %notice.application_id.0,
            level = %notice.risk_level,
            "{}",
            notice.message
        );
        Ok(())
    }
}

/// Keeps every notice so tests can assert on what was announced.
#[cfg(test)]
#[derive(Default, Clone)]
pub(crate) struct RecordingNotifier {
    delivered: Arc<Mutex<Vec<SubmissionNotice>>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub(crate) fn delivered(&self) -> Vec<SubmissionNotice> {
        self.delivered.lock().expect("notice mutex poisoned").clone()
    }
}

#[cfg(test)]
impl SubmissionNotifier for RecordingNotifier {
    fn notify(&self, notice: SubmissionNotice) -> Result<(), NotifyError> {
        self.delivered
            .lock()
            .expect("notice mutex poisoned")
            .push(notice);
        Ok(())
    }
}
