use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLoanRepository, LoggingNotifier};
use crate::routes::with_loan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use loan_intake::config::AppConfig;
use loan_intake::error::AppError;
use loan_intake::telemetry;
use loan_intake::workflows::lending::applications::{
    LoanIntakeService, LoanRepository, SubmissionNotifier,
};
use loan_intake::workflows::lending::SamplePortfolio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(seed_samples) = args.seed_samples.take() {
        config.risk.seed_samples = seed_samples;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLoanRepository::default());
    let notifier = Arc::new(LoggingNotifier);
    let loan_service = Arc::new(LoanIntakeService::new(
        repository,
        notifier,
        config.risk.rubric.clone(),
    ));

    let seeded = seed_portfolio(&loan_service, config.risk.seed_samples)?;
    if seeded > 0 {
        info!(seeded, "sample portfolio loaded");
    }

    let app = with_loan_routes(loan_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Load `count` synthetic applications scored with the service's own rubric.
pub(crate) fn seed_portfolio<R, N>(
    service: &LoanIntakeService<R, N>,
    count: usize,
) -> Result<usize, AppError>
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    if count == 0 {
        return Ok(0);
    }

    let records = SamplePortfolio::from_entropy().generate(count, service.scorer(), Utc::now())?;
    for record in records {
        service.import(record)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::RecordingNotifier;
    use loan_intake::workflows::lending::applications::{LoanQuery, RiskRubric};

    #[test]
    fn seeding_fills_the_portfolio_without_notifications() {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = LoanIntakeService::new(
            Arc::new(InMemoryLoanRepository::default()),
            notifier.clone(),
            RiskRubric::default(),
        );

        assert_eq!(seed_portfolio(&service, 0).expect("no-op seed"), 0);
        assert_eq!(seed_portfolio(&service, 8).expect("seeded"), 8);

        let listed = service.list(&LoanQuery::default()).expect("list");
        assert_eq!(listed.len(), 8);
        assert!(notifier.delivered().is_empty());
    }
}
