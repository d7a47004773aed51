use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{ApplicationId, LoanApplicationInput, LoanApplicationSubmission};
use super::portfolio::LoanQuery;
use super::repository::{LoanRepository, LoanSummaryView, RepositoryError, SubmissionNotifier};
use super::risk::RiskAssessment;
use super::service::{LoanIntakeService, LoanServiceError};
use crate::error::AppError;
use crate::workflows::lending::calculator::{assess_affordability, AmortizationRow, EmiQuote};

/// Router builder exposing intake, dashboard and calculator endpoints.
pub fn application_router<R, N>(service: Arc<LoanIntakeService<R, N>>) -> Router
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/loans",
            post(submit_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route("/api/v1/loans/stats", get(stats_handler::<R, N>))
        .route("/api/v1/loans/:application_id", get(fetch_handler::<R, N>))
        .route("/api/v1/risk/assess", post(assess_handler::<R, N>))
        .route("/api/v1/risk/advisory", post(advisory_handler::<R, N>))
        .route("/api/v1/emi", post(emi_handler))
        .route("/api/v1/affordability", post(affordability_handler))
        .with_state(service)
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryRequest {
    pub income: f64,
    pub loan_amount: f64,
    pub credit_score: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryResponse {
    pub assessment: RiskAssessment,
    pub outlook: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmiRequest {
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub term_months: u32,
    #[serde(default)]
    pub include_schedule: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmiResponse {
    pub quote: EmiQuote,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationRow>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AffordabilityRequest {
    pub monthly_income: f64,
    pub loan_amount: f64,
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<LoanIntakeService<R, N>>>,
    Json(submission): Json<LoanApplicationSubmission>,
) -> Response
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, Json(record.summary_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<LoanIntakeService<R, N>>>,
    Query(query): Query<LoanQuery>,
) -> Response
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.list(&query) {
        Ok(records) => {
            let rows: Vec<LoanSummaryView> =
                records.iter().map(|record| record.summary_view()).collect();
            (StatusCode::OK, Json(rows)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stats_handler<R, N>(
    State(service): State<Arc<LoanIntakeService<R, N>>>,
) -> Response
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<R, N>(
    State(service): State<Arc<LoanIntakeService<R, N>>>,
    Path(application_id): Path<String>,
) -> Response
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    let id = ApplicationId(application_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(LoanServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "application_id": id.0,
                "error": "loan application not found",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn assess_handler<R, N>(
    State(service): State<Arc<LoanIntakeService<R, N>>>,
    Json(input): Json<LoanApplicationInput>,
) -> Response
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.assess(&input) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn advisory_handler<R, N>(
    State(service): State<Arc<LoanIntakeService<R, N>>>,
    Json(request): Json<AdvisoryRequest>,
) -> Response
where
    R: LoanRepository + 'static,
    N: SubmissionNotifier + 'static,
{
    match service.advisory(request.income, request.loan_amount, request.credit_score) {
        Ok(assessment) => {
            let outlook = assessment.level.outlook();
            (
                StatusCode::OK,
                Json(AdvisoryResponse {
                    assessment,
                    outlook,
                }),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn emi_handler(Json(request): Json<EmiRequest>) -> Json<EmiResponse> {
    let quote = EmiQuote::calculate(
        request.principal,
        request.annual_rate_pct,
        request.term_months,
    );
    let schedule = request.include_schedule.then(|| quote.schedule());
    Json(EmiResponse { quote, schedule })
}

pub(crate) async fn affordability_handler(Json(request): Json<AffordabilityRequest>) -> Response {
    match assess_affordability(request.monthly_income, request.loan_amount) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(err) => error_response(err.into()),
    }
}

fn error_response(err: LoanServiceError) -> Response {
    AppError::from(err).into_response()
}
