use super::common::*;
use crate::workflows::lending::applications::portfolio::{
    LoanQuery, PortfolioStats, SortDirection, SortField,
};
use crate::workflows::lending::applications::repository::LoanRecord;
use crate::workflows::lending::applications::risk::RiskLevel;

fn dashboard() -> Vec<LoanRecord> {
    vec![
        record_with("loan-a", "LN-20000001", 120_000.0, 91, RiskLevel::Low, 1),
        record_with("loan-b", "LN-30000002", 450_000.0, 35, RiskLevel::Critical, 2),
        record_with("loan-c", "LN-20000003", 80_000.0, 64, RiskLevel::Medium, 3),
        record_with("loan-d", "LN-40000004", 260_000.0, 52, RiskLevel::High, 4),
    ]
}

fn loan_ids(records: &[LoanRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|record| record.application.loan_id.as_str())
        .collect()
}

#[test]
fn default_query_orders_newest_first() {
    let listed = LoanQuery::default().apply(dashboard());
    assert_eq!(
        loan_ids(&listed),
        vec!["LN-20000001", "LN-30000002", "LN-20000003", "LN-40000004"]
    );
}

#[test]
fn search_matches_loan_id_substrings_case_insensitively() {
    let query = LoanQuery {
        search: Some("ln-2000".to_string()),
        ..LoanQuery::default()
    };
    let listed = query.apply(dashboard());
    assert_eq!(loan_ids(&listed), vec!["LN-20000001", "LN-20000003"]);

    let blank = LoanQuery {
        search: Some("   ".to_string()),
        ..LoanQuery::default()
    };
    assert_eq!(blank.apply(dashboard()).len(), 4);
}

#[test]
fn risk_level_filter_narrows_results() {
    let query = LoanQuery {
        risk_level: Some(RiskLevel::Critical),
        ..LoanQuery::default()
    };
    let listed = query.apply(dashboard());
    assert_eq!(loan_ids(&listed), vec!["LN-30000002"]);
}

#[test]
fn sorts_by_requested_field_and_direction() {
    let by_amount = LoanQuery {
        sort: SortField::LoanAmount,
        direction: SortDirection::Asc,
        ..LoanQuery::default()
    };
    assert_eq!(
        loan_ids(&by_amount.apply(dashboard())),
        vec!["LN-20000003", "LN-20000001", "LN-40000004", "LN-30000002"]
    );

    let by_score = LoanQuery {
        sort: SortField::RiskScore,
        direction: SortDirection::Desc,
        ..LoanQuery::default()
    };
    assert_eq!(
        loan_ids(&by_score.apply(dashboard())),
        vec!["LN-20000001", "LN-20000003", "LN-40000004", "LN-30000002"]
    );

    let by_id = LoanQuery {
        sort: SortField::LoanId,
        direction: SortDirection::Asc,
        ..LoanQuery::default()
    };
    assert_eq!(
        loan_ids(&by_id.apply(dashboard())),
        vec!["LN-20000001", "LN-20000003", "LN-30000002", "LN-40000004"]
    );
}

#[test]
fn query_strings_accept_all_and_lowercase_levels() {
    let query: LoanQuery =
        serde_json::from_str(r#"{"risk_level":"all","sort":"credit_score","direction":"asc"}"#)
            .expect("query parses");
    assert_eq!(query.risk_level, None);
    assert_eq!(query.sort, SortField::CreditScore);
    assert_eq!(query.direction, SortDirection::Asc);

    let query: LoanQuery =
        serde_json::from_str(r#"{"risk_level":"high"}"#).expect("query parses");
    assert_eq!(query.risk_level, Some(RiskLevel::High));

    assert!(serde_json::from_str::<LoanQuery>(r#"{"risk_level":"severe"}"#).is_err());
}

#[test]
fn stats_summarize_the_portfolio() {
    let stats = PortfolioStats::from_records(&dashboard());

    assert_eq!(stats.total_applications, 4);
    assert_eq!(stats.total_loan_amount, 910_000.0);
    // (91 + 35 + 64 + 52) / 4 = 60.5
    assert_eq!(stats.average_risk_score, 61);
    assert_eq!(stats.high_risk_count, 2);
    assert_eq!(stats.high_risk_percentage, 50);
    assert_eq!(stats.by_level.low, 1);
    assert_eq!(stats.by_level.medium, 1);
    assert_eq!(stats.by_level.high, 1);
    assert_eq!(stats.by_level.critical, 1);
}

#[test]
fn stats_for_an_empty_portfolio_are_zero() {
    let stats = PortfolioStats::from_records(&[]);
    assert_eq!(stats.total_applications, 0);
    assert_eq!(stats.total_loan_amount, 0.0);
    assert_eq!(stats.average_risk_score, 0);
    assert_eq!(stats.high_risk_percentage, 0);
}
