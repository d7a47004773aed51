use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use super::repository::LoanRecord;
use super::risk::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    LoanId,
    LoanAmount,
    CreditScore,
    RiskScore,
    #[default]
    SubmittedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Dashboard search, filter and ordering over the stored portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoanQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_risk_filter")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl LoanQuery {
    pub fn matches(&self, record: &LoanRecord) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => record
                .application
                .loan_id
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        };

        let matches_level = self
            .risk_level
            .map(|level| record.risk_level() == level)
            .unwrap_or(true);

        matches_search && matches_level
    }

    pub fn apply(&self, records: Vec<LoanRecord>) -> Vec<LoanRecord> {
        let mut selected: Vec<LoanRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect();

        selected.sort_by(|a, b| {
            let ordering = compare_by(self.sort, a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        selected
    }
}

fn compare_by(field: SortField, a: &LoanRecord, b: &LoanRecord) -> Ordering {
    match field {
        SortField::LoanId => a.application.loan_id.cmp(&b.application.loan_id),
        SortField::LoanAmount => a
            .application
            .loan_amount
            .total_cmp(&b.application.loan_amount),
        SortField::CreditScore => a.application.credit_score.cmp(&b.application.credit_score),
        SortField::RiskScore => a.risk_score().cmp(&b.risk_score()),
        SortField::SubmittedAt => a.submitted_at.cmp(&b.submitted_at),
    }
}

/// Accepts `all` or an empty value as "no filter".
fn deserialize_risk_filter<'de, D>(deserializer: D) -> Result<Option<RiskLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl LevelBreakdown {
    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }
}

/// Headline figures for the review dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_applications: usize,
    pub total_loan_amount: f64,
    pub average_risk_score: u8,
    pub high_risk_count: usize,
    pub high_risk_percentage: u8,
    pub by_level: LevelBreakdown,
}

impl PortfolioStats {
    pub fn from_records(records: &[LoanRecord]) -> Self {
        let total_applications = records.len();
        let mut by_level = LevelBreakdown::default();
        let mut total_loan_amount = 0.0;
        let mut score_sum: u64 = 0;

        for record in records {
            total_loan_amount += record.application.loan_amount;
            score_sum += u64::from(record.risk_score());
            by_level.record(record.risk_level());
        }

        let high_risk_count = by_level.high + by_level.critical;
        let (average_risk_score, high_risk_percentage) = if total_applications == 0 {
            (0, 0)
        } else {
            let count = total_applications as f64;
            (
                (score_sum as f64 / count).round() as u8,
                (high_risk_count as f64 / count * 100.0).round() as u8,
            )
        };

        Self {
            total_applications,
            total_loan_amount,
            average_risk_score,
            high_risk_count,
            high_risk_percentage,
            by_level,
        }
    }
}
