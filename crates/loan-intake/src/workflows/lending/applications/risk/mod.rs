mod config;
mod level;
mod rules;

pub use config::{
    CountPenalty, PenaltyTier, RiskRubric, RiskThresholds, RubricError, TierComparison,
    TierSchedule,
};
pub use level::{RiskLevel, UnknownRiskLevel};

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::domain::LoanApplicationInput;

/// Deterministic scorer that applies a rubric to borrower attributes.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    rubric: RiskRubric,
}

impl RiskScorer {
    pub fn new(rubric: RiskRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &RiskRubric {
        &self.rubric
    }

    pub fn score(&self, input: &LoanApplicationInput) -> Result<u8, RiskInputError> {
        check_input(input)?;
        let (_, score) = rules::score_input(input, &self.rubric);
        Ok(score)
    }

    pub fn classify(&self, score: u8) -> RiskLevel {
        self.rubric.classify(score)
    }

    /// Score and classify in one pass, keeping the per-factor trail.
    pub fn assess(&self, input: &LoanApplicationInput) -> Result<RiskAssessment, RiskInputError> {
        check_input(input)?;
        let (components, score) = rules::score_input(input, &self.rubric);

        Ok(RiskAssessment {
            score,
            level: self.rubric.classify(score),
            components,
        })
    }
}

fn default_scorer() -> &'static RiskScorer {
    static SCORER: OnceLock<RiskScorer> = OnceLock::new();
    SCORER.get_or_init(RiskScorer::default)
}

/// Score an input against the standard rubric.
pub fn score(input: &LoanApplicationInput) -> Result<u8, RiskInputError> {
    default_scorer().score(input)
}

/// Map a score onto the standard 80/60/40 risk levels.
pub fn classify(score: u8) -> RiskLevel {
    default_scorer().classify(score)
}

fn check_input(input: &LoanApplicationInput) -> Result<(), RiskInputError> {
    for (field, value) in [
        ("dti", input.dti),
        ("loan_amount", input.loan_amount),
        ("income", input.income),
    ] {
        if !value.is_finite() {
            return Err(RiskInputError::NonFinite { field });
        }
    }

    if input.income <= 0.0 {
        return Err(RiskInputError::NonPositiveIncome(input.income));
    }

    Ok(())
}

/// Inputs the scorer refuses rather than scoring through an undefined ratio.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskInputError {
    #[error("income must be greater than zero (found {0})")]
    NonPositiveIncome(f64),
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Factors contributing to the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    CreditScore,
    DebtToIncome,
    EmploymentHistory,
    LoanToIncome,
    CoSigner,
    CreditLines,
    Dependents,
}

/// Penalty applied by one factor, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskComponent {
    pub factor: RiskFactor,
    pub penalty: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub components: Vec<RiskComponent>,
}

impl RiskAssessment {
    pub fn total_penalty(&self) -> u32 {
        self.components
            .iter()
            .map(|component| u32::from(component.penalty))
            .sum()
    }

    pub fn summary(&self) -> String {
        format!("risk score {}/100 ({} risk)", self.score, self.level)
    }
}
