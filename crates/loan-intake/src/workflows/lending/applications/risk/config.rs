use serde::{Deserialize, Serialize};

use super::level::RiskLevel;

/// How a tier bound is compared against the observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierComparison {
    /// The tier applies when the value is strictly below the bound.
    Below,
    /// The tier applies when the value is strictly above the bound.
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTier {
    pub bound: f64,
    pub penalty: u8,
}

/// Ordered, mutually exclusive penalty tiers for one factor. The first tier
/// whose bound matches wins; a value matching no tier carries no penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSchedule {
    pub comparison: TierComparison,
    pub tiers: Vec<PenaltyTier>,
}

impl TierSchedule {
    pub fn below(tiers: &[(f64, u8)]) -> Self {
        Self::with_comparison(TierComparison::Below, tiers)
    }

    pub fn above(tiers: &[(f64, u8)]) -> Self {
        Self::with_comparison(TierComparison::Above, tiers)
    }

    fn with_comparison(comparison: TierComparison, tiers: &[(f64, u8)]) -> Self {
        Self {
            comparison,
            tiers: tiers
                .iter()
                .map(|&(bound, penalty)| PenaltyTier { bound, penalty })
                .collect(),
        }
    }

    pub fn matching_tier(&self, value: f64) -> Option<&PenaltyTier> {
        self.tiers.iter().find(|tier| match self.comparison {
            TierComparison::Below => value < tier.bound,
            TierComparison::Above => value > tier.bound,
        })
    }

    pub fn penalty_for(&self, value: f64) -> u8 {
        self.matching_tier(value)
            .map(|tier| tier.penalty)
            .unwrap_or(0)
    }

    fn validate(&self, factor: &'static str) -> Result<(), RubricError> {
        if self.tiers.iter().any(|tier| !tier.bound.is_finite()) {
            return Err(RubricError::NonFiniteBound { factor });
        }

        let ordered = self.tiers.windows(2).all(|pair| match self.comparison {
            TierComparison::Below => pair[0].bound < pair[1].bound,
            TierComparison::Above => pair[0].bound > pair[1].bound,
        });
        if !ordered {
            return Err(RubricError::UnorderedTiers { factor });
        }

        Ok(())
    }
}

/// A flat penalty applied once a count exceeds a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountPenalty {
    pub above: u32,
    pub penalty: u8,
}

impl CountPenalty {
    pub fn penalty_for(&self, count: u32) -> u8 {
        if count > self.above {
            self.penalty
        } else {
            0
        }
    }
}

/// Minimum scores for each risk level, checked from the lowest risk down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub low: u8,
    pub medium: u8,
    pub high: u8,
}

impl RiskThresholds {
    pub fn classify(&self, score: u8) -> RiskLevel {
        if score >= self.low {
            RiskLevel::Low
        } else if score >= self.medium {
            RiskLevel::Medium
        } else if score >= self.high {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: 80,
            medium: 60,
            high: 40,
        }
    }
}

/// Calibration table driving the additive penalty model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRubric {
    pub base_score: u8,
    pub credit_score: TierSchedule,
    pub debt_to_income: TierSchedule,
    pub months_employed: TierSchedule,
    pub loan_to_income: TierSchedule,
    pub missing_co_signer_penalty: u8,
    pub credit_lines: CountPenalty,
    pub dependents: CountPenalty,
    pub thresholds: RiskThresholds,
}

impl Default for RiskRubric {
    fn default() -> Self {
        Self {
            base_score: 100,
            credit_score: TierSchedule::below(&[(580.0, 30), (670.0, 20), (740.0, 10), (800.0, 5)]),
            debt_to_income: TierSchedule::above(&[(0.43, 25), (0.36, 15), (0.28, 5)]),
            months_employed: TierSchedule::below(&[(6.0, 15), (12.0, 10), (24.0, 5)]),
            loan_to_income: TierSchedule::above(&[(5.0, 20), (3.0, 10), (2.0, 5)]),
            missing_co_signer_penalty: 5,
            credit_lines: CountPenalty {
                above: 10,
                penalty: 5,
            },
            dependents: CountPenalty {
                above: 3,
                penalty: 5,
            },
            thresholds: RiskThresholds::default(),
        }
    }
}

impl RiskRubric {
    pub fn classify(&self, score: u8) -> RiskLevel {
        self.thresholds.classify(score)
    }

    /// Check that tiers stay mutually exclusive and levels stay ordered.
    pub fn validate(&self) -> Result<(), RubricError> {
        if self.base_score > 100 {
            return Err(RubricError::BaseScoreOutOfRange(self.base_score));
        }

        self.credit_score.validate("credit_score")?;
        self.debt_to_income.validate("debt_to_income")?;
        self.months_employed.validate("months_employed")?;
        self.loan_to_income.validate("loan_to_income")?;

        let RiskThresholds { low, medium, high } = self.thresholds;
        if !(low > medium && medium > high) {
            return Err(RubricError::UnorderedThresholds { low, medium, high });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RubricError {
    #[error("base score must be within 0..=100 (found {0})")]
    BaseScoreOutOfRange(u8),
    #[error("{factor} tiers must have finite bounds")]
    NonFiniteBound { factor: &'static str },
    #[error("{factor} tiers must be ordered from highest to lowest penalty")]
    UnorderedTiers { factor: &'static str },
    #[error("risk thresholds must be strictly descending (low {low}, medium {medium}, high {high})")]
    UnorderedThresholds { low: u8, medium: u8, high: u8 },
}
