use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse risk bucket derived from the numeric score, ordered from least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    /// High and Critical applications are flagged on the review dashboard.
    pub const fn is_elevated(self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }

    pub const fn outlook(self) -> &'static str {
        match self {
            RiskLevel::Low => "This indicates good loan approval chances.",
            RiskLevel::Medium => {
                "This indicates moderate loan approval chances, possibly with a higher interest rate."
            }
            RiskLevel::High => {
                "This indicates lower approval chances or approval with significantly higher interest rates."
            }
            RiskLevel::Critical => "This indicates very low approval chances.",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk level '{0}'")]
pub struct UnknownRiskLevel(pub String);

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            _ => Err(UnknownRiskLevel(value.to_string())),
        }
    }
}
