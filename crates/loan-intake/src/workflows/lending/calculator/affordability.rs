use serde::{Deserialize, Serialize};

use super::emi::monthly_installment;
use crate::workflows::lending::applications::RiskInputError;

pub const ADVISORY_TERM_MONTHS: u32 = 36;
pub const ADVISORY_ANNUAL_RATE_PCT: f64 = 10.0;

const COMFORTABLE_BELOW_PCT: f64 = 30.0;
const STRETCHED_BELOW_PCT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityBand {
    Comfortable,
    Stretched,
    Excessive,
}

impl AffordabilityBand {
    pub const fn guidance(self) -> &'static str {
        match self {
            AffordabilityBand::Comfortable => {
                "generally considered safe; most lenders recommend keeping debt-to-income below 40%"
            }
            AffordabilityBand::Stretched => {
                "approaching the upper limit lenders recommend; consider a smaller loan or longer tenure"
            }
            AffordabilityBand::Excessive => {
                "exceeds the recommended 40% debt-to-income ratio and may strain repayment"
            }
        }
    }
}

/// Estimated installment burden for a prospective loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub monthly_income: f64,
    pub loan_amount: f64,
    pub estimated_installment: f64,
    pub payment_to_income_pct: f64,
    pub band: AffordabilityBand,
}

/// Check repayment ability assuming a 36-month loan at 10% annual interest.
pub fn assess_affordability(
    monthly_income: f64,
    loan_amount: f64,
) -> Result<AffordabilityAssessment, RiskInputError> {
    if !monthly_income.is_finite() {
        return Err(RiskInputError::NonFinite {
            field: "monthly_income",
        });
    }
    if !loan_amount.is_finite() {
        return Err(RiskInputError::NonFinite {
            field: "loan_amount",
        });
    }
    if monthly_income <= 0.0 {
        return Err(RiskInputError::NonPositiveIncome(monthly_income));
    }

    let installment =
        monthly_installment(loan_amount, ADVISORY_ANNUAL_RATE_PCT, ADVISORY_TERM_MONTHS)
            .unwrap_or(0.0);
    let ratio = installment / monthly_income * 100.0;

    let band = if ratio < COMFORTABLE_BELOW_PCT {
        AffordabilityBand::Comfortable
    } else if ratio < STRETCHED_BELOW_PCT {
        AffordabilityBand::Stretched
    } else {
        AffordabilityBand::Excessive
    };

    Ok(AffordabilityAssessment {
        monthly_income,
        loan_amount,
        estimated_installment: installment.round(),
        payment_to_income_pct: ratio.round(),
        band,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_installment_burden() {
        // 36 months at 10% costs about 3.23% of principal per month.
        let comfortable = assess_affordability(100_000.0, 500_000.0).expect("valid");
        assert_eq!(comfortable.estimated_installment, 16_134.0);
        assert_eq!(comfortable.band, AffordabilityBand::Comfortable);

        let stretched = assess_affordability(50_000.0, 500_000.0).expect("valid");
        assert_eq!(stretched.payment_to_income_pct, 32.0);
        assert_eq!(stretched.band, AffordabilityBand::Stretched);

        let excessive = assess_affordability(30_000.0, 500_000.0).expect("valid");
        assert_eq!(excessive.band, AffordabilityBand::Excessive);
    }

    #[test]
    fn rejects_missing_income() {
        assert_eq!(
            assess_affordability(0.0, 100_000.0),
            Err(RiskInputError::NonPositiveIncome(0.0))
        );
        assert!(matches!(
            assess_affordability(f64::INFINITY, 100_000.0),
            Err(RiskInputError::NonFinite { .. })
        ));
    }
}
