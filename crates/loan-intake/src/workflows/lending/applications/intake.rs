use super::domain::LoanApplicationSubmission;

/// Validation errors raised before an application reaches the scorer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("loan id is required")]
    MissingLoanId,
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} must be greater than zero (found {found})")]
    NotPositive { field: &'static str, found: f64 },
    #[error("{field} must be at least {min} (found {found})")]
    BelowMinimum {
        field: &'static str,
        min: f64,
        found: f64,
    },
    #[error("{field} must be within {min}..={max} (found {found})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        found: f64,
    },
}

/// Bounds enforced on borrower-entered values.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeLimits {
    pub age: (u8, u8),
    pub minimum_loan_amount: f64,
    pub interest_rate: (f64, f64),
    pub credit_score: (u16, u16),
    pub dti: (f64, f64),
    pub max_dependents: u32,
}

impl Default for IntakeLimits {
    fn default() -> Self {
        Self {
            age: (18, 100),
            minimum_loan_amount: 1000.0,
            interest_rate: (0.0, 30.0),
            credit_score: (300, 850),
            dti: (0.0, 1.0),
            max_dependents: 20,
        }
    }
}

/// Guard responsible for admitting submissions into the portfolio.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    limits: IntakeLimits,
}

impl IntakeGuard {
    pub fn with_limits(limits: IntakeLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &IntakeLimits {
        &self.limits
    }

    /// Validate and normalize an inbound submission. The first violation wins.
    pub fn admit(
        &self,
        mut submission: LoanApplicationSubmission,
    ) -> Result<LoanApplicationSubmission, IntakeViolation> {
        let loan_id = submission.loan_id.trim();
        if loan_id.is_empty() {
            return Err(IntakeViolation::MissingLoanId);
        }
        submission.loan_id = loan_id.to_string();

        for (field, value) in [
            ("income", submission.income),
            ("loan_amount", submission.loan_amount),
            ("interest_rate", submission.interest_rate),
            ("dti", submission.dti),
        ] {
            if !value.is_finite() {
                return Err(IntakeViolation::NonFinite { field });
            }
        }

        let limits = &self.limits;
        within("age", f64::from(submission.age), limits.age.0, limits.age.1)?;

        if submission.income <= 0.0 {
            return Err(IntakeViolation::NotPositive {
                field: "income",
                found: submission.income,
            });
        }

        if submission.loan_amount < limits.minimum_loan_amount {
            return Err(IntakeViolation::BelowMinimum {
                field: "loan_amount",
                min: limits.minimum_loan_amount,
                found: submission.loan_amount,
            });
        }

        within(
            "interest_rate",
            submission.interest_rate,
            limits.interest_rate.0,
            limits.interest_rate.1,
        )?;

        if submission.loan_term == 0 {
            return Err(IntakeViolation::NotPositive {
                field: "loan_term",
                found: 0.0,
            });
        }

        within(
            "credit_score",
            f64::from(submission.credit_score),
            limits.credit_score.0,
            limits.credit_score.1,
        )?;
        within("dti", submission.dti, limits.dti.0, limits.dti.1)?;
        within(
            "dependents",
            f64::from(submission.dependents),
            0,
            limits.max_dependents,
        )?;

        Ok(submission)
    }
}

fn within<T: Into<f64>>(
    field: &'static str,
    found: f64,
    min: T,
    max: T,
) -> Result<(), IntakeViolation> {
    let (min, max) = (min.into(), max.into());
    if found < min || found > max {
        return Err(IntakeViolation::OutOfRange {
            field,
            min,
            max,
            found,
        });
    }
    Ok(())
}
