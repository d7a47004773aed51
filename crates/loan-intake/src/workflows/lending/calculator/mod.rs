//! Repayment arithmetic shared by the calculator endpoints and the advisory estimate.

mod affordability;
mod emi;

pub use affordability::{
    assess_affordability, AffordabilityAssessment, AffordabilityBand, ADVISORY_ANNUAL_RATE_PCT,
    ADVISORY_TERM_MONTHS,
};
pub use emi::{monthly_installment, AmortizationRow, EmiQuote, MAX_TERM_MONTHS};
