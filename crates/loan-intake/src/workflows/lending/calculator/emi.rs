use serde::{Deserialize, Serialize};

/// Longest term quoted, one hundred years.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Raw equated monthly installment for a fixed-rate loan.
///
/// Returns `None` unless principal, rate and term are all positive and finite,
/// the term is at most [`MAX_TERM_MONTHS`], and the result stays finite.
pub fn monthly_installment(principal: f64, annual_rate_pct: f64, term_months: u32) -> Option<f64> {
    if !(principal.is_finite() && annual_rate_pct.is_finite()) {
        return None;
    }
    if principal <= 0.0 || annual_rate_pct <= 0.0 || term_months == 0 {
        return None;
    }
    if term_months > MAX_TERM_MONTHS {
        return None;
    }

    let periods = i32::try_from(term_months).ok()?;
    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    let growth = (1.0 + monthly_rate).powi(periods);
    let installment = principal * growth * monthly_rate / (growth - 1.0);

    (growth.is_finite() && installment.is_finite()).then_some(installment)
}

/// Installment, total payment and total interest rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiQuote {
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub term_months: u32,
    pub monthly_installment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl EmiQuote {
    /// Quote a loan. Invalid inputs yield an all-zero quote.
    pub fn calculate(principal: f64, annual_rate_pct: f64, term_months: u32) -> Self {
        let (monthly, total, interest) =
            match monthly_installment(principal, annual_rate_pct, term_months) {
                Some(emi) => {
                    let total = emi * f64::from(term_months);
                    (emi.round(), total.round(), (total - principal).round())
                }
                None => (0.0, 0.0, 0.0),
            };

        Self {
            principal,
            annual_rate_pct,
            term_months,
            monthly_installment: monthly,
            total_payment: total,
            total_interest: interest,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_installment == 0.0
    }

    /// Month-by-month amortization, amounts rounded to cents.
    pub fn schedule(&self) -> Vec<AmortizationRow> {
        let Some(emi) = monthly_installment(self.principal, self.annual_rate_pct, self.term_months)
        else {
            return Vec::new();
        };

        let monthly_rate = self.annual_rate_pct / 100.0 / 12.0;
        let mut balance = self.principal;
        let mut rows = Vec::with_capacity(self.term_months as usize);

        for month in 1..=self.term_months {
            let interest = balance * monthly_rate;
            let mut principal = emi - interest;
            if month == self.term_months {
                principal = balance;
            }
            balance = (balance - principal).max(0.0);

            rows.push(AmortizationRow {
                month,
                payment: cents(principal + interest),
                principal: cents(principal),
                interest: cents(interest),
                balance: cents(balance),
            });
        }

        rows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

fn cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
