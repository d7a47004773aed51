//! Synthetic applications for demos and dashboard seeding.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::applications::{
    ApplicantDetails, ApplicationId, Education, EmploymentType, LoanApplicationSubmission,
    LoanPurpose, LoanRecord, MaritalStatus, RiskInputError, RiskScorer,
};

const LOAN_TERMS: [u32; 9] = [12, 24, 36, 48, 60, 120, 180, 240, 360];
const LOOKBACK_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Generates plausible applications within the ranges the intake form accepts.
pub struct SamplePortfolio {
    rng: StdRng,
}

impl SamplePortfolio {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Loan reference in the `LN-XXXXXXXX` format.
    pub fn loan_reference(&mut self) -> String {
        format!("LN-{}", self.rng.gen_range(10_000_000..100_000_000u32))
    }

    pub fn submission(&mut self) -> LoanApplicationSubmission {
        let loan_id = self.loan_reference();
        let rng = &mut self.rng;

        LoanApplicationSubmission {
            loan_id,
            age: rng.gen_range(21..71),
            income: f64::from(rng.gen_range(30_000..180_000u32)),
            loan_amount: f64::from(rng.gen_range(5_000..505_000u32)),
            credit_score: rng.gen_range(550..850),
            months_employed: rng.gen_range(3..123),
            credit_lines: rng.gen_range(1..13),
            interest_rate: rng.gen_range(3.0..18.0),
            loan_term: *LOAN_TERMS.choose(rng).unwrap_or(&36),
            dti: rng.gen_range(0.1..0.6),
            education: *Education::ALL.choose(rng).unwrap_or(&Education::Other),
            employment_type: *EmploymentType::ALL
                .choose(rng)
                .unwrap_or(&EmploymentType::FullTime),
            marital_status: *MaritalStatus::ALL
                .choose(rng)
                .unwrap_or(&MaritalStatus::Single),
            has_mortgage: rng.gen_bool(0.5),
            dependents: rng.gen_range(0..5),
            loan_purpose: *LoanPurpose::ALL.choose(rng).unwrap_or(&LoanPurpose::Other),
            has_co_signer: rng.gen_bool(0.3),
            applicant: ApplicantDetails::default(),
        }
    }

    /// Score `count` synthetic applications submitted within the 30 days before `now`.
    pub fn generate(
        &mut self,
        count: usize,
        scorer: &RiskScorer,
        now: DateTime<Utc>,
    ) -> Result<Vec<LoanRecord>, RiskInputError> {
        let mut records = Vec::with_capacity(count);

        for index in 0..count {
            let application = self.submission();
            let assessment = scorer.assess(&application.risk_input())?;
            let age = Duration::seconds(self.rng.gen_range(0..LOOKBACK_SECONDS));

            records.push(LoanRecord {
                id: ApplicationId(format!("sample-{:03}", index + 1)),
                application,
                assessment,
                submitted_at: now - age,
            });
        }

        records.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_portfolios_are_reproducible() {
        let scorer = RiskScorer::default();
        let now = Utc::now();

        let first = SamplePortfolio::seeded(7)
            .generate(5, &scorer, now)
            .expect("samples score");
        let second = SamplePortfolio::seeded(7)
            .generate(5, &scorer, now)
            .expect("samples score");

        assert_eq!(first, second);
    }

    #[test]
    fn samples_stay_within_intake_bounds() {
        let scorer = RiskScorer::default();
        let now = Utc::now();
        let records = SamplePortfolio::seeded(42)
            .generate(20, &scorer, now)
            .expect("samples score");

        assert_eq!(records.len(), 20);
        for pair in records.windows(2) {
            assert!(pair[0].submitted_at >= pair[1].submitted_at);
        }
        for record in &records {
            assert!(record.application.loan_id.starts_with("LN-"));
            assert_eq!(record.application.loan_id.len(), 11);
            assert!(record.submitted_at <= now);
            assert!(now - record.submitted_at <= Duration::days(30));
            assert!(record.assessment.score <= 100);
            assert_eq!(
                scorer.classify(record.assessment.score),
                record.assessment.level
            );
        }
    }
}
