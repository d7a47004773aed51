use super::common::*;
use crate::workflows::lending::applications::intake::{IntakeGuard, IntakeLimits, IntakeViolation};

#[test]
fn admits_valid_submissions_and_trims_the_loan_id() {
    let guard = IntakeGuard::default();
    let admitted = guard
        .admit(submission_with_id("  LN-10000001 "))
        .expect("valid submission");

    assert_eq!(admitted.loan_id, "LN-10000001");
    assert_eq!(admitted.applicant, submission().applicant);
}

#[test]
fn rejects_blank_loan_ids() {
    let guard = IntakeGuard::default();
    assert_eq!(
        guard.admit(submission_with_id("   ")),
        Err(IntakeViolation::MissingLoanId)
    );
}

#[test]
fn rejects_values_outside_form_bounds() {
    let guard = IntakeGuard::default();

    let mut minor = submission();
    minor.age = 17;
    assert!(matches!(
        guard.admit(minor),
        Err(IntakeViolation::OutOfRange { field: "age", .. })
    ));

    let mut small_loan = submission();
    small_loan.loan_amount = 999.0;
    assert_eq!(
        guard.admit(small_loan),
        Err(IntakeViolation::BelowMinimum {
            field: "loan_amount",
            min: 1000.0,
            found: 999.0,
        })
    );

    let mut usurious = submission();
    usurious.interest_rate = 31.0;
    assert!(matches!(
        guard.admit(usurious),
        Err(IntakeViolation::OutOfRange {
            field: "interest_rate",
            ..
        })
    ));

    let mut no_term = submission();
    no_term.loan_term = 0;
    assert!(matches!(
        guard.admit(no_term),
        Err(IntakeViolation::NotPositive {
            field: "loan_term",
            ..
        })
    ));

    let mut thin_file = submission();
    thin_file.credit_score = 299;
    assert!(matches!(
        guard.admit(thin_file),
        Err(IntakeViolation::OutOfRange {
            field: "credit_score",
            ..
        })
    ));

    let mut overextended = submission();
    overextended.dti = 1.2;
    assert!(matches!(
        guard.admit(overextended),
        Err(IntakeViolation::OutOfRange { field: "dti", .. })
    ));

    let mut large_household = submission();
    large_household.dependents = 21;
    assert!(matches!(
        guard.admit(large_household),
        Err(IntakeViolation::OutOfRange {
            field: "dependents",
            ..
        })
    ));
}

#[test]
fn rejects_missing_income_before_scoring() {
    let guard = IntakeGuard::default();

    let mut zero_income = submission();
    zero_income.income = 0.0;
    assert_eq!(
        guard.admit(zero_income),
        Err(IntakeViolation::NotPositive {
            field: "income",
            found: 0.0,
        })
    );

    let mut undefined_income = submission();
    undefined_income.income = f64::NAN;
    assert_eq!(
        guard.admit(undefined_income),
        Err(IntakeViolation::NonFinite { field: "income" })
    );
}

#[test]
fn custom_limits_are_respected() {
    let guard = IntakeGuard::with_limits(IntakeLimits {
        minimum_loan_amount: 500_000.0,
        ..IntakeLimits::default()
    });

    assert_eq!(guard.limits().minimum_loan_amount, 500_000.0);
    assert!(matches!(
        guard.admit(submission()),
        Err(IntakeViolation::BelowMinimum { .. })
    ));
}

#[test]
fn violations_describe_the_field() {
    let violation = IntakeViolation::OutOfRange {
        field: "credit_score",
        min: 300.0,
        max: 850.0,
        found: 900.0,
    };
    assert_eq!(
        violation.to_string(),
        "credit_score must be within 300..=850 (found 900)"
    );
}
