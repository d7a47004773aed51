use super::super::domain::LoanApplicationInput;
use super::config::RiskRubric;
use super::{RiskComponent, RiskFactor};

/// Apply every rubric factor to an already validated input.
///
/// Returns the per-factor trail and the score clamped to `0..=100`.
pub(crate) fn score_input(
    input: &LoanApplicationInput,
    rubric: &RiskRubric,
) -> (Vec<RiskComponent>, u8) {
    let mut components = Vec::with_capacity(7);

    let credit_penalty = rubric.credit_score.penalty_for(f64::from(input.credit_score));
    components.push(RiskComponent {
        factor: RiskFactor::CreditScore,
        penalty: credit_penalty,
        notes: format!("credit score {}", input.credit_score),
    });

    let dti_penalty = rubric.debt_to_income.penalty_for(input.dti);
    components.push(RiskComponent {
        factor: RiskFactor::DebtToIncome,
        penalty: dti_penalty,
        notes: format!("debt-to-income {:.2}", input.dti),
    });

    let employment_penalty = rubric
        .months_employed
        .penalty_for(f64::from(input.months_employed));
    components.push(RiskComponent {
        factor: RiskFactor::EmploymentHistory,
        penalty: employment_penalty,
        notes: format!("{} month(s) employed", input.months_employed),
    });

    let loan_to_income = input.loan_to_income();
    let lti_penalty = rubric.loan_to_income.penalty_for(loan_to_income);
    components.push(RiskComponent {
        factor: RiskFactor::LoanToIncome,
        penalty: lti_penalty,
        notes: format!("loan-to-income {loan_to_income:.2}"),
    });

    let (co_signer_penalty, co_signer_note) = if input.has_co_signer {
        (0, "co-signer provided")
    } else {
        (rubric.missing_co_signer_penalty, "no co-signer")
    };
    components.push(RiskComponent {
        factor: RiskFactor::CoSigner,
        penalty: co_signer_penalty,
        notes: co_signer_note.to_string(),
    });

    components.push(RiskComponent {
        factor: RiskFactor::CreditLines,
        penalty: rubric.credit_lines.penalty_for(input.credit_lines),
        notes: format!(
            "{} open credit line(s), limit {}",
            input.credit_lines, rubric.credit_lines.above
        ),
    });

    components.push(RiskComponent {
        factor: RiskFactor::Dependents,
        penalty: rubric.dependents.penalty_for(input.dependents),
        notes: format!(
            "{} dependent(s), limit {}",
            input.dependents, rubric.dependents.above
        ),
    });

    let total_penalty: i32 = components
        .iter()
        .map(|component| i32::from(component.penalty))
        .sum();
    let score = (i32::from(rubric.base_score) - total_penalty).clamp(0, 100) as u8;

    (components, score)
}
