use crate::infra::{InMemoryLoanRepository, LoggingNotifier};
use crate::server::seed_portfolio;
use chrono::Utc;
use clap::Args;
use loan_intake::error::AppError;
use loan_intake::workflows::lending::applications::{
    LoanApplicationInput, LoanIntakeService, LoanQuery, RiskAssessment, RiskRubric, RiskScorer,
    SortDirection, SortField,
};
use loan_intake::workflows::lending::calculator::{assess_affordability, EmiQuote};
use loan_intake::workflows::lending::SamplePortfolio;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    #[arg(long)]
    pub(crate) credit_score: u16,
    /// Debt-to-income ratio, e.g. 0.31
    #[arg(long)]
    pub(crate) dti: f64,
    #[arg(long)]
    pub(crate) months_employed: u32,
    #[arg(long)]
    pub(crate) loan_amount: f64,
    /// Annual income
    #[arg(long)]
    pub(crate) income: f64,
    #[arg(long)]
    pub(crate) co_signer: bool,
    #[arg(long, default_value_t = 0)]
    pub(crate) credit_lines: u32,
    #[arg(long, default_value_t = 0)]
    pub(crate) dependents: u32,
}

#[derive(Args, Debug)]
pub(crate) struct EmiArgs {
    #[arg(long)]
    pub(crate) principal: f64,
    /// Annual interest rate in percent
    #[arg(long)]
    pub(crate) rate: f64,
    #[arg(long)]
    pub(crate) term_months: u32,
    /// Print the month-by-month amortization schedule
    #[arg(long)]
    pub(crate) schedule: bool,
    /// Monthly income for an affordability check at the advisory rate and term
    #[arg(long)]
    pub(crate) monthly_income: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of synthetic applications to seed
    #[arg(long, default_value_t = 25)]
    pub(crate) samples: usize,
    /// Seed for a reproducible portfolio
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let input = LoanApplicationInput {
        credit_score: args.credit_score,
        dti: args.dti,
        months_employed: args.months_employed,
        loan_amount: args.loan_amount,
        income: args.income,
        has_co_signer: args.co_signer,
        credit_lines: args.credit_lines,
        dependents: args.dependents,
    };

    let assessment = RiskScorer::default().assess(&input)?;
    render_assessment(&assessment);
    Ok(())
}

pub(crate) fn run_emi(args: EmiArgs) -> Result<(), AppError> {
    let quote = EmiQuote::calculate(args.principal, args.rate, args.term_months);
    if quote.is_empty() {
        println!("Principal, rate and term must all be positive to quote an installment.");
        return Ok(());
    }

    println!(
        "Loan of {:.0} at {}% over {} months",
        quote.principal, quote.annual_rate_pct, quote.term_months
    );
    println!("- Monthly installment: {:.0}", quote.monthly_installment);
    println!("- Total payment: {:.0}", quote.total_payment);
    println!("- Total interest: {:.0}", quote.total_interest);

    if args.schedule {
        println!("\nMonth | Payment | Principal | Interest | Balance");
        for row in quote.schedule() {
            println!(
                "{:>5} | {:>9.2} | {:>9.2} | {:>8.2} | {:>10.2}",
                row.month, row.payment, row.principal, row.interest, row.balance
            );
        }
    }

    if let Some(monthly_income) = args.monthly_income {
        let affordability = assess_affordability(monthly_income, args.principal)?;
        println!(
            "\nAffordability: {:.0}% of monthly income ({:?}), {}",
            affordability.payment_to_income_pct,
            affordability.band,
            affordability.band.guidance()
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryLoanRepository::default());
    let notifier = Arc::new(LoggingNotifier);
    let service = LoanIntakeService::new(repository, notifier, RiskRubric::default());

    let seeded = match args.seed {
        Some(seed) => {
            let records =
                SamplePortfolio::seeded(seed).generate(args.samples, service.scorer(), Utc::now())?;
            for record in records {
                service.import(record)?;
            }
            args.samples
        }
        None => seed_portfolio(&service, args.samples)?,
    };

    println!("Loan portfolio demo ({seeded} synthetic applications)");
    let stats = service.stats()?;
    println!("- Total loan amount: {:.0}", stats.total_loan_amount);
    println!("- Average risk score: {}", stats.average_risk_score);
    println!(
        "- High or critical risk: {} ({}%)",
        stats.high_risk_count, stats.high_risk_percentage
    );
    println!(
        "- By level: {} low | {} medium | {} high | {} critical",
        stats.by_level.low, stats.by_level.medium, stats.by_level.high, stats.by_level.critical
    );

    let riskiest = LoanQuery {
        sort: SortField::RiskScore,
        direction: SortDirection::Asc,
        ..LoanQuery::default()
    };
    let flagged: Vec<_> = service
        .list(&riskiest)?
        .into_iter()
        .filter(|record| record.risk_level().is_elevated())
        .collect();

    if flagged.is_empty() {
        println!("\nHigh-risk applications: none");
    } else {
        println!("\nHigh-risk applications");
        for record in flagged {
            let level = record.risk_level();
            println!(
                "- {} | amount {:.0} | credit {} | score {} ({})",
                record.application.loan_id,
                record.application.loan_amount,
                record.application.credit_score,
                record.risk_score(),
                level.label()
            );
        }
    }

    Ok(())
}

fn render_assessment(assessment: &RiskAssessment) {
    println!("Risk score: {}/100", assessment.score);
    println!("Risk level: {}", assessment.level);
    println!("{}", assessment.level.outlook());

    println!("\nPenalties");
    for component in assessment.components.iter().filter(|c| c.penalty > 0) {
        println!(
            "- {:?}: -{} ({})",
            component.factor, component.penalty, component.notes
        );
    }
}
