use crate::demo::{run_assess, run_demo, run_emi, AssessArgs, DemoArgs, EmiArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Intake",
    about = "Run the loan intake service or score applications from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single borrower and print the penalty breakdown
    Assess(AssessArgs),
    /// Quote an equated monthly installment
    Emi(EmiArgs),
    /// Seed a synthetic portfolio and print dashboard statistics
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the number of synthetic applications seeded at startup
    #[arg(long)]
    pub(crate) seed_samples: Option<usize>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Assess(args) => run_assess(args),
        Command::Emi(args) => run_emi(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["loan-intake-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_requires_the_scoring_fields() {
        let cli = Cli::try_parse_from([
            "loan-intake-api",
            "assess",
            "--credit-score",
            "712",
            "--dti",
            "0.31",
            "--months-employed",
            "30",
            "--loan-amount",
            "250000",
            "--income",
            "90000",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Assess(args)) => {
                assert_eq!(args.credit_score, 712);
                assert!(!args.co_signer);
                assert_eq!(args.credit_lines, 0);
            }
            other => panic!("expected assess command, got {other:?}"),
        }

        assert!(Cli::try_parse_from(["loan-intake-api", "assess", "--income", "1"]).is_err());
    }
}
