use crate::estimate::{run_constants, run_estimate, EstimateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruitment_savings::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruitment Savings Estimator",
    about = "Estimate the cost of vacant restaurant positions and the savings of delegated recruitment",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service with the estimator form (default command)
    Serve(ServeArgs),
    /// Compute one estimate and print it
    Estimate(EstimateArgs),
    /// Print the sector figures used by every estimate
    Constants,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Constants => run_constants(),
    }
}
