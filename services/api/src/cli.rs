use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use taxprep_ai::error::AppError;

use crate::demo::{run_demo, run_estimate, DemoArgs, EstimateArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Tax Intake Orchestrator",
    about = "Demonstrate and run the tax-office intake and routing service from the command line",
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
    /// Print the appointment-length table for a given complexity score
    Estimate(EstimateArgs),
    /// Run an end-to-end CLI demo covering intake, checklist, and routing
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
    /// Staff roster CSV to seed instead of the built-in directory
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Demo(args) => run_demo(args),
    }
}
