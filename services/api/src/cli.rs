use crate::report::{run_policy_dump, run_score_report, PolicyArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rig_ready::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rig-ready",
    about = "Score welding résumés for practical weld test readiness",
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
    /// Score résumé text files and print a ranked summary
    Score(ScoreArgs),
    /// Print the effective scoring rubric as JSON
    Policy(PolicyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON rubric to score with instead of RIGREADY_POLICY_PATH
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score_report(args).await,
        Command::Policy(args) => run_policy_dump(args),
    }
}
