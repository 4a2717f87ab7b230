use crate::console::{run_ask, run_clients, run_evaluate, run_history};
use crate::console::{AskArgs, ClientsArgs, EvaluateArgs, HistoryArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_advisor::config::AppConfig;
use credit_advisor::error::AppError;
use credit_advisor::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Credit Advisor",
    about = "Evaluate credit applications from the command line or serve the credit form API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    storage: StorageArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a credit application and record it in the history
    Evaluate(EvaluateArgs),
    /// List or search client names in the directory
    Clients(ClientsArgs),
    /// Show the most recent evaluations
    History(HistoryArgs),
    /// Ask the advisor a free-text question
    Ask(AskArgs),
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

#[derive(Args, Debug, Default)]
struct StorageArgs {
    /// Override the client directory CSV
    #[arg(long, global = true)]
    clients_csv: Option<PathBuf>,
    /// Override the evaluation history CSV
    #[arg(long, global = true)]
    history_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(path) = cli.storage.clients_csv {
        config.storage.clients_csv = path;
    }
    if let Some(path) = cli.storage.history_csv {
        config.storage.history_csv = path;
    }

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Evaluate(args) => run_evaluate(&config, args),
        Command::Clients(args) => run_clients(&config, args),
        Command::History(args) => run_history(&config, args),
        Command::Ask(args) => run_ask(&config, args).await,
    }
}
