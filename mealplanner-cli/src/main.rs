use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use mealplanner_lib::{ClientConfig, Error, HttpBackend, Planner};
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod form;
mod records;

#[derive(Parser, Debug)]
#[command(name = "mealplanner")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Override the backend base URL
    #[arg(short, long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List records, most recent first
    List,
    /// Show one record in full
    Show { id: String },
    /// Create a new record
    New(form::NewArgs),
    /// Edit an existing record
    Edit(form::EditArgs),
}

/// Why a command could not complete.
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Config(#[from] mealplanner_lib::ConfigError),
    /// Fetching the records failed
    #[error("{message}")]
    Load { error: Error, message: String },
    #[error("No record with id '{0}'")]
    UnknownRecord(String),
    /// The draft failed validation and was never sent
    #[error("{0}")]
    Invalid(String),
    /// The create or update request failed
    #[error("{message}")]
    Rejected { error: Error, message: String },
}

impl Failure {
    fn exit_code(&self) -> sysexits::ExitCode {
        match self {
            Failure::Config(_) => sysexits::ExitCode::Config,
            Failure::Load { error, .. } | Failure::Rejected { error, .. } => {
                request_exit_code(error)
            }
            Failure::UnknownRecord(_) => sysexits::ExitCode::Usage,
            Failure::Invalid(_) => sysexits::ExitCode::DataErr,
        }
    }
}

fn request_exit_code(error: &Error) -> sysexits::ExitCode {
    match error {
        Error::Transport(_) => sysexits::ExitCode::Unavailable,
        Error::Validation(_) | Error::Api { .. } => sysexits::ExitCode::DataErr,
        Error::Config(_) => sysexits::ExitCode::Config,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to install the log subscriber");
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("{} {failure}", "error:".red().bold());
            failure.exit_code().into()
        }
    }
}

async fn run(cli: Cli) -> Result<(), Failure> {
    let cfg = ClientConfig::load()?.with_base_url(cli.base_url);
    let mut planner = Planner::new(HttpBackend::new(cfg.base_url()));

    match &cli.command {
        Command::List => records::list(&mut planner).await,
        Command::Show { id } => records::show(&mut planner, id).await,
        Command::New(args) => form::new(&mut planner, args).await,
        Command::Edit(args) => form::edit(&mut planner, args).await,
    }
}
