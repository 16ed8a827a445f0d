//! nx-batch - command-line front end for the deterministic batch execution core.

mod output;
mod parser;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nx_batch_core::application::{
    build_execution_graph, create_session, derive_session_id, DeterministicExecutionEngine, ReplayDriver,
    RetryExecutor,
};
use nx_batch_core::domain::plan_batch;
use nx_batch_core::port::executor::mocks::FixedJobExecutor;
use nx_batch_core::port::{InMemoryExecutionReplaySource, NullExecutionRecorder, NullObserver};
use output::OutputFormat;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERSION: &str = nx_batch_core::VERSION;

#[derive(Parser)]
#[command(name = "nx-batch")]
#[command(about = "Deterministic batch execution core CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan and execute a batch of commands read from a file
    Run {
        /// Path to a file with one command per line
        file: PathBuf,
    },

    /// Replay and structurally verify a persisted record set
    Replay {
        /// Path to a JSON array of ExecutionRecord values
        records: PathBuf,
    },
}

fn init_logging() {
    let log_format = std::env::var("NX_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nx_batch=info"));

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

fn run(file: PathBuf, format: OutputFormat) -> Result<()> {
    let contents = std::fs::read_to_string(&file)
        .with_context(|| format!("reading batch file {}", file.display()))?;
    let commands = parser::parse_batch(&contents);

    let plan = plan_batch(&commands);
    let session_id = derive_session_id(&commands);
    let session = create_session(session_id, &commands, &NullObserver);
    let graph = build_execution_graph(&session, &NullObserver);

    let executor = FixedJobExecutor::success();
    let engine = DeterministicExecutionEngine::new(&graph, &executor, None)?;
    let result = engine.execute_all()?;

    info!(jobs_executed = result.jobs_executed, "run finished");
    output::print_plan_and_result(format, &plan, &result);

    if !result.all_jobs_completed {
        std::process::exit(1);
    }
    Ok(())
}

fn replay(records_path: PathBuf, format: OutputFormat) -> Result<()> {
    let contents = std::fs::read_to_string(&records_path)
        .with_context(|| format!("reading records file {}", records_path.display()))?;
    let source = InMemoryExecutionReplaySource::from_json(&contents)
        .context("parsing persisted execution records")?;

    let executor = FixedJobExecutor::success();
    let recorder = NullExecutionRecorder;
    let retry_executor = RetryExecutor::new(&executor, Some(&recorder));
    let driver = ReplayDriver::new(retry_executor, nx_batch_core::domain::SessionId::new("replay"));

    let report = driver.replay_and_verify(&source);
    output::print_replay_report(format, &report);

    if !report.deterministic_match {
        std::process::exit(1);
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    info!(version = VERSION, "nx-batch starting");

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { file } => run(file, cli.format),
        Commands::Replay { records } => replay(records, cli.format),
    }
}
