//! Command line entry point.
//!
//! `staff-report run <location>` writes one report and prints
//! `SUCCESS:<path>` on stdout. `staff-report serve` starts the HTTP API and
//! the weekly scheduler. Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use staff_report::api::{AppState, create_router};
use staff_report::config::{ConfigLoader, ReportConfig};
use staff_report::engine::ReportEngine;
use staff_report::error::ReportResult;
use staff_report::schedule::{build_jobs, spawn_scheduler};

/// Marker prefixed to the report path on success.
const SUCCESS_MARKER: &str = "SUCCESS:";

#[derive(Parser, Debug)]
#[command(name = "staff-report", version, about = "Staff document expiry reports")]
struct Cli {
    /// Configuration file; built-in defaults are used when it is absent.
    #[arg(long, global = true, default_value = "config/report.yaml")]
    config: PathBuf,

    /// Directory holding the input workbooks.
    #[arg(long, global = true)]
    tables_dir: Option<PathBuf>,

    /// Directory the reports are written to.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the report for one location.
    Run {
        /// Location key (e.g. "kievskaya").
        location: String,
    },
    /// Serve the HTTP API and run the weekly schedule.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "0.0.0.0:8080")]
        addr: String,

        /// Do not start the weekly schedule.
        #[arg(long)]
        no_schedule: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Run { location } => run_once(config, &location),
        Command::Serve { addr, no_schedule } => serve(config, &addr, no_schedule),
    }
}

fn load_config(cli: &Cli) -> ReportResult<ReportConfig> {
    let mut config = ConfigLoader::load_or_default(&cli.config)?.into_config();
    if let Some(dir) = &cli.tables_dir {
        config.sources.tables_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    Ok(config)
}

fn run_once(config: ReportConfig, location: &str) -> ExitCode {
    let engine = ReportEngine::new(config);
    match engine.run(location) {
        Ok(outcome) => {
            println!("{}{}", SUCCESS_MARKER, outcome.path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(location, error = %err, "Report failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn serve(config: ReportConfig, addr: &str, no_schedule: bool) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "Failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(serve_async(config, addr, no_schedule)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(error = %message, "Server stopped");
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn serve_async(config: ReportConfig, addr: &str, no_schedule: bool) -> Result<(), String> {
    let engine = Arc::new(ReportEngine::new(config));

    if !no_schedule {
        let jobs = build_jobs(&engine.config().schedule, &engine).map_err(|e| e.to_string())?;
        info!(jobs = jobs.len(), "Starting weekly schedule");
        spawn_scheduler(Arc::clone(&engine), jobs);
    }

    let router = create_router(AppState::from_shared(engine));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("failed to bind {}: {}", addr, e))?;
    info!(addr, "Listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| e.to_string())
}
