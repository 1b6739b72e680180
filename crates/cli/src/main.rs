//! Preflight - pre-flight health check for the trading system
//!
//! Runs the staged verification pipeline against the mock or the live
//! backend, prints the report and exits 0 (HEALTHY), 1 (DEGRADED) or
//! 2 (CRITICAL, or a wiring fault before any check ran).

mod config;
mod logging;
mod render;
mod wiring;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use config::Settings;
use preflight_core::application::{standard_plan, PipelineExecutor};
use preflight_core::domain::BackendMode;
use preflight_core::port::id_provider::UuidProvider;
use preflight_core::port::time_provider::SystemTimeProvider;
use render::OutputFormat;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIRING_FAULT_EXIT: u8 = 2;

#[derive(Parser)]
#[command(name = "preflight")]
#[command(about = "Pre-flight health check for the trading system", long_about = None)]
#[command(version)]
struct Cli {
    /// Report format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Use the mock backend regardless of PREFLIGHT_MOCK
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(WIRING_FAULT_EXIT)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // 1. Configuration
    let settings = Settings::load().context("Failed to load configuration")?;
    let mode = if cli.mock {
        BackendMode::Mock
    } else {
        settings.mode()
    };

    info!(
        version = VERSION,
        core = preflight_core::VERSION,
        backend = %mode,
        "Preflight starting"
    );

    // 2. Mode switch (DI wiring)
    let backend = wiring::build_backend(mode, &settings).context("Failed to wire backend")?;
    let plan = standard_plan().context("Failed to build check plan")?;

    let executor = PipelineExecutor::new(
        mode,
        backend,
        settings.pipeline(),
        Arc::new(SystemTimeProvider),
        Arc::new(UuidProvider),
    );

    // 3. Run and report
    let report = executor.run(&plan).await;
    let rendered = render::render(&report, cli.format).context("Failed to render report")?;
    println!("{}", rendered);

    Ok(ExitCode::from(report.exit_code()))
}
