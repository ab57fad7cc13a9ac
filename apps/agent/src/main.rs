#![warn(clippy::all, clippy::pedantic)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use urlprobe::{AgentConfig, Fanout, FileReporter, HttpProber, Scheduler, TracingReporter};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    logger::init(cli.log_level);

    let mut config = AgentConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if let Some(timeout) = cli.timeout {
        info!("Overriding probe timeout with {}s", timeout);
        config.preferences.timeout = Duration::from_secs(timeout);
    }

    if cli.check {
        print!("{config}");
        return Ok(());
    }

    run(config, cli.log_file.as_deref()).await
}

async fn run(config: AgentConfig, log_file: Option<&Path>) -> Result<()> {
    let prober = HttpProber::new(&config.preferences.prober_settings())
        .context("Failed to build HTTP client")?;

    let mut reporter = Fanout::new().with(Arc::new(TracingReporter));
    if let Some(path) = log_file {
        let file = FileReporter::open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        reporter = reporter.with(Arc::new(file));
    }

    let scheduler = Scheduler::new(config.checks, Arc::new(prober), Arc::new(reporter));
    scheduler.run_until(shutdown_signal()).await;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C"),
        Err(e) => error!("Failed to listen for Ctrl-C: {}", e),
    }
}
