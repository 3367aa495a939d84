//! Kyro daemon entry point
//!
//! Loads the configuration, resolves the node label and runs the failover
//! scheduler until Ctrl-C (or a single pass with `--once`).

mod config;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use config::{AppConfig, EXAMPLE_FILE};
use kyro_core::types::FailoverSettings;
use kyro_core::{Scheduler, ServiceContext};
use kyro_provider::{CloudflareProvider, DnsProvider};
use kyro_toolbox::ToolboxService;

#[derive(Debug, Parser)]
#[command(name = "kyro", version, about = "DNS failover for Cloudflare-hosted records")]
struct Cli {
    /// Configuration file
    #[arg(short, long, env = "KYRO_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Write config.example.json and exit
    #[arg(long)]
    write_example: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.write_example {
        return match AppConfig::write_example(Path::new(EXAMPLE_FILE)) {
            Ok(()) => {
                println!("Wrote {EXAMPLE_FILE}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to write {EXAMPLE_FILE}: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => return config_failure(&e),
    };

    telemetry::init(config.log_level);

    let needs_node_label = config.needs_node_label();
    let api_token = config.api_token.clone();
    let settings = match config.into_settings() {
        Ok(settings) => settings,
        Err(e) => return config_failure(&e),
    };

    match run(cli.once, api_token, settings, needs_node_label).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Also used before logging is set up, so this goes to stderr.
fn config_failure(e: &config::ConfigError) -> ExitCode {
    eprintln!("⛔ Load config failed: {e}");
    match AppConfig::write_example(Path::new(EXAMPLE_FILE)) {
        Ok(()) => eprintln!("An example configuration was written to {EXAMPLE_FILE}"),
        Err(write_err) => eprintln!("Failed to write {EXAMPLE_FILE}: {write_err}"),
    }
    ExitCode::FAILURE
}

async fn run(
    once: bool,
    api_token: String,
    mut settings: FailoverSettings,
    needs_node_label: bool,
) -> anyhow::Result<ExitCode> {
    if needs_node_label {
        match ToolboxService::geo_label().await {
            Ok(label) => settings.node = label,
            Err(e) => tracing::warn!("Node label lookup failed: {e}"),
        }
    }
    tracing::info!("Node: {}", settings.node);

    let provider = Arc::new(CloudflareProvider::new(api_token));
    match provider.validate_credentials().await {
        Ok(true) => tracing::debug!("Cloudflare token verified"),
        Ok(false) => tracing::warn!("Cloudflare token is not active"),
        Err(e) => tracing::warn!("Could not verify Cloudflare token: {e}"),
    }

    tracing::info!(
        "Interval: {}ms, Timeout: {}ms, Port: {}",
        settings.check_interval.as_millis(),
        settings.probe.timeout.as_millis(),
        settings.probe.port
    );

    let ctx = Arc::new(ServiceContext::with_network(Arc::new(settings), provider));
    let scheduler = Scheduler::new(ctx);

    if once {
        let report = scheduler.run_once().await;
        let failed = report.failures().count();
        tracing::info!(
            "Pass finished: {} domain(s), {} updated, {failed} failed",
            report.results.len(),
            report.updated_count()
        );
        return Ok(if failed == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let shutdown = shutdown_signal()?;
    scheduler.run(shutdown).await;
    Ok(ExitCode::SUCCESS)
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
fn shutdown_signal() -> anyhow::Result<impl Future<Output = ()>> {
    #[cfg(unix)]
    let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .context("failed to install SIGTERM handler")?;

    Ok(async move {
        #[cfg(unix)]
        let terminate = terminate.recv();
        #[cfg(not(unix))]
        let terminate = std::future::pending::<Option<()>>();

        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    tracing::error!("Failed to listen for Ctrl-C: {e}");
                }
            }
            _ = terminate => tracing::info!("Received SIGTERM"),
        }
    })
}
