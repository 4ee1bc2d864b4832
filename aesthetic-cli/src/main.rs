//! Aesthetic CLI
//!
//! Command-line interface for the aesthetic simulation service.

mod commands;
mod config;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aesthetic")]
#[command(about = "Aesthetic simulation service CLI", long_about = None)]
struct Cli {
    /// Simulation service URL
    #[arg(long, env = "AESTHETIC_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Bearer token returned by `aesthetic auth login`
    #[arg(long, env = "AESTHETIC_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "AESTHETIC_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Delay between two status checks while watching a simulation, in milliseconds
    #[arg(long, env = "AESTHETIC_POLL_INTERVAL_MS", default_value_t = 2000)]
    poll_interval_ms: u64,

    /// Number of status checks before giving up on a simulation
    #[arg(long, env = "AESTHETIC_POLL_MAX_ATTEMPTS", default_value_t = 60)]
    poll_max_attempts: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aesthetic_cli=info,aesthetic_poller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        token: cli.token,
        timeout: Duration::from_secs(cli.timeout_secs),
        poll_interval: Duration::from_millis(cli.poll_interval_ms),
        poll_max_attempts: cli.poll_max_attempts,
    };

    handle_command(cli.command, &config).await
}
