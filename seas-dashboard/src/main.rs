//! Seas Dashboard
//!
//! Terminal dashboard for batch jobs held by a remote job directory.
//!
//! Architecture:
//! - Configuration: command line flags with environment fallbacks
//! - Repository: the job directory behind a trait
//! - State: snapshot, log console, upload draft and upload count
//! - Scheduler: periodic snapshot polling
//! - Services: operator actions (submit, delete, logs, download)
//! - View and console: rendering and command input
//!
//! The dashboard holds no authoritative state. Everything it shows is
//! re-derived from the directory after a restart.

mod config;
mod console;
mod repository;
mod scheduler;
mod service;
mod state;
mod view;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "seas")]
#[command(about = "Seas batch job dashboard", long_about = None)]
struct Cli {
    /// Job directory URL
    #[arg(
        long,
        env = "SEAS_DIRECTORY_URL",
        default_value = "http://localhost:5000"
    )]
    directory_url: String,

    /// Seconds between job list refreshes
    #[arg(long, env = "SEAS_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Seconds before a request to the directory is abandoned
    #[arg(long, env = "SEAS_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    /// Directory downloaded logs are written to
    #[arg(long, env = "SEAS_DOWNLOAD_DIR", default_value = ".")]
    download_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they don't interleave with the rendered dashboard
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seas=info,seas_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Seas dashboard");

    let mut config = Config::new(cli.directory_url);
    config.poll_interval = Duration::from_secs(cli.poll_interval);
    config.request_timeout = Duration::from_secs(cli.request_timeout);
    config.download_dir = cli.download_dir;
    config.validate()?;

    info!(
        "Loaded configuration: directory_url={}, poll_interval={:?}",
        config.directory_url, config.poll_interval
    );
    info!(
        "Downloads save job logs under {}; a download never deletes the job",
        config.download_dir.display()
    );

    console::run(&config).await
}
