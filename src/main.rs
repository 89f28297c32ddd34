//! NiceHash collector - Telegraf exec input
//!
//! Fetches rig status, recent payouts and account balances from the
//! NiceHash API v2 and prints them as InfluxDB line protocol on stdout.
//! Diagnostics go to stderr.
//!
//! # Usage
//! ```sh
//! nicehash-collector --config /etc/telegraf/nicehash.json
//! ```
//!
//! # Environment Variables
//! - `NICEHASH_API_KEY`, `NICEHASH_API_SECRET`, `NICEHASH_ORG_ID` - credentials (override the file)
//! - `NICEHASH_BASE_URL` - API host (default: https://api2.nicehash.com)
//! - `NICEHASH_TIMEOUT_SECS` - per-request timeout (default: 15)
//! - `NICEHASH_GROUP_NAME` - only report rigs in this group
//! - `RUST_LOG` - log filter (overrides `--log-level`)

use anyhow::{Context, Result};
use clap::Parser;
use nicehash_collector::application::collector::Collector;
use nicehash_collector::config::Config;
use nicehash_collector::infrastructure::{LineProtocolWriter, NiceHashClient};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(author, version, about = "NiceHash API poller for Telegraf", long_about = None)]
struct Cli {
    /// Path to the NiceHash config file (JSON, or TOML with a .toml extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only report rigs in this group
    #[arg(long)]
    group_name: Option<String>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // stdout carries metrics only
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .with(stderr_layer)
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(group) = cli.group_name.filter(|g| !g.trim().is_empty()) {
        config.rig_group = Some(group);
    }
    info!(
        "NiceHash collector {} polling {} (timeout {:?})",
        env!("CARGO_PKG_VERSION"),
        config.base_url,
        config.request_timeout
    );

    let client = NiceHashClient::new(
        config.credentials.clone(),
        config.base_url.clone(),
        config.request_timeout,
    );
    let collector = Collector::new(Arc::new(client)).with_rig_group(config.rig_group.clone());
    let report = collector.collect().await;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    LineProtocolWriter::write_all(&mut out, &report.records).context("Failed to write metrics")?;
    out.flush().context("Failed to flush metrics")?;

    Ok(())
}
