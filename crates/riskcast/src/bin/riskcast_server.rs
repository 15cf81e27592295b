//! Riskcast REST Server
//!
//! Standalone HTTP API server for the riskcast screening service.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use riskcast::config::Config;
use riskcast::server::{startup, AppState};

#[derive(Parser)]
#[command(name = "riskcast_server")]
#[command(about = "Riskcast REST API Server")]
#[command(version)]
struct Args {
  /// Server bind address
  #[arg(long, default_value = "127.0.0.1:3000")]
  bind: SocketAddr,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("info,ort=warn")
  } else {
    EnvFilter::new("riskcast=info,ort=error,warn")
  };

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  tracing::info!(version = env!("CARGO_PKG_VERSION"), bind = %args.bind, "starting riskcast server");

  let config = Config::from_env()?;
  let state = AppState::from_config(config)?;

  startup::start_server(args.bind, state).await
}
