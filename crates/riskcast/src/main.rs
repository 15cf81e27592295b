use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use riskcast::cli::commands;

#[derive(Parser)]
#[command(name = "riskcast")]
#[command(
  about = "Riskcast - Type 2 Diabetes Risk Screening\nSurvey validation, risk scoring and record keeping"
)]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Score a survey submission and store the prediction record
  Score {
    /// Path to a JSON document with the survey fields ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    input: String,
  },
  /// Show a stored prediction record
  Get {
    /// Record identifier
    id: i64,
  },
  /// Render the screening report for a stored record
  Report {
    /// Record identifier
    id: i64,
    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Start the HTTP API server
  Serve {
    /// Server bind address
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Score { input } => commands::score(&input),
    Command::Get { id } => commands::get(id),
    Command::Report { id, output } => commands::write_report(id, output.as_deref()),
    Command::Serve { bind, verbose } => commands::serve(bind, verbose).await,
  }
}
