//! CLI command implementations
//!
//! Each command builds its components from the environment configuration and
//! runs the same pipeline the server exposes over HTTP.

use anyhow::{anyhow, Context, Result};
use colored::*;
use std::fs;
use std::io::Read;
use std::net::SocketAddr;
use std::path::Path;

use crate::cli::display;
use crate::config::Config;
use crate::model::RiskModel;
use crate::report;
use crate::scoring::{self, ScoringError};
use crate::server::{startup, AppState};
use crate::store::RecordStore;

/// Score a submission read from a JSON document ("-" reads stdin).
pub fn score(input: &str) -> Result<()> {
  let body = read_input(input)?;
  let value: serde_json::Value =
    serde_json::from_str(&body).context("input is not valid JSON")?;
  let fields =
    scoring::fields_from_json(&value).ok_or_else(|| anyhow!("input must be a JSON object"))?;

  let config = Config::from_env()?;
  let model = RiskModel::new(config.model_path.clone());
  let store = RecordStore::open(&config.db_path)?;

  match scoring::score_request(&fields, &config, &model, &store) {
    Ok(outcome) => {
      display::display_outcome(&outcome);
      Ok(())
    }
    Err(ScoringError::Invalid(errors)) => {
      for error in &errors {
        eprintln!("{} {}", "✗".red(), error);
      }
      Err(anyhow!("validation failed with {} error(s)", errors.len()))
    }
    Err(e) => Err(anyhow!(e)),
  }
}

/// Fetch and display a stored record.
pub fn get(id: i64) -> Result<()> {
  let config = Config::from_env()?;
  let store = RecordStore::open(&config.db_path)?;

  match store.get(id)? {
    Some(record) => {
      display::display_record(&record);
      Ok(())
    }
    None => Err(anyhow!("record {id} not found")),
  }
}

/// Render the text report for a stored record to stdout or a file.
pub fn write_report(id: i64, output: Option<&Path>) -> Result<()> {
  let config = Config::from_env()?;
  let store = RecordStore::open(&config.db_path)?;

  let record = store.get(id)?.ok_or_else(|| anyhow!("record {id} not found"))?;
  let rendered = report::render_text(&record);

  match output {
    Some(path) => {
      fs::write(path, rendered)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
      println!("{} wrote report for record {} to {}", "✓".green(), id, path.display());
    }
    None => print!("{rendered}"),
  }

  Ok(())
}

/// Run the HTTP server in-process.
pub async fn serve(bind: SocketAddr, verbose: bool) -> Result<()> {
  init_tracing(verbose);

  let config = Config::from_env()?;
  let state = AppState::from_config(config)?;

  startup::start_server(bind, state).await
}

fn init_tracing(verbose: bool) {
  use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

  let filter = if verbose {
    EnvFilter::new("info,ort=warn")
  } else {
    EnvFilter::new("riskcast=info,ort=error,warn")
  };

  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
}

fn read_input(input: &str) -> Result<String> {
  if input == "-" {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer).context("failed to read stdin")?;
    Ok(buffer)
  } else {
    fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
  }
}
