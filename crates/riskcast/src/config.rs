//! Process configuration
//!
//! Built once at startup from the environment and handed to every component,
//! so tests can inject fake configurations instead of poking globals.

use anyhow::{anyhow, Result};
use dirs::home_dir;
use std::env;
use std::path::PathBuf;

/// Default decision threshold tuned during model selection.
pub const DEFAULT_THRESHOLD: f64 = 0.502;

#[derive(Debug, Clone)]
pub struct Config {
  /// Path to the trained classifier artifact (ONNX).
  pub model_path: PathBuf,
  /// Path to the SQLite prediction store.
  pub db_path: PathBuf,
  /// Probability cutoff above which a request classifies as high risk.
  pub threshold: f64,
  /// Signing key consumed only by the HTML form frontend.
  pub secret_key: String,
}

impl Config {
  /// Read configuration from `RISKCAST_*` environment variables,
  /// falling back to defaults under the riskcast base directory.
  pub fn from_env() -> Result<Self> {
    let base = base_dir()?;

    let model_path = env::var("RISKCAST_MODEL_PATH")
      .map(PathBuf::from)
      .unwrap_or_else(|_| base.join("diabetes_model.onnx"));

    let db_path = env::var("RISKCAST_DB_PATH")
      .map(PathBuf::from)
      .unwrap_or_else(|_| base.join("predictions.db"));

    let threshold = match env::var("RISKCAST_THRESHOLD") {
      Ok(raw) => {
        let parsed = raw
          .trim()
          .parse::<f64>()
          .map_err(|_| anyhow!("invalid RISKCAST_THRESHOLD value: {raw}"))?;
        if !parsed.is_finite() {
          return Err(anyhow!("RISKCAST_THRESHOLD must be a finite number, got {raw}"));
        }
        parsed
      }
      Err(_) => DEFAULT_THRESHOLD,
    };

    let secret_key =
      env::var("RISKCAST_SECRET_KEY").unwrap_or_else(|_| "insecure-dev-key".to_string());

    Ok(Self { model_path, db_path, threshold, secret_key })
  }
}

/// Resolve the riskcast base directory: `RISKCAST_HOME` if set,
/// `~/.riskcast` otherwise.
pub fn base_dir() -> Result<PathBuf> {
  if let Ok(dir) = env::var("RISKCAST_HOME") {
    return Ok(PathBuf::from(dir));
  }

  Ok(home_dir().ok_or_else(|| anyhow!("failed to determine home directory"))?.join(".riskcast"))
}
