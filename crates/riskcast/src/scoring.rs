//! Scoring pipeline
//!
//! Composes validation, feature assembly, inference and persistence into the
//! single pipeline both entry points (form and JSON API) share. Any stage
//! failure short-circuits - a record is only written for a fully scored
//! request.

use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::config::Config;
use crate::features;
use crate::model::{exceeds_threshold, ModelError, RiskModel};
use crate::store::RecordStore;
use crate::validate::{self, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
  /// Batched field and derived-value errors; recovered locally, never fatal.
  #[error("validation failed")]
  Invalid(Vec<ValidationError>),
  /// Classifier could not be loaded; the reason names the checked path.
  #[error("risk model unavailable: {0}")]
  ModelUnavailable(String),
  /// The loaded classifier failed on this row.
  #[error("inference failed: {0}")]
  Inference(String),
  /// Durable write or read failed; fatal to this request, no partial record.
  #[error("prediction store failure: {0}")]
  Storage(String),
}

/// Outcome of one successfully scored request.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringOutcome {
  pub record_id: i64,
  pub probability: f64,
  pub result: bool,
  pub risk_level: String,
  pub threshold: f64,
  /// Scoring date (UTC), for display surfaces.
  pub date: String,
}

pub fn risk_level(result: bool) -> &'static str {
  if result {
    "high"
  } else {
    "low"
  }
}

/// Run the full pipeline for one raw submission.
pub fn score_request(
  raw: &BTreeMap<String, String>,
  config: &Config,
  model: &RiskModel,
  store: &RecordStore,
) -> Result<ScoringOutcome, ScoringError> {
  let input = validate::validate(raw).map_err(ScoringError::Invalid)?;
  let features = features::assemble(&input);

  let probability = model.score(&features).map_err(|e| match e {
    ModelError::Unavailable(reason) => ScoringError::ModelUnavailable(reason),
    ModelError::Inference(reason) => ScoringError::Inference(reason),
  })?;

  let result = exceeds_threshold(probability, config.threshold);

  let record_id =
    store.create(&input, probability, result).map_err(|e| ScoringError::Storage(e.to_string()))?;

  info!(record_id, probability, result, "request scored");

  Ok(ScoringOutcome {
    record_id,
    probability,
    result,
    risk_level: risk_level(result).to_string(),
    threshold: config.threshold,
    date: Utc::now().format("%Y-%m-%d").to_string(),
  })
}

/// Normalize a JSON body to the flat string map the validator consumes, so
/// the form and API flows satisfy one validation contract. `None` when the
/// body is not a JSON object.
pub fn fields_from_json(body: &serde_json::Value) -> Option<BTreeMap<String, String>> {
  let object = body.as_object()?;

  let mut fields = BTreeMap::new();
  for (key, value) in object {
    let rendered = match value {
      serde_json::Value::String(s) => s.clone(),
      serde_json::Value::Number(n) => n.to_string(),
      serde_json::Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
      // Treated as absent so the validator reports it as missing.
      serde_json::Value::Null => continue,
      // Nested structures fail coercion downstream as invalid values.
      other => other.to_string(),
    };
    fields.insert(key.clone(), rendered);
  }

  Some(fields)
}
