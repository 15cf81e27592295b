//! Wire types for the REST API
//!
//! The success and error shapes here are a published contract - clients
//! depend on the exact field names, so changes are breaking.

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringOutcome;

/// Success body for `POST /api/predict`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
  /// Positive-class probability, rounded to four decimals.
  pub probability: f64,

  /// Thresholded decision, encoded 0/1.
  pub result: u8,

  /// "high" or "low".
  pub risk_level: String,

  /// Identifier of the persisted record.
  pub record_id: i64,

  /// The decision threshold that produced `result`.
  pub threshold: f64,
}

impl PredictResponse {
  pub fn from_outcome(outcome: &ScoringOutcome) -> Self {
    Self {
      probability: round_four_decimals(outcome.probability),
      result: u8::from(outcome.result),
      risk_level: outcome.risk_level.clone(),
      record_id: outcome.record_id,
      threshold: outcome.threshold,
    }
  }
}

/// Render model for the synchronous form flow; the template renderer that
/// turns this into markup lives outside the core.
#[derive(Debug, Serialize, Deserialize)]
pub struct FormResultView {
  /// Thresholded decision, encoded 0/1.
  pub result: u8,

  /// Probability formatted as a percentage with one decimal, e.g. "30.0%".
  pub prob: String,

  /// Identifier of the persisted record.
  pub id: i64,

  /// Scoring date (UTC), `YYYY-MM-DD`.
  pub date: String,
}

impl FormResultView {
  pub fn from_outcome(outcome: &ScoringOutcome) -> Self {
    Self {
      result: u8::from(outcome.result),
      prob: format!("{:.1}%", outcome.probability * 100.0),
      id: outcome.record_id,
      date: outcome.date.clone(),
    }
  }
}

/// Validation failures: the complete batch of messages, one per problem.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorsResponse {
  pub errors: Vec<String>,
}

/// Single-message errors: malformed body, unavailable model, missing record.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub error: String,
}

/// Response for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,
  pub model_loaded: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub model_error: Option<String>,
  pub store_path: String,
}

/// Response for `GET /version`.
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResponse {
  pub version: String,
}

pub fn round_four_decimals(value: f64) -> f64 {
  (value * 10_000.0).round() / 10_000.0
}
