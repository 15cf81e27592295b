//! Request validation and BMI derivation
//!
//! Normalizes raw key/value submissions into a typed [`ScreeningInput`].
//! Field errors accumulate across the whole submission in one pass - the
//! caller always receives the complete batch, never just the first problem.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw fields every submission must carry, checked in this order.
/// `BMI` is not submitted - it is derived from the two physical fields.
pub const REQUIRED_FIELDS: [&str; 11] = [
  "height_cm",
  "weight_kg",
  "HighBP",
  "HighChol",
  "GenHlth",
  "PhysHlth",
  "DiffWalk",
  "HeartDiseaseorAttack",
  "PhysActivity",
  "Gender",
  "Age",
];

/// One problem with one field of a submission. `field` is `None` for
/// derived-value errors that have no single originating field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
  pub field: Option<String>,
  pub message: String,
}

impl ValidationError {
  pub fn field(field: &str, message: impl Into<String>) -> Self {
    Self { field: Some(field.to_string()), message: message.into() }
  }

  pub fn derived(message: impl Into<String>) -> Self {
    Self { field: None, message: message.into() }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message)
  }
}

/// A fully validated submission: the nine survey fields, the derived BMI and
/// the two physical fields kept for record display. Serialized field names
/// match the survey codebook exactly - the snapshot written to the store must
/// round-trip against the model's feature names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningInput {
  pub height_cm: f64,
  pub weight_kg: f64,
  #[serde(rename = "HighBP")]
  pub high_bp: i64,
  #[serde(rename = "HighChol")]
  pub high_chol: i64,
  #[serde(rename = "GenHlth")]
  pub gen_hlth: i64,
  #[serde(rename = "PhysHlth")]
  pub phys_hlth: i64,
  #[serde(rename = "DiffWalk")]
  pub diff_walk: i64,
  #[serde(rename = "HeartDiseaseorAttack")]
  pub heart_disease_or_attack: i64,
  #[serde(rename = "PhysActivity")]
  pub phys_activity: i64,
  #[serde(rename = "Gender")]
  pub gender: i64,
  #[serde(rename = "Age")]
  pub age: i64,
  #[serde(rename = "BMI")]
  pub bmi: f64,
}

/// Validate a raw submission and derive BMI.
///
/// Every missing, malformed or out-of-range field appends to the error batch;
/// BMI is only computed once all eleven raw fields pass. The plausibility
/// bound on the derived BMI (10-80) rejects physically impossible
/// height/weight combinations that slip through the per-field ranges.
pub fn validate(raw: &BTreeMap<String, String>) -> Result<ScreeningInput, Vec<ValidationError>> {
  let mut errors = Vec::new();

  let height_cm = parse_float(
    raw,
    "height_cm",
    90.0,
    230.0,
    "height must be between 90 and 230 cm",
    &mut errors,
  );
  let weight_kg = parse_float(
    raw,
    "weight_kg",
    25.0,
    220.0,
    "weight must be between 25 and 220 kg",
    &mut errors,
  );
  let high_bp = parse_int(raw, "HighBP", None, &mut errors);
  let high_chol = parse_int(raw, "HighChol", None, &mut errors);
  let gen_hlth = parse_int(
    raw,
    "GenHlth",
    Some((1, 5, "general health must be between 1 (excellent) and 5 (poor)")),
    &mut errors,
  );
  let phys_hlth =
    parse_int(raw, "PhysHlth", Some((0, 30, "PhysHlth must be between 0 and 30 days")), &mut errors);
  let diff_walk = parse_int(raw, "DiffWalk", None, &mut errors);
  let heart_disease_or_attack = parse_int(raw, "HeartDiseaseorAttack", None, &mut errors);
  let phys_activity = parse_int(raw, "PhysActivity", None, &mut errors);
  let gender = parse_int(raw, "Gender", None, &mut errors);
  let age = parse_int(
    raw,
    "Age",
    Some((1, 13, "age group must be between 1 and 13 (BRFSS categories)")),
    &mut errors,
  );

  if !errors.is_empty() {
    return Err(errors);
  }

  // Every parse helper either returned a value or pushed an error, so after
  // the batch check all eleven are present.
  match (
    height_cm,
    weight_kg,
    high_bp,
    high_chol,
    gen_hlth,
    phys_hlth,
    diff_walk,
    heart_disease_or_attack,
    phys_activity,
    gender,
    age,
  ) {
    (
      Some(height_cm),
      Some(weight_kg),
      Some(high_bp),
      Some(high_chol),
      Some(gen_hlth),
      Some(phys_hlth),
      Some(diff_walk),
      Some(heart_disease_or_attack),
      Some(phys_activity),
      Some(gender),
      Some(age),
    ) => {
      let bmi = derive_bmi(height_cm, weight_kg)?;

      Ok(ScreeningInput {
        height_cm,
        weight_kg,
        high_bp,
        high_chol,
        gen_hlth,
        phys_hlth,
        diff_walk,
        heart_disease_or_attack,
        phys_activity,
        gender,
        age,
        bmi,
      })
    }
    _ => unreachable!("validation passed with a missing field"),
  }
}

/// BMI = weight / (height in meters)^2, rounded to one decimal.
fn derive_bmi(height_cm: f64, weight_kg: f64) -> Result<f64, Vec<ValidationError>> {
  let height_m = height_cm / 100.0;

  // The 90-230 range already guarantees this, but a zero height would turn
  // into a division blowup rather than an error, so re-check.
  if height_m <= 0.0 {
    return Err(vec![ValidationError::field("height_cm", "height must be strictly positive")]);
  }

  let bmi = round_one_decimal(weight_kg / (height_m * height_m));

  if !(10.0..=80.0).contains(&bmi) {
    return Err(vec![ValidationError::derived(format!("computed BMI is implausible: {bmi:.1}"))]);
  }

  Ok(bmi)
}

pub fn round_one_decimal(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

/// Fetch a required field, trimmed. Pushes the "required" error and returns
/// `None` when the field is absent or blank.
fn raw_field<'a>(
  raw: &'a BTreeMap<String, String>,
  field: &str,
  errors: &mut Vec<ValidationError>,
) -> Option<&'a str> {
  match raw.get(field).map(|value| value.trim()) {
    Some(value) if !value.is_empty() => Some(value),
    _ => {
      errors.push(ValidationError::field(field, format!("required field is missing: {field}")));
      None
    }
  }
}

fn parse_float(
  raw: &BTreeMap<String, String>,
  field: &str,
  min: f64,
  max: f64,
  range_message: &str,
  errors: &mut Vec<ValidationError>,
) -> Option<f64> {
  let value = raw_field(raw, field, errors)?;

  match value.parse::<f64>() {
    Ok(parsed) => {
      if !(min..=max).contains(&parsed) {
        errors.push(ValidationError::field(field, range_message));
        return None;
      }
      Some(parsed)
    }
    Err(_) => {
      errors.push(ValidationError::field(field, format!("invalid value for {field}: {value}")));
      None
    }
  }
}

/// Survey fields parse as float-then-truncate so inputs like "1.0" coerce
/// cleanly to their integer code.
fn parse_int(
  raw: &BTreeMap<String, String>,
  field: &str,
  range: Option<(i64, i64, &str)>,
  errors: &mut Vec<ValidationError>,
) -> Option<i64> {
  let value = raw_field(raw, field, errors)?;

  let parsed = match value.parse::<f64>() {
    Ok(parsed) if parsed.is_finite() => parsed.trunc() as i64,
    _ => {
      errors.push(ValidationError::field(field, format!("invalid value for {field}: {value}")));
      return None;
    }
  };

  if let Some((min, max, message)) = range {
    if !(min..=max).contains(&parsed) {
      errors.push(ValidationError::field(field, message));
      return None;
    }
  }

  Some(parsed)
}
