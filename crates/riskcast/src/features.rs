//! Feature vector assembly
//!
//! The classifier consumes a positional vector, so the order of
//! [`SELECTED_FEATURES`] is part of the model contract and must never change
//! without retraining.

use crate::validate::ScreeningInput;

/// The ten features the classifier was trained on, in training order.
pub const SELECTED_FEATURES: [&str; 10] = [
  "HighBP",
  "HighChol",
  "GenHlth",
  "PhysHlth",
  "DiffWalk",
  "HeartDiseaseorAttack",
  "PhysActivity",
  "Gender",
  "Age",
  "BMI",
];

/// Project a validated submission onto the model's feature order.
pub fn assemble(input: &ScreeningInput) -> [f32; 10] {
  let mut features = [0.0f32; 10];

  for (slot, name) in features.iter_mut().zip(SELECTED_FEATURES.iter()) {
    *slot = feature_value(input, name);
  }

  features
}

fn feature_value(input: &ScreeningInput, name: &str) -> f32 {
  match name {
    "HighBP" => input.high_bp as f32,
    "HighChol" => input.high_chol as f32,
    "GenHlth" => input.gen_hlth as f32,
    "PhysHlth" => input.phys_hlth as f32,
    "DiffWalk" => input.diff_walk as f32,
    "HeartDiseaseorAttack" => input.heart_disease_or_attack as f32,
    "PhysActivity" => input.phys_activity as f32,
    "Gender" => input.gender as f32,
    "Age" => input.age as f32,
    "BMI" => input.bmi as f32,
    // Validation produces a complete typed input, so a name in the feature
    // table without a source field is a programming error, not a user error.
    other => unreachable!("unknown model feature: {other}"),
  }
}
