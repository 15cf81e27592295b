use std::collections::BTreeMap;

use riskcast::features::{assemble, SELECTED_FEATURES};
use riskcast::validate::{round_one_decimal, validate, REQUIRED_FIELDS};

fn base_fields() -> BTreeMap<String, String> {
  let mut fields = BTreeMap::new();
  fields.insert("height_cm".to_string(), "170".to_string());
  fields.insert("weight_kg".to_string(), "70".to_string());
  fields.insert("HighBP".to_string(), "1".to_string());
  fields.insert("HighChol".to_string(), "0".to_string());
  fields.insert("GenHlth".to_string(), "2".to_string());
  fields.insert("PhysHlth".to_string(), "0".to_string());
  fields.insert("DiffWalk".to_string(), "0".to_string());
  fields.insert("HeartDiseaseorAttack".to_string(), "0".to_string());
  fields.insert("PhysActivity".to_string(), "1".to_string());
  fields.insert("Gender".to_string(), "1".to_string());
  fields.insert("Age".to_string(), "7".to_string());
  fields
}

#[cfg(test)]
mod validate_tests {
  use super::*;

  #[test]
  fn test_valid_submission_derives_bmi() {
    let input = validate(&base_fields()).unwrap();

    assert_eq!(input.height_cm, 170.0);
    assert_eq!(input.weight_kg, 70.0);
    assert_eq!(input.high_bp, 1);
    assert_eq!(input.gen_hlth, 2);
    assert_eq!(input.age, 7);
    assert_eq!(input.bmi, 24.2);
  }

  #[test]
  fn test_bmi_matches_rounded_formula() {
    let mut fields = base_fields();
    fields.insert("height_cm".to_string(), "182.5".to_string());
    fields.insert("weight_kg".to_string(), "96.3".to_string());

    let input = validate(&fields).unwrap();
    let expected = round_one_decimal(96.3 / (1.825 * 1.825));

    assert_eq!(input.bmi, expected);
  }

  #[test]
  fn test_each_missing_field_reports_exactly_one_error() {
    for field in REQUIRED_FIELDS {
      let mut fields = base_fields();
      fields.remove(field);

      let errors = validate(&fields).unwrap_err();

      assert_eq!(errors.len(), 1, "expected a single error for missing {field}");
      assert_eq!(errors[0].field.as_deref(), Some(field));
      assert!(errors[0].message.contains("required field is missing"));
    }
  }

  #[test]
  fn test_all_missing_fields_report_together() {
    let errors = validate(&BTreeMap::new()).unwrap_err();
    assert_eq!(errors.len(), REQUIRED_FIELDS.len());
  }

  #[test]
  fn test_blank_field_counts_as_missing() {
    let mut fields = base_fields();
    fields.insert("Age".to_string(), "   ".to_string());

    let errors = validate(&fields).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field.as_deref(), Some("Age"));
  }

  #[test]
  fn test_height_boundaries_inclusive() {
    for height in ["90", "230"] {
      let mut fields = base_fields();
      fields.insert("height_cm".to_string(), height.to_string());
      // Keep the derived BMI plausible at the extremes.
      let weight = if height == "90" { "30" } else { "90" };
      fields.insert("weight_kg".to_string(), weight.to_string());

      assert!(validate(&fields).is_ok(), "height {height} should pass");
    }

    for height in ["89.99", "230.01"] {
      let mut fields = base_fields();
      fields.insert("height_cm".to_string(), height.to_string());

      let errors = validate(&fields).unwrap_err();
      assert_eq!(errors.len(), 1, "height {height} should fail");
      assert!(errors[0].message.contains("between 90 and 230"));
    }
  }

  #[test]
  fn test_weight_out_of_range_reports_only_weight() {
    let mut fields = base_fields();
    fields.insert("weight_kg".to_string(), "500".to_string());

    let errors = validate(&fields).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field.as_deref(), Some("weight_kg"));
    assert!(errors[0].message.contains("between 25 and 220"));
  }

  #[test]
  fn test_survey_field_ranges() {
    let cases = [("Age", "14"), ("Age", "0"), ("GenHlth", "6"), ("PhysHlth", "31")];

    for (field, value) in cases {
      let mut fields = base_fields();
      fields.insert(field.to_string(), value.to_string());

      let errors = validate(&fields).unwrap_err();
      assert_eq!(errors.len(), 1, "{field}={value} should fail");
      assert_eq!(errors[0].field.as_deref(), Some(field));
    }
  }

  #[test]
  fn test_survey_fields_accept_float_encoded_integers() {
    let mut fields = base_fields();
    fields.insert("HighBP".to_string(), "1.0".to_string());
    fields.insert("Age".to_string(), "7.0".to_string());

    let input = validate(&fields).unwrap();
    assert_eq!(input.high_bp, 1);
    assert_eq!(input.age, 7);
  }

  #[test]
  fn test_unparseable_values_are_invalid() {
    let mut fields = base_fields();
    fields.insert("height_cm".to_string(), "tall".to_string());
    fields.insert("HighBP".to_string(), "yes".to_string());

    let errors = validate(&fields).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.message.contains("invalid value")));
  }

  #[test]
  fn test_implausibly_low_bmi_rejected() {
    let mut fields = base_fields();
    // Both fields pass their own ranges but combine into BMI 4.7.
    fields.insert("height_cm".to_string(), "230".to_string());
    fields.insert("weight_kg".to_string(), "25".to_string());

    let errors = validate(&fields).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].field.is_none());
    assert!(errors[0].message.contains("implausible"));
    assert!(errors[0].message.contains("4.7"));
  }

  #[test]
  fn test_implausibly_high_bmi_rejected() {
    let mut fields = base_fields();
    fields.insert("height_cm".to_string(), "90".to_string());
    fields.insert("weight_kg".to_string(), "220".to_string());

    let errors = validate(&fields).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("implausible"));
  }

  #[test]
  fn test_input_snapshot_serializes_with_survey_names() {
    let input = validate(&base_fields()).unwrap();
    let json = serde_json::to_value(&input).unwrap();

    assert_eq!(json["HighBP"], 1);
    assert_eq!(json["HeartDiseaseorAttack"], 0);
    assert_eq!(json["BMI"], 24.2);
    assert_eq!(json["height_cm"], 170.0);
  }
}

#[cfg(test)]
mod feature_tests {
  use super::*;

  #[test]
  fn test_feature_order_matches_training_order() {
    assert_eq!(SELECTED_FEATURES[0], "HighBP");
    assert_eq!(SELECTED_FEATURES[8], "Age");
    assert_eq!(SELECTED_FEATURES[9], "BMI");
  }

  #[test]
  fn test_assemble_projects_in_fixed_order() {
    let input = validate(&base_fields()).unwrap();
    let features = assemble(&input);

    assert_eq!(features, [1.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0, 1.0, 7.0, 24.2]);
  }
}

#[cfg(test)]
mod config_tests {
  use riskcast::config::{base_dir, Config, DEFAULT_THRESHOLD};
  use serial_test::serial;
  use std::env;
  use tempfile::TempDir;

  fn clear_riskcast_env() {
    for var in [
      "RISKCAST_HOME",
      "RISKCAST_MODEL_PATH",
      "RISKCAST_DB_PATH",
      "RISKCAST_THRESHOLD",
      "RISKCAST_SECRET_KEY",
    ] {
      env::remove_var(var);
    }
  }

  #[test]
  #[serial]
  fn test_defaults_live_under_base_dir() {
    clear_riskcast_env();
    let temp = TempDir::new().unwrap();
    env::set_var("RISKCAST_HOME", temp.path());

    let config = Config::from_env().unwrap();

    assert_eq!(base_dir().unwrap(), temp.path());
    assert!(config.model_path.starts_with(temp.path()));
    assert!(config.db_path.starts_with(temp.path()));
    assert_eq!(config.threshold, DEFAULT_THRESHOLD);
  }

  #[test]
  #[serial]
  fn test_explicit_paths_and_threshold() {
    clear_riskcast_env();
    let temp = TempDir::new().unwrap();
    env::set_var("RISKCAST_HOME", temp.path());
    env::set_var("RISKCAST_MODEL_PATH", "/opt/models/risk.onnx");
    env::set_var("RISKCAST_THRESHOLD", "0.75");

    let config = Config::from_env().unwrap();

    assert_eq!(config.model_path.to_string_lossy(), "/opt/models/risk.onnx");
    assert_eq!(config.threshold, 0.75);
  }

  #[test]
  #[serial]
  fn test_malformed_threshold_rejected_at_startup() {
    clear_riskcast_env();
    let temp = TempDir::new().unwrap();
    env::set_var("RISKCAST_HOME", temp.path());
    env::set_var("RISKCAST_THRESHOLD", "half");

    let result = Config::from_env();

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("RISKCAST_THRESHOLD"));
  }
}
