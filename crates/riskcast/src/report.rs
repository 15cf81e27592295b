//! Plain-text report rendering
//!
//! Renders a stored prediction record as a downloadable screening report.
//! This is the plain-text fallback surface of the document exporter; richer
//! renderers (PDF) plug in outside the core.

use chrono::{DateTime, Utc};

use crate::store::PredictionRecord;

const DISCLAIMER: &str =
  "This tool is for screening only. It is not a medical diagnosis. Consult a physician.";

/// Human-readable labels for the persisted fields, in report order.
const FIELD_LABELS: [(&str, &str); 12] = [
  ("height_cm", "height (cm)"),
  ("weight_kg", "weight (kg)"),
  ("HighBP", "high blood pressure"),
  ("HighChol", "high cholesterol"),
  ("GenHlth", "general health (1=excellent .. 5=poor)"),
  ("PhysHlth", "days of poor physical health (last 30)"),
  ("DiffWalk", "difficulty walking"),
  ("HeartDiseaseorAttack", "heart disease or heart attack history"),
  ("PhysActivity", "regular physical activity"),
  ("Gender", "gender (0=female, 1=male)"),
  ("Age", "age group (BRFSS)"),
  ("BMI", "body mass index (derived)"),
];

/// Render the full text report for one record.
pub fn render_text(record: &PredictionRecord) -> String {
  let verdict = if record.result == 1 { "HIGH RISK" } else { "LOW RISK" };

  let mut out = String::new();
  out.push_str("RISKCAST SCREENING REPORT\n");
  out.push_str("Type 2 diabetes risk assessment\n\n");

  out.push_str("Report details\n");
  out.push_str(&format!("  report id:        {}\n", record.id));
  out.push_str(&format!("  date:             {}\n", display_date(&record.created_at)));
  out.push_str(&format!("  risk probability: {:.1}%\n", record.prob * 100.0));
  out.push_str(&format!("  verdict:          {verdict}\n\n"));

  out.push_str("Your answers\n");
  for (field, label) in FIELD_LABELS {
    out.push_str(&format!("  {:<42} {}\n", label, field_value(record, field)));
  }

  out.push('\n');
  out.push_str(DISCLAIMER);
  out.push('\n');

  out
}

/// Attachment filename for a rendered report.
pub fn report_filename(id: i64) -> String {
  format!("risk_report_{}_{}.txt", id, Utc::now().format("%Y%m%d"))
}

fn display_date(created_at: &str) -> String {
  match DateTime::parse_from_rfc3339(created_at) {
    Ok(parsed) => parsed.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string(),
    Err(_) => created_at.to_string(),
  }
}

fn field_value(record: &PredictionRecord, field: &str) -> String {
  let input = &record.input;

  match field {
    "height_cm" => trim_float(input.height_cm),
    "weight_kg" => trim_float(input.weight_kg),
    "HighBP" => input.high_bp.to_string(),
    "HighChol" => input.high_chol.to_string(),
    "GenHlth" => input.gen_hlth.to_string(),
    "PhysHlth" => input.phys_hlth.to_string(),
    "DiffWalk" => input.diff_walk.to_string(),
    "HeartDiseaseorAttack" => input.heart_disease_or_attack.to_string(),
    "PhysActivity" => input.phys_activity.to_string(),
    "Gender" => input.gender.to_string(),
    "Age" => input.age.to_string(),
    "BMI" => format!("{:.1}", input.bmi),
    other => unreachable!("unknown report field: {other}"),
  }
}

/// Render whole-number measurements without a trailing ".0".
fn trim_float(value: f64) -> String {
  if value.fract() == 0.0 {
    format!("{value:.0}")
  } else {
    format!("{value}")
  }
}
