//! Display formatting utilities for CLI output

use colored::*;

use crate::scoring::ScoringOutcome;
use crate::store::PredictionRecord;

const DISCLAIMER: &str = "screening only - not a medical diagnosis";

/// Print the outcome of a scoring run.
pub fn display_outcome(outcome: &ScoringOutcome) {
  let verdict = if outcome.result {
    "HIGH RISK".red().bold()
  } else {
    "LOW RISK".green().bold()
  };

  println!(
    "{} record #{} - {} (probability {:.1}%, threshold {})",
    "✓".green(),
    outcome.record_id,
    verdict,
    outcome.probability * 100.0,
    outcome.threshold
  );
  println!("{}", DISCLAIMER.dimmed());
}

/// Print a stored prediction record.
pub fn display_record(record: &PredictionRecord) {
  let verdict = if record.result == 1 {
    "HIGH RISK".red().bold()
  } else {
    "LOW RISK".green().bold()
  };

  println!("{} {}", "record".blue().bold(), record.id.to_string().yellow());
  println!("  created:     {}", record.created_at);
  println!("  probability: {:.1}%", record.prob * 100.0);
  println!("  verdict:     {verdict}");
  println!(
    "  input:       height {} cm, weight {} kg, BMI {:.1}",
    record.input.height_cm, record.input.weight_kg, record.input.bmi
  );
  println!("{}", DISCLAIMER.dimmed());
}
