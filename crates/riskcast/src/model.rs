//! Classifier inference
//!
//! Wraps the trained ONNX artifact behind a [`Classifier`] seam and a
//! process-wide lazy [`RiskModel`] singleton. A failed load is cached the
//! same way a successful one is: the process keeps serving, every scoring
//! call reports the model as unavailable instead of retrying a known-bad
//! artifact path.

use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use crate::features::SELECTED_FEATURES;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
  #[error("risk model unavailable: {0}")]
  Unavailable(String),
  #[error("inference failed: {0}")]
  Inference(String),
}

/// Positive-class probability for a single feature row.
pub trait Classifier: Send + Sync {
  fn predict_proba(&self, features: &[f32; 10]) -> Result<f64>;
}

/// Fixed-probability classifier for tests and dry runs.
pub struct MockClassifier {
  pub probability: f64,
}

impl MockClassifier {
  pub fn returning(probability: f64) -> Self {
    Self { probability }
  }
}

impl Classifier for MockClassifier {
  fn predict_proba(&self, _features: &[f32; 10]) -> Result<f64> {
    Ok(self.probability)
  }
}

/// ONNX-backed classifier over the trained artifact.
///
/// `Session::run` needs exclusive access, so the session sits behind a mutex
/// and concurrent scoring calls serialize at inference.
pub struct OnnxClassifier {
  session: Mutex<Session>,
  input_name: String,
}

impl OnnxClassifier {
  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      return Err(anyhow!("model artifact not found at {}", path.display()));
    }

    let session = Session::builder()?
      .with_optimization_level(GraphOptimizationLevel::Level1)?
      .commit_from_file(path)
      .map_err(|e| anyhow!("failed to load ONNX model from {}: {}", path.display(), e))?;

    let input_name = session
      .inputs
      .first()
      .map(|input| input.name.clone())
      .ok_or_else(|| anyhow!("model at {} declares no inputs", path.display()))?;

    info!(model = %path.display(), "classifier loaded");

    Ok(Self { session: Mutex::new(session), input_name })
  }
}

impl Classifier for OnnxClassifier {
  fn predict_proba(&self, features: &[f32; 10]) -> Result<f64> {
    let row =
      Tensor::from_array(([1usize, SELECTED_FEATURES.len()], features.to_vec().into_boxed_slice()))?;

    let mut session = self.session.lock().map_err(|_| anyhow!("model session poisoned"))?;
    let outputs = session.run(ort::inputs![self.input_name.as_str() => row])?;

    // Converted sklearn classifiers expose "probabilities" as [1, n_classes];
    // the positive class sits in the last column.
    let output = outputs
      .get("probabilities")
      .or_else(|| outputs.get("output_probability"))
      .or_else(|| outputs.get("output"))
      .ok_or_else(|| {
        anyhow!(
          "no probability output found - available outputs: {:?}",
          outputs.keys().collect::<Vec<_>>()
        )
      })?;

    let (_shape, data) = output.try_extract_tensor::<f32>()?;
    let probability =
      data.last().copied().ok_or_else(|| anyhow!("model returned an empty probability tensor"))?;

    Ok(f64::from(probability))
  }
}

/// Lazily initialized process-wide classifier.
///
/// The first caller performs the load under the cell's mutual exclusion;
/// concurrent first-time loads observe a single initialization. Both the
/// loaded classifier and a load failure are cached for the process lifetime.
pub struct RiskModel {
  path: PathBuf,
  state: OnceCell<std::result::Result<Box<dyn Classifier>, String>>,
}

impl RiskModel {
  pub fn new(path: PathBuf) -> Self {
    Self { path, state: OnceCell::new() }
  }

  /// A model that is already "loaded" with the given classifier. Test seam.
  pub fn with_classifier(classifier: Box<dyn Classifier>) -> Self {
    let state = OnceCell::new();
    let _ = state.set(Ok(classifier));
    Self { path: PathBuf::new(), state }
  }

  /// Idempotent warm-up: safe to call before every request, loads at most
  /// once per process.
  pub fn ensure_loaded(&self) {
    self.state();
  }

  pub fn is_loaded(&self) -> bool {
    matches!(self.state.get(), Some(Ok(_)))
  }

  /// The cached load failure, if loading failed.
  pub fn load_error(&self) -> Option<&str> {
    match self.state.get() {
      Some(Err(reason)) => Some(reason),
      _ => None,
    }
  }

  /// Score one assembled feature row.
  pub fn score(&self, features: &[f32; 10]) -> std::result::Result<f64, ModelError> {
    match self.state() {
      Ok(classifier) => {
        classifier.predict_proba(features).map_err(|e| ModelError::Inference(e.to_string()))
      }
      Err(reason) => Err(ModelError::Unavailable(reason.clone())),
    }
  }

  fn state(&self) -> &std::result::Result<Box<dyn Classifier>, String> {
    self.state.get_or_init(|| match OnnxClassifier::load(&self.path) {
      Ok(classifier) => Ok(Box::new(classifier) as Box<dyn Classifier>),
      Err(e) => Err(format!("{e}")),
    })
  }
}

/// Decision rule: strictly greater than the threshold. A probability exactly
/// at the threshold classifies as low risk.
pub fn exceeds_threshold(probability: f64, threshold: f64) -> bool {
  probability > threshold
}
