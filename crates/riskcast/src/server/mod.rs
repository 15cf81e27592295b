//! REST API module for the riskcast service
//!
//! Provides the HTTP surface over the scoring pipeline: form and JSON
//! prediction endpoints, record read-back and report download. Uses axum for
//! routing; all state is shared through [`AppState`].

pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod startup;
pub mod types;

use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::model::RiskModel;
use crate::store::RecordStore;

/// Shared per-process state: configuration, the lazy classifier singleton
/// and the record store handle.
#[derive(Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub model: Arc<RiskModel>,
  pub store: RecordStore,
}

impl AppState {
  /// Build the state for a configuration, opening the store (and creating
  /// its schema) up front so storage problems surface at startup.
  pub fn from_config(config: Config) -> Result<Self> {
    let store = RecordStore::open(&config.db_path)?;
    let model = Arc::new(RiskModel::new(config.model_path.clone()));

    Ok(Self { config: Arc::new(config), model, store })
  }
}
