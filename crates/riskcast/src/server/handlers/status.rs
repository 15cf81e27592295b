//! Status and version endpoint handlers

use axum::{extract::State, response::Json};

use crate::server::types::{StatusResponse, VersionResponse};
use crate::server::AppState;

/// GET /status - health check with model and store state.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
  let response = StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    model_loaded: state.model.is_loaded(),
    model_error: state.model.load_error().map(ToString::to_string),
    store_path: state.store.db_path().to_string_lossy().to_string(),
  };

  Json(response)
}

/// GET /version - returns the current service version.
pub async fn version() -> Json<VersionResponse> {
  Json(VersionResponse { version: env!("CARGO_PKG_VERSION").to_string() })
}
