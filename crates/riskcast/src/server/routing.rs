//! Axum router configuration for all endpoints

use axum::{
  middleware::from_fn,
  routing::{get, post},
  Router,
};

use crate::server::handlers::{predict, records, status};
use crate::server::{middleware, AppState};

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Status and version endpoints
    .route("/status", get(status::status))
    .route("/version", get(status::version))
    // Scoring endpoints
    .route("/predict", post(predict::predict_form))
    .route("/api/predict", post(predict::predict_api))
    // Record read-back and report export
    .route("/records/{id}", get(records::get_record))
    .route("/records/{id}/report", get(records::download_report))
    .layer(from_fn(middleware::request_log_middleware))
    .with_state(state)
}
