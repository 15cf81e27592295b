//! Scoring endpoint handlers
//!
//! Both entry points normalize their body to the same flat string map before
//! the validator runs, so the pipeline has exactly one input contract.

use axum::{
  extract::{rejection::JsonRejection, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  Form, Json,
};
use std::collections::BTreeMap;

use crate::scoring::{self, ScoringError};
use crate::server::types::{ErrorResponse, ErrorsResponse, FormResultView, PredictResponse};
use crate::server::AppState;

/// POST /predict - synchronous form flow.
///
/// Accepts a form-encoded submission and returns the render model consumed
/// by the HTML template collaborator.
pub async fn predict_form(
  State(state): State<AppState>,
  Form(fields): Form<BTreeMap<String, String>>,
) -> Response {
  match scoring::score_request(&fields, &state.config, &state.model, &state.store) {
    Ok(outcome) => Json(FormResultView::from_outcome(&outcome)).into_response(),
    Err(e) => scoring_error_response(e),
  }
}

/// POST /api/predict - programmatic JSON flow.
pub async fn predict_api(
  State(state): State<AppState>,
  body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
  let Ok(Json(body)) = body else {
    return malformed_body_response();
  };

  let Some(fields) = scoring::fields_from_json(&body) else {
    return malformed_body_response();
  };

  match scoring::score_request(&fields, &state.config, &state.model, &state.store) {
    Ok(outcome) => Json(PredictResponse::from_outcome(&outcome)).into_response(),
    Err(e) => scoring_error_response(e),
  }
}

fn malformed_body_response() -> Response {
  (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: "JSON request required".to_string() }))
    .into_response()
}

/// Map pipeline failures onto the published error shapes.
fn scoring_error_response(error: ScoringError) -> Response {
  match error {
    ScoringError::Invalid(errors) => {
      let messages = errors.iter().map(ToString::to_string).collect();
      (StatusCode::BAD_REQUEST, Json(ErrorsResponse { errors: messages })).into_response()
    }
    ScoringError::ModelUnavailable(reason) => {
      tracing::warn!(reason, "scoring request rejected - model unavailable");
      (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorResponse { error: reason })).into_response()
    }
    ScoringError::Inference(reason) => {
      tracing::error!(reason, "inference failed");
      (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: reason })).into_response()
    }
    ScoringError::Storage(reason) => {
      tracing::error!(reason, "failed to persist prediction record");
      (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: "failed to persist prediction record".to_string() }),
      )
        .into_response()
    }
  }
}
