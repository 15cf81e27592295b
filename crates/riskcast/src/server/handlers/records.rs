//! Record read-back and report export handlers

use axum::{
  extract::{Path, State},
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Json,
};

use crate::report;
use crate::server::types::ErrorResponse;
use crate::server::AppState;

/// GET /records/{id} - fetch a stored prediction record.
pub async fn get_record(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
  match state.store.get(id) {
    Ok(Some(record)) => Json(record).into_response(),
    Ok(None) => not_found_response(),
    Err(e) => storage_error_response(e),
  }
}

/// GET /records/{id}/report - download the text report for a record.
pub async fn download_report(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
  let record = match state.store.get(id) {
    Ok(Some(record)) => record,
    Ok(None) => return not_found_response(),
    Err(e) => return storage_error_response(e),
  };

  let body = report::render_text(&record);
  let filename = report::report_filename(record.id);

  (
    [
      (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
      (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")),
    ],
    body,
  )
    .into_response()
}

fn not_found_response() -> Response {
  (StatusCode::NOT_FOUND, Json(ErrorResponse { error: "record not found".to_string() }))
    .into_response()
}

fn storage_error_response(error: anyhow::Error) -> Response {
  tracing::error!(error = %error, "record lookup failed");
  (
    StatusCode::INTERNAL_SERVER_ERROR,
    Json(ErrorResponse { error: "prediction store failure".to_string() }),
  )
    .into_response()
}
