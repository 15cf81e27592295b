//! Request logging middleware
//!
//! Tags every request with an id and logs method, path, status and latency.

use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub async fn request_log_middleware(request: Request, next: Next) -> Response {
  let request_id = Uuid::new_v4();
  let method = request.method().clone();
  let path = request.uri().path().to_string();

  let start = std::time::Instant::now();
  let response = next.run(request).await;
  let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

  tracing::info!(
    %request_id,
    %method,
    path,
    status = response.status().as_u16(),
    elapsed_ms = format!("{elapsed_ms:.2}"),
    "request completed"
  );

  response
}
