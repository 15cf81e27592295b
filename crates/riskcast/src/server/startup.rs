//! REST server startup and configuration

use anyhow::Result;
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::server::routing::create_router;
use crate::server::AppState;

/// Start the REST server on `addr` with the given state.
pub async fn start_server(addr: SocketAddr, state: AppState) -> Result<()> {
  // Warm the classifier up front. A failed load is cached and reported per
  // request; the server keeps running either way.
  state.model.ensure_loaded();
  if let Some(reason) = state.model.load_error() {
    warn!(reason, "classifier failed to load - scoring requests will report unavailable");
  }

  let app = create_router(state)
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()));

  let listener = TcpListener::bind(addr).await?;
  info!(%addr, "riskcast server listening");

  match serve(listener, app).await {
    Ok(()) => {
      info!("server shutdown gracefully");
      Ok(())
    }
    Err(e) => {
      tracing::error!(error = %e, "server error");
      Err(anyhow::anyhow!("server error: {e}"))
    }
  }
}
