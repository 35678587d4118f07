//! Programming Quiz · server
//!
//! - Axum HTTP server rendering the quiz and admin pages
//! - In-memory question bank, score records and session slots (lost on restart)
//! - Signed cookie carries the opaque session token
//!
//! Important env variables:
//!   PORT            : u16 (default 5000)
//!   HOST            : bind address (default 0.0.0.0)
//!   SECRET_KEY      : cookie signing key, at least 64 bytes
//!   ADMIN_USERNAME  : default "admin"
//!   ADMIN_PASSWORD  : default "secure123"
//!   QUIZ_BANK_PATH  : optional TOML file with extra questions
//!   LOG_LEVEL       : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod bank;
mod config;
mod domain;
mod error;
mod logic;
mod protocol;
mod quiz;
mod routes;
mod seeds;
mod session;
mod state;
mod telemetry;
mod util;
mod views;

use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::Settings;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let settings = Settings::from_env();
  info!(target: "quiz_server", ?settings, "Configuration loaded");
  let addr = settings.addr();

  // Shared process-scoped stores (question bank, scores, sessions).
  let state = AppState::new(settings);

  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quiz_server", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "quiz_server", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "quiz_server", error = %e, "Failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
  info!(target: "quiz_server", "Shutdown signal received");
}
