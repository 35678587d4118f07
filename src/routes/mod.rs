//! Router assembly: quiz pages, admin pages, health check, and HTTP tracing.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::state::AppState;

pub mod http;

#[cfg(test)]
mod tests;

/// Build the application router with:
/// - visitor flow: `/`, `/start`, `/quiz`, `/submit`, `/results`
/// - admin flow under `/admin`
/// - JSON health check at `/api/v1/health`
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(http::home))
        .route("/start", post(http::start))
        .route("/quiz", get(http::quiz))
        .route("/submit", post(http::submit))
        .route("/results", get(http::results))
        .route("/admin", get(http::admin_login_form).post(http::admin_login))
        .route("/admin/panel", get(http::admin_panel))
        .route("/admin/add", get(http::add_question_form).post(http::add_question))
        .route("/admin/logout", get(http::admin_logout))
        .route("/api/v1/health", get(http::health))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
