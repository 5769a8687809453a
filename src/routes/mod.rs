mod account;
mod health;
mod swagger;
mod transfer;
use health::health_checker_handler;
use tower_http::trace::TraceLayer;

use crate::{models::Error, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;

/// Assembles every route on top of the shared state
pub fn make_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_checker_handler))
        .merge(account::account_routes())
        .merge(transfer::transfer_routes())
        .merge(swagger::build_documentation())
        .fallback(|| async { Error::not_found("route not found") })
        .method_not_allowed_fallback(|| async { Error::MethodNotAllowed })
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
