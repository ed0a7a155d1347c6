//! # API Module
//!
//! HTTP handlers for the balance service.
//!
//! ## Available Endpoints
//!
//! - `GET /api/has-balance/:address` - Report which networks hold a balance for an address or ENS name
//! - `GET /api/health` - Liveness probe

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod balance;
pub mod health;

/// Routes served under `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/has-balance/:address", get(balance::has_balance_handler))
}

/// The complete application with tracing and CORS layers applied
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", create_api_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
