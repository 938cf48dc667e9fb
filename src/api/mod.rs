// src/api/mod.rs

//! HTTP surface: one `GET` route per check, each taking `?url=`.

pub mod error;
pub mod extract;
pub mod handlers;

#[cfg(test)]
mod tests;

use crate::app::AppState;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/check-quality", get(handlers::check_quality))
        .route("/tls", get(handlers::tls))
        .route("/tech-stack", get(handlers::tech_stack))
        .route("/firewall", get(handlers::firewall))
        .with_state(state)
}
