//! API handlers for DOI prefill REST endpoints

pub mod health;
pub mod openapi;
pub mod prefill;
pub mod settings;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Routes mounted under `/api/v1`
pub fn routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Settings
        .route("/settings", get(settings::get_settings).put(settings::update_settings))
        // Prefill
        .route("/collections", get(prefill::list_collections))
        .route("/prefill", post(prefill::prefill))
        .with_state(state)
}
