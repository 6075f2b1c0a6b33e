//! DOI Prefill
//!
//! Creates unpublished catalog records from Crossref metadata: the DOI's
//! fields are mapped onto locally configured fields, and authors and genre
//! are reconciled against taxonomy terms.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    pub repository: repository::Repository,
}
