//! Repository layer for storage operations
//!
//! Services only talk to storage through the [`TermStore`], [`RecordStore`]
//! and [`SettingsStore`] traits. [`Repository`] bundles the PostgreSQL
//! implementations; unit tests use the in-memory store in `memory`.

#[cfg(test)]
pub mod memory;
pub mod records;
pub mod settings;
pub mod terms;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{AttributeValue, NewRecord, RecordId, RecordSummary, SettingsPayload, TaxonomyTerm},
};

/// Taxonomy term storage
#[async_trait]
pub trait TermStore: Send + Sync {
    /// Terms whose name and vocabulary match exactly, oldest first
    async fn find_terms(&self, name: &str, vocabulary: &str) -> AppResult<Vec<TaxonomyTerm>>;

    /// Create a term. If (vocabulary, name) already exists, the stored term
    /// is returned instead of a second one being created.
    async fn create_term(&self, name: &str, vocabulary: &str) -> AppResult<TaxonomyTerm>;
}

/// Content record storage
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_record(&self, record: &NewRecord) -> AppResult<RecordId>;

    /// Records whose `field` attribute equals `value`
    async fn find_records_by_attribute(
        &self,
        field: &str,
        value: &AttributeValue,
    ) -> AppResult<Vec<RecordSummary>>;
}

/// Admin settings storage
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load_settings(&self) -> AppResult<Option<SettingsPayload>>;

    async fn save_settings(&self, payload: &SettingsPayload) -> AppResult<()>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub terms: terms::TermsRepository,
    pub records: records::RecordsRepository,
    pub settings: settings::SettingsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            terms: terms::TermsRepository::new(pool.clone()),
            records: records::RecordsRepository::new(pool.clone()),
            settings: settings::SettingsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
