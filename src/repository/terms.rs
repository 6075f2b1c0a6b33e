//! Taxonomy terms repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::TaxonomyTerm};

use super::TermStore;

#[derive(Clone)]
pub struct TermsRepository {
    pool: Pool<Postgres>,
}

impl TermsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TermStore for TermsRepository {
    async fn find_terms(&self, name: &str, vocabulary: &str) -> AppResult<Vec<TaxonomyTerm>> {
        let rows = sqlx::query_as::<_, TaxonomyTerm>(
            "SELECT * FROM taxonomy_terms WHERE name = $1 AND vocabulary = $2 ORDER BY id",
        )
        .bind(name)
        .bind(vocabulary)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_term(&self, name: &str, vocabulary: &str) -> AppResult<TaxonomyTerm> {
        // The unique (vocabulary, name) constraint settles concurrent creations
        let inserted = sqlx::query_as::<_, TaxonomyTerm>(
            r#"
            INSERT INTO taxonomy_terms (vocabulary, name)
            VALUES ($1, $2)
            ON CONFLICT (vocabulary, name) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(vocabulary)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(term) = inserted {
            return Ok(term);
        }

        tracing::debug!("Term '{}' in '{}' created concurrently, reusing it", name, vocabulary);
        let existing = sqlx::query_as::<_, TaxonomyTerm>(
            "SELECT * FROM taxonomy_terms WHERE vocabulary = $1 AND name = $2",
        )
        .bind(vocabulary)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(existing)
    }
}
