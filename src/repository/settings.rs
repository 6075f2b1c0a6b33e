//! Prefill settings repository

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{types::Json, Pool, Postgres, Row};

use crate::{
    error::AppResult,
    models::{settings::TermPair, SettingsPayload},
};

use super::SettingsStore;

#[derive(Clone)]
pub struct SettingsRepository {
    pool: Pool<Postgres>,
}

impl SettingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn load_settings(&self) -> AppResult<Option<SettingsPayload>> {
        let row = sqlx::query(
            "SELECT content_type, field_settings, term_pairs FROM prefill_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| SettingsPayload {
            content_type: row.get("content_type"),
            field_settings: row
                .get::<Json<BTreeMap<String, String>>, _>("field_settings")
                .0,
            term_pairs: row.get::<Json<Vec<TermPair>>, _>("term_pairs").0,
        }))
    }

    async fn save_settings(&self, payload: &SettingsPayload) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO prefill_settings (id, content_type, field_settings, term_pairs, updated_at)
            VALUES (1, $1, $2, $3, NOW())
            ON CONFLICT (id) DO UPDATE SET
                content_type = EXCLUDED.content_type,
                field_settings = EXCLUDED.field_settings,
                term_pairs = EXCLUDED.term_pairs,
                updated_at = NOW()
            "#,
        )
        .bind(&payload.content_type)
        .bind(Json(&payload.field_settings))
        .bind(Json(&payload.term_pairs))
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
