//! Content records repository

use async_trait::async_trait;
use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{AttributeValue, NewRecord, RecordId, RecordSummary},
};

use super::RecordStore;

#[derive(Clone)]
pub struct RecordsRepository {
    pool: Pool<Postgres>,
}

impl RecordsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for RecordsRepository {
    async fn create_record(&self, record: &NewRecord) -> AppResult<RecordId> {
        let id = sqlx::query_scalar::<_, RecordId>(
            r#"
            INSERT INTO records (title, content_type, published, attributes)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&record.title)
        .bind(&record.content_type)
        .bind(record.published)
        .bind(Json(&record.attributes))
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_records_by_attribute(
        &self,
        field: &str,
        value: &AttributeValue,
    ) -> AppResult<Vec<RecordSummary>> {
        let rows = sqlx::query_as::<_, RecordSummary>(
            r#"
            SELECT id, title, content_type, published, created_at
            FROM records
            WHERE attributes -> $1 = $2
            ORDER BY id
            "#,
        )
        .bind(field)
        .bind(Json(value))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
