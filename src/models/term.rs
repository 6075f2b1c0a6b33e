//! Taxonomy term model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub type TermId = i64;

/// Named reference entity in a vocabulary (person, genre, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TaxonomyTerm {
    #[schema(value_type = i64)]
    pub id: TermId,
    pub vocabulary: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
