//! Destination content records

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::term::TermId;

pub type RecordId = i64;

/// Link from a record to a term with a relator role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedRelation {
    pub target_id: TermId,
    pub rel_type: String,
}

/// Single `{ "value": ... }` entry of a multivalued field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldItem {
    pub value: String,
}

/// Value stored under one destination field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Reference(TermId),
    Formatted { value: String, format: String },
    Relations(Vec<TypedRelation>),
    Items(Vec<FieldItem>),
}

impl AttributeValue {
    pub fn items<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttributeValue::Items(
            values
                .into_iter()
                .map(|value| FieldItem {
                    value: value.into(),
                })
                .collect(),
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Record ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRecord {
    /// Record label, independent of the field mapping
    pub title: Option<String>,
    pub content_type: String,
    pub published: bool,
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl NewRecord {
    pub fn attribute(&self, field: &str) -> Option<&AttributeValue> {
        self.attributes.get(field)
    }
}

/// Persisted record, as listed to callers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RecordSummary {
    #[schema(value_type = i64)]
    pub id: RecordId,
    pub title: Option<String>,
    pub content_type: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}
