//! In-memory storage backing the unit tests.
//!
//! All state sits behind one `std::sync::Mutex`, so the check-then-insert in
//! [`TermStore::create_term`] is atomic and (vocabulary, name) stays unique.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        AttributeValue, NewRecord, RecordId, RecordSummary, SettingsPayload, TaxonomyTerm,
    },
};

use super::{RecordStore, SettingsStore, TermStore};

struct StoredRecord {
    summary: RecordSummary,
    record: NewRecord,
}

#[derive(Default)]
struct State {
    terms: Vec<TaxonomyTerm>,
    records: Vec<StoredRecord>,
    settings: Option<SettingsPayload>,
}

/// In-memory implementation of every storage trait
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AppError::Internal("In-memory store lock poisoned".to_string()))
    }

    /// All stored terms, in creation order
    pub fn terms(&self) -> Vec<TaxonomyTerm> {
        self.lock().map(|s| s.terms.clone()).unwrap_or_default()
    }

    /// All stored records with their identifiers, in creation order
    pub fn records(&self) -> Vec<(RecordId, NewRecord)> {
        self.lock()
            .map(|s| {
                s.records
                    .iter()
                    .map(|stored| (stored.summary.id, stored.record.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl TermStore for InMemoryStore {
    async fn find_terms(&self, name: &str, vocabulary: &str) -> AppResult<Vec<TaxonomyTerm>> {
        let state = self.lock()?;
        Ok(state
            .terms
            .iter()
            .filter(|t| t.name == name && t.vocabulary == vocabulary)
            .cloned()
            .collect())
    }

    async fn create_term(&self, name: &str, vocabulary: &str) -> AppResult<TaxonomyTerm> {
        let mut state = self.lock()?;
        if let Some(existing) = state
            .terms
            .iter()
            .find(|t| t.name == name && t.vocabulary == vocabulary)
        {
            return Ok(existing.clone());
        }

        let term = TaxonomyTerm {
            id: state.terms.len() as i64 + 1,
            vocabulary: vocabulary.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        state.terms.push(term.clone());
        Ok(term)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn create_record(&self, record: &NewRecord) -> AppResult<RecordId> {
        let mut state = self.lock()?;
        let id = state.records.len() as i64 + 1;
        state.records.push(StoredRecord {
            summary: RecordSummary {
                id,
                title: record.title.clone(),
                content_type: record.content_type.clone(),
                published: record.published,
                created_at: Utc::now(),
            },
            record: record.clone(),
        });
        Ok(id)
    }

    async fn find_records_by_attribute(
        &self,
        field: &str,
        value: &AttributeValue,
    ) -> AppResult<Vec<RecordSummary>> {
        let state = self.lock()?;
        Ok(state
            .records
            .iter()
            .filter(|stored| stored.record.attribute(field) == Some(value))
            .map(|stored| stored.summary.clone())
            .collect())
    }
}

#[async_trait]
impl SettingsStore for InMemoryStore {
    async fn load_settings(&self) -> AppResult<Option<SettingsPayload>> {
        Ok(self.lock()?.settings.clone())
    }

    async fn save_settings(&self, payload: &SettingsPayload) -> AppResult<()> {
        self.lock()?.settings = Some(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[tokio::test]
    async fn test_create_term_is_unique_per_vocabulary() {
        let store = InMemoryStore::new();
        let a = store.create_term("Smith, Jane", "person").await.unwrap();
        let b = store.create_term("Smith, Jane", "person").await.unwrap();
        let c = store.create_term("Smith, Jane", "genre").await.unwrap();

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(store.terms().len(), 2);
    }

    #[tokio::test]
    async fn test_find_records_by_attribute() {
        let store = InMemoryStore::new();
        let record = NewRecord {
            title: Some("On Things".to_string()),
            content_type: "islandora_object".to_string(),
            published: false,
            attributes: BTreeMap::from([(
                "field_doi".to_string(),
                AttributeValue::Text("10.1000/1".to_string()),
            )]),
        };
        let id = store.create_record(&record).await.unwrap();

        let hits = store
            .find_records_by_attribute("field_doi", &AttributeValue::Text("10.1000/1".into()))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, id);
        assert_eq!(hits[0].title.as_deref(), Some("On Things"));

        let misses = store
            .find_records_by_attribute("field_doi", &AttributeValue::Text("10.1000/2".into()))
            .await
            .unwrap();
        assert!(misses.is_empty());
    }
}
