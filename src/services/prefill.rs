//! DOI prefill flow: duplicate check, settings snapshot, build

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::PrefillConfig,
    error::{AppError, AppResult},
    models::{AttributeValue, FieldKey, RecordId, RecordSummary},
    repository::{RecordStore, TermStore},
};

use super::{builder::RecordBuilder, settings::SettingsService};

pub const NO_INFORMATION: &str = "Crossref returned no information.";

/// What the caller should do next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PrefillOutcome {
    /// Record created, continue editing it
    Created {
        #[schema(value_type = i64)]
        record_id: RecordId,
        edit_path: String,
    },
    /// Nothing fetched, show the warning and stay put
    NoInformation { warning: String },
}

#[derive(Clone)]
pub struct PrefillService {
    settings: SettingsService,
    builder: RecordBuilder,
    terms: Arc<dyn TermStore>,
    records: Arc<dyn RecordStore>,
    config: PrefillConfig,
}

impl PrefillService {
    pub fn new(
        settings: SettingsService,
        builder: RecordBuilder,
        terms: Arc<dyn TermStore>,
        records: Arc<dyn RecordStore>,
        config: PrefillConfig,
    ) -> Self {
        Self {
            settings,
            builder,
            terms,
            records,
            config,
        }
    }

    /// Records that can receive new items, i.e. those modelled as collections
    pub async fn list_collections(&self) -> AppResult<Vec<RecordSummary>> {
        let models = self
            .terms
            .find_terms(&self.config.collection_model_term, &self.config.model_vocabulary)
            .await?;
        let Some(model) = models.first() else {
            tracing::warn!(
                "No '{}' term in '{}', no collections available",
                self.config.collection_model_term,
                self.config.model_vocabulary
            );
            return Ok(Vec::new());
        };

        self.records
            .find_records_by_attribute(&self.config.model_field, &AttributeValue::Reference(model.id))
            .await
    }

    /// Create an unpublished record for `doi` in `collection_id`
    pub async fn prefill(&self, collection_id: RecordId, doi: &str) -> AppResult<PrefillOutcome> {
        let doi = doi.trim();
        if doi.is_empty() {
            return Err(AppError::Validation("DOI cannot be empty".to_string()));
        }

        let collections = self.list_collections().await?;
        if !collections.iter().any(|c| c.id == collection_id) {
            return Err(AppError::NotFound(format!("Collection {} not found", collection_id)));
        }

        let settings = self.settings.get_settings().await?;

        if let Some(doi_field) = settings.field_mapping.get(FieldKey::Doi) {
            let existing = self
                .records
                .find_records_by_attribute(doi_field, &AttributeValue::Text(doi.to_string()))
                .await?;
            if !existing.is_empty() {
                let links: Vec<String> = existing.iter().map(|r| format!("/records/{}", r.id)).collect();
                return Err(AppError::Conflict(format!(
                    "DOI already exists in the system. {}",
                    links.join(", ")
                )));
            }
        }

        match self.builder.build(&settings, collection_id, doi).await? {
            Some(record_id) => Ok(PrefillOutcome::Created {
                record_id,
                edit_path: format!("/records/{}/edit", record_id),
            }),
            None => {
                tracing::warn!("No record created for DOI {}", doi);
                Ok(PrefillOutcome::NoInformation {
                    warning: NO_INFORMATION.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        error::FetchError,
        models::{MetadataRecord, NewRecord},
        repository::memory::InMemoryStore,
        services::crossref::MockMetadataSource,
    };

    fn service(source: MockMetadataSource, store: Arc<InMemoryStore>) -> PrefillService {
        let config = PrefillConfig::default();
        PrefillService::new(
            SettingsService::new(store.clone()),
            RecordBuilder::new(Arc::new(source), store.clone(), store.clone(), config.clone()),
            store.clone(),
            store,
            config,
        )
    }

    /// Store with one collection record; returns its id
    async fn store_with_collection() -> (Arc<InMemoryStore>, RecordId) {
        let store = Arc::new(InMemoryStore::new());
        let model = store.create_term("Collection", "islandora_models").await.unwrap();
        let id = store
            .create_record(&NewRecord {
                title: Some("Theses".to_string()),
                content_type: "islandora_object".to_string(),
                published: true,
                attributes: BTreeMap::from([(
                    "field_model".to_string(),
                    AttributeValue::Reference(model.id),
                )]),
            })
            .await
            .unwrap();
        (store, id)
    }

    fn source_with_work() -> MockMetadataSource {
        let mut source = MockMetadataSource::new();
        source.expect_fetch().returning(|_| {
            Ok(MetadataRecord {
                title: vec!["On Things".to_string()],
                work_type: "monograph".to_string(),
                ..Default::default()
            })
        });
        source
    }

    #[tokio::test]
    async fn test_prefill_creates_record_and_edit_path() {
        let (store, collection) = store_with_collection().await;
        let service = service(source_with_work(), store.clone());

        let outcome = service.prefill(collection, "  10.1000/xyz \n").await.unwrap();

        let (record_id, edit_path) = match outcome {
            PrefillOutcome::Created { record_id, edit_path } => (record_id, edit_path),
            other => panic!("expected a created record, got {:?}", other),
        };
        assert_eq!(edit_path, format!("/records/{}/edit", record_id));
        let (_, record) = store
            .records()
            .into_iter()
            .find(|(id, _)| *id == record_id)
            .unwrap();
        assert_eq!(
            record.attribute("field_doi").and_then(AttributeValue::as_text),
            Some("10.1000/xyz")
        );
    }

    #[tokio::test]
    async fn test_prefill_rejects_known_doi() {
        let (store, collection) = store_with_collection().await;
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(MetadataRecord::default()));
        let service = service(source, store.clone());

        service.prefill(collection, "10.1000/xyz").await.unwrap();
        let err = service.prefill(collection, "10.1000/xyz").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref msg) if msg.contains("already exists")));
    }

    #[tokio::test]
    async fn test_prefill_warns_when_nothing_fetched() {
        let (store, collection) = store_with_collection().await;
        let mut source = MockMetadataSource::new();
        source
            .expect_fetch()
            .returning(|_| Err(FetchError::MissingEnvelope));
        let service = service(source, store.clone());

        let outcome = service.prefill(collection, "10.1000/none").await.unwrap();

        assert_eq!(
            outcome,
            PrefillOutcome::NoInformation {
                warning: NO_INFORMATION.to_string()
            }
        );
        // Only the collection itself
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_prefill_rejects_blank_doi_and_unknown_collection() {
        let (store, collection) = store_with_collection().await;
        let mut source = MockMetadataSource::new();
        source.expect_fetch().never();
        let service = service(source, store);

        assert!(matches!(
            service.prefill(collection, "   ").await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.prefill(collection + 100, "10.1000/xyz").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_collections() {
        let (store, collection) = store_with_collection().await;
        let service = service(MockMetadataSource::new(), store);

        let collections = service.list_collections().await.unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].id, collection);
        assert_eq!(collections[0].title.as_deref(), Some("Theses"));

        let empty = service_without_model().list_collections().await.unwrap();
        assert!(empty.is_empty());
    }

    fn service_without_model() -> PrefillService {
        service(MockMetadataSource::new(), Arc::new(InMemoryStore::new()))
    }
}
