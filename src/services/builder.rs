//! Record builder: one DOI in, one unpublished record out
//!
//! Runs fetch, reconcile, map and persist in order, stopping early when
//! Crossref has nothing for the DOI. Terms created before a failed persist
//! are kept: they may already be shared with other records, and a retried
//! build reconciles to the same ids.

use std::sync::Arc;

use crate::{
    config::PrefillConfig,
    error::AppResult,
    models::{PrefillSettings, RecordId},
    repository::{RecordStore, TermStore},
};

use super::{
    crossref::MetadataSource,
    mapper::{self, ReconciledTerms, StaticDefaults},
    terms::TermReconciler,
};

#[derive(Clone)]
pub struct RecordBuilder {
    metadata: Arc<dyn MetadataSource>,
    terms: TermReconciler,
    records: Arc<dyn RecordStore>,
    config: PrefillConfig,
}

impl RecordBuilder {
    pub fn new(
        metadata: Arc<dyn MetadataSource>,
        terms: Arc<dyn TermStore>,
        records: Arc<dyn RecordStore>,
        config: PrefillConfig,
    ) -> Self {
        Self {
            metadata,
            terms: TermReconciler::new(terms),
            records,
            config,
        }
    }

    /// Build and save a record for `doi` inside `collection_id`.
    ///
    /// Returns `Ok(None)` when no metadata could be fetched; nothing is
    /// written in that case.
    pub async fn build(
        &self,
        settings: &PrefillSettings,
        collection_id: RecordId,
        doi: &str,
    ) -> AppResult<Option<RecordId>> {
        let record = match self.metadata.fetch(doi).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Failed to fetch citation from Crossref for {}: {}", doi, e);
                return Ok(None);
            }
        };
        tracing::debug!("Fetched {} ({} authors, type '{}')", doi, record.author.len(), record.work_type);

        let mut authors = Vec::with_capacity(record.author.len());
        for author in &record.author {
            let name = mapper::author_term_name(author);
            authors.push(self.terms.reconcile(&name, &self.config.person_vocabulary).await?);
        }
        let genre_name = mapper::resolve_genre(&record, &settings.term_mapping);
        let genre = self
            .terms
            .reconcile(&genre_name, &self.config.genre_vocabulary)
            .await?;

        let defaults = StaticDefaults {
            content_type: &settings.content_type,
            collection_field: &self.config.collection_field,
            collection_id,
            doi,
            author_relator: &self.config.author_relator,
            abstract_format: &self.config.abstract_format,
        };
        let new_record = mapper::project(
            &record,
            &ReconciledTerms { authors, genre },
            &settings.field_mapping,
            &defaults,
        );

        let id = self.records.create_record(&new_record).await?;
        tracing::info!("Created record id={} from DOI {} in collection {}", id, doi, collection_id);
        Ok(Some(id))
    }
}
