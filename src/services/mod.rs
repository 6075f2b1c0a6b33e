//! Business logic services

pub mod builder;
pub mod crossref;
pub mod mapper;
pub mod prefill;
pub mod settings;
pub mod terms;

use std::sync::Arc;

use crate::{
    config::PrefillConfig,
    repository::{RecordStore, Repository, SettingsStore, TermStore},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub settings: settings::SettingsService,
    pub prefill: prefill::PrefillService,
}

impl Services {
    /// Create all services on top of the PostgreSQL repository
    pub fn new(
        repository: Repository,
        metadata: Arc<dyn crossref::MetadataSource>,
        config: PrefillConfig,
    ) -> Self {
        Self::with_stores(
            Arc::new(repository.terms),
            Arc::new(repository.records),
            Arc::new(repository.settings),
            metadata,
            config,
        )
    }

    /// Create all services on top of arbitrary storage backends
    pub fn with_stores(
        terms: Arc<dyn TermStore>,
        records: Arc<dyn RecordStore>,
        settings_store: Arc<dyn SettingsStore>,
        metadata: Arc<dyn crossref::MetadataSource>,
        config: PrefillConfig,
    ) -> Self {
        let settings = settings::SettingsService::new(settings_store);
        let builder =
            builder::RecordBuilder::new(metadata, terms.clone(), records.clone(), config.clone());
        Self {
            prefill: prefill::PrefillService::new(
                settings.clone(),
                builder,
                terms,
                records,
                config,
            ),
            settings,
        }
    }
}
