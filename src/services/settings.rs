//! Settings service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{PrefillSettings, SettingsPayload},
    repository::SettingsStore,
};

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Current settings, or the built-in defaults when none were saved
    pub async fn get_settings(&self) -> AppResult<PrefillSettings> {
        match self.store.load_settings().await? {
            Some(payload) => PrefillSettings::try_from(payload),
            None => Ok(PrefillSettings::default()),
        }
    }

    /// Validate and save settings
    pub async fn update_settings(&self, payload: SettingsPayload) -> AppResult<PrefillSettings> {
        let settings = PrefillSettings::try_from(payload)?;
        self.store
            .save_settings(&SettingsPayload::from(&settings))
            .await?;
        tracing::info!(
            "Prefill settings updated: content type '{}', {} term mapping(s)",
            settings.content_type,
            settings.term_mapping.len()
        );
        Ok(settings)
    }
}
