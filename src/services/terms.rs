//! Taxonomy term reconciliation

use std::sync::Arc;

use crate::{error::AppResult, models::TermId, repository::TermStore};

#[derive(Clone)]
pub struct TermReconciler {
    store: Arc<dyn TermStore>,
}

impl TermReconciler {
    pub fn new(store: Arc<dyn TermStore>) -> Self {
        Self { store }
    }

    /// Return the id of the term named `name` in `vocabulary`, creating it if needed.
    ///
    /// The name is taken literally: no trimming, empty names included.
    pub async fn reconcile(&self, name: &str, vocabulary: &str) -> AppResult<TermId> {
        let existing = self.store.find_terms(name, vocabulary).await?;
        if let Some(term) = existing.first() {
            tracing::debug!("Reusing term '{}' in '{}' (id={})", name, vocabulary, term.id);
            return Ok(term.id);
        }

        let term = self.store.create_term(name, vocabulary).await?;
        tracing::info!("Created term '{}' in '{}' (id={})", name, vocabulary, term.id);
        Ok(term.id)
    }
}
