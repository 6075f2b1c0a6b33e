//! Data models for DOI prefill

pub mod metadata;
pub mod record;
pub mod settings;
pub mod term;

// Re-export commonly used types
pub use metadata::{MetadataAuthor, MetadataRecord};
pub use record::{AttributeValue, NewRecord, RecordId, RecordSummary, TypedRelation};
pub use settings::{FieldKey, FieldMapping, PrefillSettings, SettingsPayload, TermMapping};
pub use term::{TaxonomyTerm, TermId};
