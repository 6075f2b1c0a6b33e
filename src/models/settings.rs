//! Prefill settings: destination content type, field mapping and genre term mapping

use std::{collections::BTreeMap, fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Logical metadata fields that can be mapped onto destination fields
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Title,
    Contributors,
    Publisher,
    Doi,
    Genre,
    Issue,
    Volume,
    DateIssued,
    Abstract,
    HostTitle,
    DateOnline,
    PageRange,
    SeriesIssn,
}

impl FieldKey {
    pub const ALL: [FieldKey; 13] = [
        FieldKey::Title,
        FieldKey::Contributors,
        FieldKey::Publisher,
        FieldKey::Doi,
        FieldKey::Genre,
        FieldKey::Issue,
        FieldKey::Volume,
        FieldKey::DateIssued,
        FieldKey::Abstract,
        FieldKey::HostTitle,
        FieldKey::DateOnline,
        FieldKey::PageRange,
        FieldKey::SeriesIssn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Title => "title",
            FieldKey::Contributors => "contributors",
            FieldKey::Publisher => "publisher",
            FieldKey::Doi => "doi",
            FieldKey::Genre => "genre",
            FieldKey::Issue => "issue",
            FieldKey::Volume => "volume",
            FieldKey::DateIssued => "date_issued",
            FieldKey::Abstract => "abstract",
            FieldKey::HostTitle => "host_title",
            FieldKey::DateOnline => "date_online",
            FieldKey::PageRange => "page_range",
            FieldKey::SeriesIssn => "series_issn",
        }
    }

    /// Human-readable label shown next to the key in the settings screen
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Title => "Title",
            FieldKey::Contributors => "Contributors",
            FieldKey::Publisher => "Publisher",
            FieldKey::Doi => "DOI",
            FieldKey::Genre => "Genre",
            FieldKey::Issue => "Issue",
            FieldKey::Volume => "Volume",
            FieldKey::DateIssued => "Date issued",
            FieldKey::Abstract => "Abstract",
            FieldKey::HostTitle => "Host title",
            FieldKey::DateOnline => "Date online",
            FieldKey::PageRange => "Page range",
            FieldKey::SeriesIssn => "Series ISSN",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown DOI field '{}'", s)))
    }
}

/// Logical field -> destination field identifier. Unmapped keys are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping(BTreeMap<FieldKey, String>);

impl FieldMapping {
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn set(&mut self, key: FieldKey, destination: impl Into<String>) {
        self.0.insert(key, destination.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.0.iter().map(|(key, field)| (*key, field.as_str()))
    }

    fn from_raw(raw: &BTreeMap<String, String>) -> Result<Self, AppError> {
        let mut mapping = Self::default();
        for (key, destination) in raw {
            let key: FieldKey = key.parse()?;
            let destination = destination.trim();
            // An empty selection leaves the field unmapped
            if !destination.is_empty() {
                mapping.set(key, destination);
            }
        }
        Ok(mapping)
    }
}

/// Ordered source term -> destination term pairs used to normalize genres
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMapping(IndexMap<String, String>);

impl TermMapping {
    pub fn get(&self, source: &str) -> Option<&str> {
        self.0.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build from pairs, rejecting blank entries and repeated source terms
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = IndexMap::new();
        for (key, value) in pairs {
            let (key, value): (String, String) = (key.into(), value.into());
            let (key, value) = (key.trim().to_string(), value.trim().to_string());
            if key.is_empty() || value.is_empty() {
                return Err(AppError::Validation(
                    "Term mappings need both a DOI term and a genre term".to_string(),
                ));
            }
            if map.contains_key(&key) {
                return Err(AppError::Validation(format!(
                    "DOI term '{}' is mapped more than once",
                    key
                )));
            }
            map.insert(key, value);
        }
        Ok(Self(map))
    }
}

/// Raw term pair as stored and exchanged over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TermPair {
    /// Term as returned by Crossref
    pub key: String,
    /// Replacement genre term
    pub value: String,
}

/// Settings as stored and exchanged over the API, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SettingsPayload {
    /// Content type of new records
    pub content_type: String,
    /// DOI field key -> destination field name
    #[serde(default)]
    pub field_settings: BTreeMap<String, String>,
    /// Genre replacements
    #[serde(default)]
    pub term_pairs: Vec<TermPair>,
}

/// Validated settings snapshot handed to the record builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefillSettings {
    pub content_type: String,
    pub field_mapping: FieldMapping,
    pub term_mapping: TermMapping,
}

impl TryFrom<SettingsPayload> for PrefillSettings {
    type Error = AppError;

    fn try_from(payload: SettingsPayload) -> Result<Self, Self::Error> {
        let content_type = payload.content_type.trim();
        if content_type.is_empty() {
            return Err(AppError::Validation("Content type cannot be empty".to_string()));
        }

        Ok(Self {
            content_type: content_type.to_string(),
            field_mapping: FieldMapping::from_raw(&payload.field_settings)?,
            term_mapping: TermMapping::from_pairs(
                payload.term_pairs.into_iter().map(|pair| (pair.key, pair.value)),
            )?,
        })
    }
}

impl From<&PrefillSettings> for SettingsPayload {
    fn from(settings: &PrefillSettings) -> Self {
        Self {
            content_type: settings.content_type.clone(),
            field_settings: settings
                .field_mapping
                .iter()
                .map(|(key, field)| (key.to_string(), field.to_string()))
                .collect(),
            term_pairs: settings
                .term_mapping
                .iter()
                .map(|(key, value)| TermPair {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

impl Default for PrefillSettings {
    fn default() -> Self {
        let mut field_mapping = FieldMapping::default();
        for key in FieldKey::ALL {
            let destination = match key {
                FieldKey::Title => "title".to_string(),
                other => format!("field_{}", other),
            };
            field_mapping.set(key, destination);
        }

        let term_mapping = TermMapping(
            [
                ("journal-article", "Journal Article"),
                ("book-chapter", "Book, Section"),
                ("monograph", "Book"),
                ("proceedings-article", "Conference Proceedings"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        );

        Self {
            content_type: "islandora_object".to_string(),
            field_mapping,
            term_mapping,
        }
    }
}
