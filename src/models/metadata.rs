//! Bibliographic metadata returned by the Crossref works API

use serde::Deserialize;

/// `{ "date-parts": [[2020, 3, 1], ...] }`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DateParts {
    #[serde(rename = "date-parts", default)]
    pub date_parts: Vec<Vec<i32>>,
}

impl DateParts {
    pub fn first(&self) -> Option<&[i32]> {
        self.date_parts.first().map(Vec::as_slice)
    }
}

/// Contributor as listed by Crossref
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MetadataAuthor {
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub given: Option<String>,
    /// Corporate contributors carry a single `name` instead of family/given
    #[serde(default)]
    pub name: Option<String>,
}

/// One work, as found under the `message` key of the API envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MetadataRecord {
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub author: Vec<MetadataAuthor>,
    pub publisher: Option<String>,
    #[serde(rename = "type", default)]
    pub work_type: String,
    pub issue: Option<String>,
    pub volume: Option<String>,
    #[serde(default)]
    pub created: DateParts,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub container_title: Option<Vec<String>>,
    pub published_online: Option<DateParts>,
    pub page: Option<String>,
    #[serde(rename = "ISSN")]
    pub issn: Option<Vec<String>>,
}

impl MetadataRecord {
    pub fn title(&self) -> Option<&str> {
        self.title.first().map(String::as_str)
    }

    pub fn host_title(&self) -> Option<&str> {
        self.container_title
            .as_ref()
            .and_then(|titles| titles.first())
            .map(String::as_str)
    }
}
