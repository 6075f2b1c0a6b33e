//! Projection of Crossref metadata onto destination record fields

use std::collections::BTreeMap;

use crate::models::{
    AttributeValue, FieldKey, FieldMapping, MetadataAuthor, MetadataRecord, NewRecord, RecordId,
    TermId, TermMapping, TypedRelation,
};

/// Term ids reconciled for one metadata record
#[derive(Debug, Clone, Default)]
pub struct ReconciledTerms {
    /// One per author, in author order
    pub authors: Vec<TermId>,
    pub genre: TermId,
}

/// Values every new record gets regardless of the field mapping
#[derive(Debug, Clone)]
pub struct StaticDefaults<'a> {
    pub content_type: &'a str,
    pub collection_field: &'a str,
    pub collection_id: RecordId,
    pub doi: &'a str,
    pub author_relator: &'a str,
    pub abstract_format: &'a str,
}

/// `"family"` or `"family, given"`; corporate contributors use their name
pub fn author_term_name(author: &MetadataAuthor) -> String {
    let family = author
        .family
        .as_deref()
        .or(author.name.as_deref())
        .unwrap_or_default();
    match author.given.as_deref() {
        Some(given) => format!("{}, {}", family, given),
        None => family.to_string(),
    }
}

/// Genre term name for the record type, after admin replacements
pub fn resolve_genre(record: &MetadataRecord, term_mapping: &TermMapping) -> String {
    term_mapping
        .get(&record.work_type)
        .unwrap_or(record.work_type.as_str())
        .to_string()
}

/// `[2020, 3, 1]` -> `"2020-03-01"`, `[2020]` -> `"2020"`
pub fn format_date_parts(parts: &[i32]) -> String {
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i == 0 {
                part.to_string()
            } else {
                format!("{:02}", part)
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Build the unpublished record for `record`.
///
/// Logical fields without a destination in `mapping` are skipped.
pub fn project(
    record: &MetadataRecord,
    terms: &ReconciledTerms,
    mapping: &FieldMapping,
    defaults: &StaticDefaults<'_>,
) -> NewRecord {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        defaults.collection_field.to_string(),
        AttributeValue::Reference(defaults.collection_id),
    );

    let mut set = |key: FieldKey, value: AttributeValue| {
        if let Some(field) = mapping.get(key) {
            attributes.insert(field.to_string(), value);
        }
    };

    if let Some(title) = record.title() {
        set(FieldKey::Title, AttributeValue::Text(title.to_string()));
    }

    set(
        FieldKey::Contributors,
        AttributeValue::Relations(
            terms
                .authors
                .iter()
                .map(|id| TypedRelation {
                    target_id: *id,
                    rel_type: defaults.author_relator.to_string(),
                })
                .collect(),
        ),
    );
    set(
        FieldKey::Publisher,
        AttributeValue::Text(record.publisher.clone().unwrap_or_default()),
    );
    set(FieldKey::Doi, AttributeValue::Text(defaults.doi.to_string()));
    set(FieldKey::Genre, AttributeValue::Reference(terms.genre));
    set(
        FieldKey::Issue,
        AttributeValue::Text(record.issue.clone().unwrap_or_default()),
    );
    set(
        FieldKey::Volume,
        AttributeValue::Text(record.volume.clone().unwrap_or_default()),
    );
    set(
        FieldKey::DateIssued,
        AttributeValue::Text(
            record
                .created
                .first()
                .map(format_date_parts)
                .unwrap_or_default(),
        ),
    );

    // Optional fields
    if let Some(text) = &record.abstract_text {
        set(
            FieldKey::Abstract,
            AttributeValue::Formatted {
                value: text.clone(),
                format: defaults.abstract_format.to_string(),
            },
        );
    }
    if let Some(host_title) = record.host_title() {
        set(FieldKey::HostTitle, AttributeValue::Text(host_title.to_string()));
    }
    if let Some(online) = &record.published_online {
        set(
            FieldKey::DateOnline,
            AttributeValue::items(online.date_parts.iter().map(|p| format_date_parts(p))),
        );
    }
    if let Some(page) = &record.page {
        set(FieldKey::PageRange, AttributeValue::Text(page.clone()));
    }

    // Multivalued, always present
    set(
        FieldKey::SeriesIssn,
        AttributeValue::items(record.issn.iter().flatten().cloned()),
    );

    NewRecord {
        title: record.title().map(String::from),
        content_type: defaults.content_type.to_string(),
        published: false,
        attributes,
    }
}
