//! Case-insensitive substring matching over source records.
//!
//! This is the plain keyword search the dashboard has always offered. Its
//! output is rank-ordered [`KeywordHit`]s: recipes first, then rules, then
//! transcripts, each in input order. It feeds
//! [`SemanticIndex::hybrid_search`](crate::index::SemanticIndex::hybrid_search)
//! and stands in for semantic search when no embedding backend exists.

use serde_json::Value;

use crate::models::{Attributes, DocKind, KeywordHit, SourceRecord};

/// Match `query` against all three collections.
pub fn keyword_search(
    query: &str,
    recipes: &[SourceRecord],
    rules: &[SourceRecord],
    transcripts: &[SourceRecord],
) -> Vec<KeywordHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    hits.extend(match_kind(DocKind::Recipe, recipes, &needle));
    hits.extend(match_kind(DocKind::Rule, rules, &needle));
    hits.extend(match_kind(DocKind::Transcript, transcripts, &needle));
    hits
}

/// Match one collection. `needle` must already be lowercased.
pub fn match_kind<'a>(
    kind: DocKind,
    records: &'a [SourceRecord],
    needle: &'a str,
) -> impl Iterator<Item = KeywordHit> + 'a {
    records
        .iter()
        .filter(move |r| record_matches(kind, r, needle))
        .map(move |r| to_hit(kind, r))
}

fn record_matches(kind: DocKind, record: &SourceRecord, needle: &str) -> bool {
    if record.content.to_lowercase().contains(needle) {
        return true;
    }
    kind == DocKind::Rule
        && ["tags", "category"].iter().any(|key| {
            record
                .meta_value(key)
                .is_some_and(|v| v.to_lowercase().contains(needle))
        })
}

fn to_hit(kind: DocKind, record: &SourceRecord) -> KeywordHit {
    let mut attributes = Attributes::new();
    for key in ["tags", "category"] {
        if let Some(value) = record.meta_value(key) {
            attributes.insert(key.to_string(), Value::from(value));
        }
    }
    if let Some(path) = record.path.as_deref() {
        attributes.insert("path".to_string(), Value::from(path));
    }

    KeywordHit {
        kind,
        name: record.name.clone(),
        title: record.title.clone(),
        attributes,
    }
}
