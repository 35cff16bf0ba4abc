//! Builders turning [`SourceRecord`]s into indexable [`Document`]s.
//!
//! | Kind | Documents produced |
//! |------|--------------------|
//! | Recipe | one summary (title, tags, ingredients, preparation steps) |
//! | Rule | the whole article, plus one per section with 2+ lines |
//! | Transcript | one per paragraph chunk |
//!
//! Builders never fail: a missing title, tag list or category is left out
//! of the embedded text and the attributes.

use serde_json::Value;

use crate::chunk::chunk_text;
use crate::models::{Attributes, DocKind, Document, SourceRecord};

/// Section labels treated as preparation steps in recipes (case-insensitive).
pub const STEP_SECTION_LABELS: &[&str] = &[
    "steps",
    "instructions",
    "method",
    "preparation",
    "directions",
    "kroki",
    "przygotowanie",
];

const MAX_RECIPE_ITEMS: usize = 15;
const MAX_STEP_LINES: usize = 10;
const RULE_EXCERPT_CHARS: usize = 1500;
const MIN_SECTION_LINES: usize = 2;

/// Build the documents for one source record of the given kind.
pub fn build_documents(kind: DocKind, record: &SourceRecord, max_tokens: usize) -> Vec<Document> {
    match kind {
        DocKind::Recipe => vec![build_recipe(record)],
        DocKind::Rule => build_rule(record),
        DocKind::Transcript => build_transcript(record, max_tokens),
    }
}

/// Summarize a recipe into a single document.
pub fn build_recipe(record: &SourceRecord) -> Document {
    let title = record.display_title();
    let mut parts = vec![title.to_string()];

    if let Some(tags) = record.meta_value("tags") {
        parts.push(format!("Tags: {}", tags));
    }

    if !record.items.is_empty() {
        let items: Vec<&str> = record
            .items
            .iter()
            .take(MAX_RECIPE_ITEMS)
            .map(String::as_str)
            .collect();
        parts.push(format!("Ingredients: {}", items.join(", ")));
    }

    for section in &record.sections {
        if is_step_section(&section.label) {
            let lines: Vec<&str> = section
                .lines
                .iter()
                .take(MAX_STEP_LINES)
                .map(String::as_str)
                .collect();
            parts.push(lines.join("\n"));
        }
    }

    let mut attributes = base_attributes(record);
    insert_meta(&mut attributes, record, "tags");

    Document {
        kind: DocKind::Recipe,
        id: format!("recipe:{}", record.name),
        name: record.name.clone(),
        title: title.to_string(),
        text: parts.join("\n"),
        attributes,
    }
}

/// Build the whole-article document plus one document per substantial section.
pub fn build_rule(record: &SourceRecord) -> Vec<Document> {
    let title = record.display_title();
    let base_id = format!("rule:{}", record.name);
    let excerpt: String = record.content.chars().take(RULE_EXCERPT_CHARS).collect();

    let mut attributes = base_attributes(record);
    insert_meta(&mut attributes, record, "category");

    let mut docs = vec![Document {
        kind: DocKind::Rule,
        id: base_id.clone(),
        name: record.name.clone(),
        title: title.to_string(),
        text: format!("{}\n\n{}", title, excerpt),
        attributes: attributes.clone(),
    }];

    for section in &record.sections {
        if section.lines.len() < MIN_SECTION_LINES {
            continue;
        }
        let mut section_attrs = attributes.clone();
        section_attrs.insert("section".to_string(), Value::from(section.label.clone()));

        docs.push(Document {
            kind: DocKind::Rule,
            id: format!("{}:{}", base_id, section.label),
            name: record.name.clone(),
            title: title.to_string(),
            text: format!("{} - {}\n{}", title, section.label, section.lines.join("\n")),
            attributes: section_attrs,
        });
    }

    docs
}

/// Chunk a transcript into one document per chunk.
pub fn build_transcript(record: &SourceRecord, max_tokens: usize) -> Vec<Document> {
    let title = record.display_title();

    chunk_text(&record.content, max_tokens)
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let mut attributes = base_attributes(record);
            attributes.insert("chunk".to_string(), Value::from(i));
            Document {
                kind: DocKind::Transcript,
                id: format!("transcript:{}:{}", record.name, i),
                name: record.name.clone(),
                title: title.to_string(),
                text: chunk,
                attributes,
            }
        })
        .collect()
}

fn is_step_section(label: &str) -> bool {
    let label = label.trim().to_lowercase();
    STEP_SECTION_LABELS.contains(&label.as_str())
}

fn base_attributes(record: &SourceRecord) -> Attributes {
    let mut attributes = Attributes::new();
    if let Some(path) = record.path.as_deref().filter(|p| !p.is_empty()) {
        attributes.insert("path".to_string(), Value::from(path));
    }
    attributes
}

fn insert_meta(attributes: &mut Attributes, record: &SourceRecord, key: &str) {
    if let Some(value) = record.meta_value(key) {
        attributes.insert(key.to_string(), Value::from(value));
    }
}
