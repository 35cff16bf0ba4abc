//! Core data models used throughout Chenkit.
//!
//! These types represent the source records handed over by the host, the
//! documents derived from them for embedding, and the hits returned from
//! the search engine.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Open metadata carried alongside a document for display and filtering.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// The kind of an indexable document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Recipe,
    Rule,
    Transcript,
}

impl DocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Recipe => "recipe",
            DocKind::Rule => "rule",
            DocKind::Transcript => "transcript",
        }
    }

    /// Parse a kind label, returning `None` for anything unrecognized.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "recipe" | "recipes" => Some(DocKind::Recipe),
            "rule" | "rules" => Some(DocKind::Rule),
            "transcript" | "transcripts" => Some(DocKind::Transcript),
            _ => None,
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocKind::parse(s).ok_or_else(|| {
            format!("Unknown document kind: {}. Use recipe, rule, or transcript.", s)
        })
    }
}

/// A `## ` section of a markdown source: its label and non-empty lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub label: String,
    pub lines: Vec<String>,
}

/// Plain structured representation of one markdown file.
///
/// Produced by the host's loader. Every field except `name` and `content`
/// is optional in spirit: builders skip whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// File stem, unique per source folder.
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    /// Raw file content.
    #[serde(default)]
    pub content: String,
    /// Checklist entries (`- [ ] ...`), e.g. recipe ingredients.
    #[serde(default)]
    pub items: Vec<String>,
    /// `key: value` lines, keys lowercased.
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    /// Sections in file order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl SourceRecord {
    /// Display title, falling back to the record name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Look up a metadata value, ignoring empty values.
    pub fn meta_value(&self, key: &str) -> Option<&str> {
        self.meta
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// One indexable unit of text derived from a [`SourceRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub kind: DocKind,
    /// `kind:name`, `kind:name:section` or `kind:name:chunk_index`.
    pub id: String,
    pub name: String,
    pub title: String,
    /// The text that gets embedded.
    pub text: String,
    pub attributes: Attributes,
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    /// Relevance score; `[0.0, 1.0]` for semantic search.
    pub score: f64,
    pub kind: DocKind,
    pub name: String,
    pub title: String,
    pub attributes: Attributes,
    /// Score breakdown, populated by hybrid search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<ScoreExplanation>,
}

/// Contributions of each source to a hybrid score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreExplanation {
    /// Weighted semantic contribution (0.0 if absent from semantic hits).
    pub semantic: f64,
    /// Summed, decayed keyword contribution (0.0 if absent from keyword hits).
    pub keyword: f64,
    /// The semantic weight used.
    pub semantic_weight: f64,
}

/// A keyword match supplied by the host; only its rank position matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub kind: DocKind,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl KeywordHit {
    pub fn new(kind: DocKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            title: None,
            attributes: Attributes::new(),
        }
    }
}
