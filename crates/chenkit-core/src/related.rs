//! Term-overlap relatedness graph.
//!
//! For each recipe and rule the graph extracts a set of key terms
//! (lowercased words of four or more letters). Each document is compared
//! with the documents after it in input order (recipes, then rules) and
//! lists those sharing at least [`MIN_SHARED_TERMS`] terms. Links are
//! forward only: a document never lists one that precedes it. Each list
//! keeps the first [`MAX_NEIGHBORS`] matches in comparison order, a breadth
//! cap rather than a ranking.
//!
//! The graph is derived data, rebuilt from scratch together with the
//! semantic index and read-only in between.

use std::collections::{BTreeSet, HashMap};

use crate::models::{DocKind, SourceRecord};

/// Minimum number of shared key terms for two documents to be related.
pub const MIN_SHARED_TERMS: usize = 3;

/// Neighbours kept per document.
pub const MAX_NEIGHBORS: usize = 5;

/// Minimum key term length, in characters.
pub const MIN_TERM_CHARS: usize = 4;

/// Accented letters accepted in key terms besides ASCII letters.
pub const ACCENTED_LETTERS: &str = "ąćęłńóśźż";

/// Precomputed neighbour lists keyed by `kind:name`.
#[derive(Debug, Clone, Default)]
pub struct RelatednessGraph {
    connections: HashMap<String, Vec<String>>,
}

impl RelatednessGraph {
    /// Build the graph over all recipes (ingredient terms) and rules
    /// (full-content terms).
    pub fn build(recipes: &[SourceRecord], rules: &[SourceRecord]) -> Self {
        let mut docs: Vec<(String, BTreeSet<String>)> = Vec::with_capacity(recipes.len() + rules.len());

        for r in recipes {
            let mut terms = BTreeSet::new();
            for item in &r.items {
                terms.extend(key_terms(item));
            }
            docs.push((doc_key(DocKind::Recipe, &r.name), terms));
        }
        for r in rules {
            docs.push((doc_key(DocKind::Rule, &r.name), key_terms(&r.content)));
        }

        let mut connections: HashMap<String, Vec<String>> = HashMap::new();
        for (i, (key_a, terms_a)) in docs.iter().enumerate() {
            for (key_b, terms_b) in &docs[i + 1..] {
                if key_a == key_b || shared_term_count(terms_a, terms_b) < MIN_SHARED_TERMS {
                    continue;
                }
                push_capped(&mut connections, key_a, key_b);
            }
        }

        tracing::debug!(
            documents = docs.len(),
            linked = connections.len(),
            "built relatedness graph"
        );

        Self { connections }
    }

    /// Up to `top_k` related ids (`kind:name`) for a document; empty for
    /// unknown keys.
    pub fn get_related(&self, kind: &str, name: &str, top_k: usize) -> Vec<String> {
        self.connections
            .get(&format!("{}:{}", kind, name))
            .map(|ids| ids.iter().take(top_k).cloned().collect())
            .unwrap_or_default()
    }

    /// Number of documents with at least one neighbour.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

fn doc_key(kind: DocKind, name: &str) -> String {
    format!("{}:{}", kind.as_str(), name)
}

fn push_capped(connections: &mut HashMap<String, Vec<String>>, from: &str, to: &str) {
    let list = connections.entry(from.to_string()).or_default();
    if list.len() < MAX_NEIGHBORS && !list.iter().any(|id| id == to) {
        list.push(to.to_string());
    }
}

/// Extract the key terms of a text.
///
/// A term is a maximal run of word characters, lowercased, at least
/// [`MIN_TERM_CHARS`] long and made only of ASCII letters or
/// [`ACCENTED_LETTERS`]. Runs containing digits, underscores or other
/// letters are dropped whole.
pub fn key_terms(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|run| run.chars().count() >= MIN_TERM_CHARS && run.chars().all(is_term_letter))
        .map(str::to_string)
        .collect()
}

/// Number of key terms two term sets have in common.
pub fn shared_term_count(a: &BTreeSet<String>, b: &BTreeSet<String>) -> usize {
    a.intersection(b).count()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_term_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ACCENTED_LETTERS.contains(c)
}
