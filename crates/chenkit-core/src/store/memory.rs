//! In-memory [`VectorStore`] implementation.
//!
//! Entries live in a `Vec` in insertion order with a `HashMap` from id to
//! position. Vector search is brute-force cosine similarity over all
//! stored vectors, which is plenty for a corpus of a few hundred documents.

use std::collections::HashMap;

use crate::embedding::cosine_similarity;
use crate::models::DocKind;

use super::{VectorEntry, VectorMatch, VectorStore};

/// In-memory vector store.
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    entries: Vec<VectorEntry>,
    positions: HashMap<String, usize>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorStore for InMemoryVectorStore {
    fn upsert(&mut self, entry: VectorEntry) {
        match self.positions.get(&entry.document.id) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.positions
                    .insert(entry.document.id.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, id: &str) -> Option<&VectorEntry> {
        self.positions.get(id).map(|&pos| &self.entries[pos])
    }

    fn entries(&self) -> Box<dyn Iterator<Item = &VectorEntry> + '_> {
        Box::new(self.entries.iter())
    }

    fn nearest(&self, query: &[f32], limit: usize, kind: Option<DocKind>) -> Vec<VectorMatch<'_>> {
        if limit == 0 {
            return Vec::new();
        }

        let mut matches: Vec<VectorMatch<'_>> = self
            .entries
            .iter()
            .filter(|e| kind.map_or(true, |k| e.document.kind == k))
            .map(|entry| VectorMatch {
                entry,
                similarity: cosine_similarity(query, &entry.vector),
            })
            .collect();

        // Stable sort keeps insertion order among equal similarities.
        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(limit);
        matches
    }
}
