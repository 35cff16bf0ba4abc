//! Vector storage abstraction for Chenkit.
//!
//! The [`VectorStore`] trait defines the operations the semantic index
//! needs from a backend: keyed upsert of documents with their vectors,
//! wholesale clearing between generations, and nearest-neighbour lookup
//! with an optional kind filter.
//!
//! The only shipped backend is [`memory::InMemoryVectorStore`]; the index
//! is ephemeral and rebuilt on every process start, so there is no
//! on-disk schema.

pub mod memory;

use crate::models::{DocKind, Document};

/// A stored document together with its embedding.
#[derive(Debug, Clone)]
pub struct VectorEntry {
    pub document: Document,
    pub vector: Vec<f32>,
    /// SHA-256 of `document.text`, used to reuse embeddings across rebuilds.
    pub content_hash: String,
}

/// A nearest-neighbour match borrowed from the store.
#[derive(Debug, Clone, Copy)]
pub struct VectorMatch<'a> {
    pub entry: &'a VectorEntry,
    /// Cosine similarity in `[-1.0, 1.0]`.
    pub similarity: f32,
}

/// Abstract vector storage backend.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`upsert`](VectorStore::upsert) | Insert an entry or replace one with the same id |
/// | [`clear`](VectorStore::clear) | Drop every entry (start of a new generation) |
/// | [`get`](VectorStore::get) | Look up an entry by document id |
/// | [`nearest`](VectorStore::nearest) | Cosine-ranked lookup with an optional kind filter |
pub trait VectorStore {
    /// Insert an entry, replacing any existing entry with the same id.
    fn upsert(&mut self, entry: VectorEntry);

    /// Remove every entry.
    fn clear(&mut self);

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve an entry by document id.
    fn get(&self, id: &str) -> Option<&VectorEntry>;

    /// Iterate entries in insertion order.
    fn entries(&self) -> Box<dyn Iterator<Item = &VectorEntry> + '_>;

    /// Return up to `limit` entries most similar to `query`, descending by
    /// similarity. Ties keep insertion order.
    fn nearest(&self, query: &[f32], limit: usize, kind: Option<DocKind>) -> Vec<VectorMatch<'_>>;
}
