//! The semantic index: documents, embeddings, and the relatedness graph of
//! one generation.
//!
//! A [`SemanticIndex`] is owned by the host and rebuilt wholesale with
//! [`index_all`](SemanticIndex::index_all) whenever the library changes.
//! Rebuilding computes every document and embedding before touching the
//! store, so a failed rebuild leaves the previous generation in place.
//! Embeddings of unchanged texts (same SHA-256) are carried over from the
//! previous generation instead of being recomputed.
//!
//! # Example
//!
//! ```rust
//! use chenkit_core::embedding::HashingProvider;
//! use chenkit_core::{IndexSettings, SemanticIndex, SourceRecord};
//!
//! let mut index = SemanticIndex::new(Box::new(HashingProvider::default()), IndexSettings::default())?;
//! let rule = SourceRecord {
//!     name: "ginger".to_string(),
//!     content: "Ginger is warming and helps digestion.".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(index.index_all(&[], &[rule], &[])?, 1);
//!
//! let hits = index.search("warming ginger", 5, Some("rule"))?;
//! assert_eq!(hits[0].name, "ginger");
//! # Ok::<(), chenkit_core::IndexError>(())
//! ```

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::chunk::DEFAULT_MAX_TOKENS;
use crate::documents::build_documents;
use crate::embedding::{embed_query, EmbeddingProvider};
use crate::error::{IndexError, Result};
use crate::hybrid::{self, round_score};
use crate::models::{DocKind, Document, KeywordHit, SearchHit, SourceRecord};
use crate::related::RelatednessGraph;
use crate::store::memory::InMemoryVectorStore;
use crate::store::{VectorEntry, VectorStore};

/// Indexing parameters, decoupled from application config.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    /// Word budget per transcript chunk.
    pub chunk_max_tokens: usize,
    /// Texts sent to the provider per `embed` call.
    pub batch_size: usize,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            chunk_max_tokens: DEFAULT_MAX_TOKENS,
            batch_size: 64,
        }
    }
}

/// Vector index over recipes, rules and transcript chunks.
pub struct SemanticIndex<S: VectorStore = InMemoryVectorStore> {
    provider: Box<dyn EmbeddingProvider>,
    store: S,
    graph: RelatednessGraph,
    settings: IndexSettings,
    generation: u64,
}

impl SemanticIndex<InMemoryVectorStore> {
    /// Create an empty in-memory index.
    ///
    /// # Errors
    ///
    /// [`IndexError::DependencyUnavailable`] if the provider has no usable
    /// backend (reports zero dimensions).
    pub fn new(provider: Box<dyn EmbeddingProvider>, settings: IndexSettings) -> Result<Self> {
        Self::with_store(provider, InMemoryVectorStore::new(), settings)
    }
}

impl<S: VectorStore> SemanticIndex<S> {
    /// Create an index on top of a caller-supplied store.
    pub fn with_store(
        provider: Box<dyn EmbeddingProvider>,
        store: S,
        settings: IndexSettings,
    ) -> Result<Self> {
        if provider.dims() == 0 {
            return Err(IndexError::DependencyUnavailable(format!(
                "provider '{}' has no embedding backend",
                provider.model_name()
            )));
        }

        Ok(Self {
            provider,
            store,
            graph: RelatednessGraph::default(),
            settings,
            generation: 0,
        })
    }

    /// Model identifier of the embedding provider.
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Number of stored documents (including sections and chunks).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Number of completed rebuilds.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Embed and store one document, replacing any entry with the same id.
    ///
    /// If the stored entry under that id has the same text, its vector is
    /// kept and the provider is not called.
    pub fn add(&mut self, document: Document) -> Result<()> {
        let content_hash = content_hash(&document.text);
        let existing = self
            .store
            .get(&document.id)
            .filter(|e| e.content_hash == content_hash)
            .map(|e| e.vector.clone());
        let vector = match existing {
            Some(vector) => vector,
            None => self
                .embed_batch(&[document.text.clone()])?
                .pop()
                .ok_or_else(|| IndexError::Embedding("Empty embedding response".to_string()))?,
        };

        self.store.upsert(VectorEntry {
            document,
            vector,
            content_hash,
        });
        Ok(())
    }

    /// Rebuild the whole index from the current source records.
    ///
    /// Runs every builder, embeds all resulting documents, replaces the
    /// previous generation and rebuilds the relatedness graph. Returns the
    /// number of source records indexed (not sub-documents).
    pub fn index_all(
        &mut self,
        recipes: &[SourceRecord],
        rules: &[SourceRecord],
        transcripts: &[SourceRecord],
    ) -> Result<usize> {
        let max_tokens = self.settings.chunk_max_tokens;
        let mut documents = Vec::new();
        for (kind, records) in [
            (DocKind::Recipe, recipes),
            (DocKind::Rule, rules),
            (DocKind::Transcript, transcripts),
        ] {
            for record in records {
                documents.extend(build_documents(kind, record, max_tokens));
            }
        }

        let entries = self.embed_documents(documents)?;
        let stored = entries.len();

        self.store.clear();
        for entry in entries {
            self.store.upsert(entry);
        }
        self.graph = RelatednessGraph::build(recipes, rules);
        self.generation += 1;

        let count = recipes.len() + rules.len() + transcripts.len();
        tracing::debug!(
            generation = self.generation,
            records = count,
            documents = stored,
            "rebuilt semantic index"
        );
        Ok(count)
    }

    /// Semantic search, optionally restricted to one kind.
    ///
    /// Scores are cosine similarity floored at 0 and rounded to three
    /// decimals, descending; equal similarities keep insertion order.
    /// `top_k == 0`, an empty index, or a filter matching no kind all give
    /// an empty list.
    ///
    /// # Errors
    ///
    /// [`IndexError::InvalidQuery`] for an empty query; embedding failures
    /// are passed through.
    pub fn search(&self, query: &str, top_k: usize, type_filter: Option<&str>) -> Result<Vec<SearchHit>> {
        validate_query(query)?;
        if top_k == 0 || self.store.is_empty() {
            return Ok(Vec::new());
        }

        let kind = match type_filter {
            None => None,
            Some(label) => match DocKind::parse(label) {
                Some(kind) => Some(kind),
                None => {
                    tracing::warn!(filter = label, "unknown type filter, no results");
                    return Ok(Vec::new());
                }
            },
        };

        let query_vec = embed_query(self.provider.as_ref(), query)?;
        self.check_dims(&query_vec)?;

        Ok(self
            .store
            .nearest(&query_vec, top_k, kind)
            .into_iter()
            .map(|m| {
                let distance = 1.0 - f64::from(m.similarity);
                let doc = &m.entry.document;
                SearchHit {
                    id: doc.id.clone(),
                    score: round_score((1.0 - distance).clamp(0.0, 1.0)),
                    kind: doc.kind,
                    name: doc.name.clone(),
                    title: doc.title.clone(),
                    attributes: doc.attributes.clone(),
                    explain: None,
                }
            })
            .collect())
    }

    /// Blend semantic hits with externally supplied keyword hits.
    ///
    /// See [`hybrid`](crate::hybrid) for the scoring rules.
    ///
    /// # Errors
    ///
    /// [`IndexError::InvalidParameter`] if `semantic_weight` is outside
    /// `[0, 1]`; otherwise as [`search`](Self::search).
    pub fn hybrid_search(
        &self,
        query: &str,
        keyword_hits: &[KeywordHit],
        top_k: usize,
        semantic_weight: f64,
    ) -> Result<Vec<SearchHit>> {
        if !(0.0..=1.0).contains(&semantic_weight) {
            return Err(IndexError::InvalidParameter(format!(
                "semantic_weight must be in [0.0, 1.0], got {}",
                semantic_weight
            )));
        }
        let semantic = self.search(query, top_k, None)?;
        Ok(hybrid::merge(semantic, keyword_hits, top_k, semantic_weight))
    }

    /// Related document ids (`kind:name`) from the current generation.
    pub fn get_related(&self, kind: &str, name: &str, top_k: usize) -> Vec<String> {
        self.graph.get_related(kind, name, top_k)
    }

    /// Pair documents with vectors, reusing embeddings of unchanged texts.
    fn embed_documents(&self, documents: Vec<Document>) -> Result<Vec<VectorEntry>> {
        let mut known: HashMap<String, Vec<f32>> = self
            .store
            .entries()
            .map(|e| (e.content_hash.clone(), e.vector.clone()))
            .collect();

        let hashes: Vec<String> = documents.iter().map(|d| content_hash(&d.text)).collect();

        let mut pending: Vec<(String, String)> = Vec::new();
        for (doc, hash) in documents.iter().zip(&hashes) {
            if !known.contains_key(hash) && !pending.iter().any(|(h, _)| h == hash) {
                pending.push((hash.clone(), doc.text.clone()));
            }
        }
        let reused = documents.len() - pending.len();

        for batch in pending.chunks(self.settings.batch_size.max(1)) {
            let texts: Vec<String> = batch.iter().map(|(_, text)| text.clone()).collect();
            let vectors = self.embed_batch(&texts)?;
            for ((hash, _), vector) in batch.iter().zip(vectors) {
                known.insert(hash.clone(), vector);
            }
        }

        tracing::debug!(
            embedded = pending.len(),
            reused,
            model = self.provider.model_name(),
            "embedded documents"
        );

        documents
            .into_iter()
            .zip(hashes)
            .map(|(document, content_hash)| -> Result<VectorEntry> {
                let vector = known.get(&content_hash).cloned().ok_or_else(|| {
                    IndexError::Embedding(format!("missing embedding for {}", document.id))
                })?;
                Ok(VectorEntry {
                    document,
                    vector,
                    content_hash,
                })
            })
            .collect()
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let vectors = self.provider.embed(texts)?;
        if vectors.len() != texts.len() {
            return Err(IndexError::Embedding(format!(
                "expected {} vectors, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        for v in &vectors {
            self.check_dims(v)?;
        }
        Ok(vectors)
    }

    fn check_dims(&self, vector: &[f32]) -> Result<()> {
        let expected = self.provider.dims();
        if vector.len() != expected {
            return Err(IndexError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }
        Ok(())
    }
}

fn validate_query(query: &str) -> Result<()> {
    if query.trim().is_empty() {
        return Err(IndexError::InvalidQuery("query must not be empty".to_string()));
    }
    Ok(())
}

/// SHA-256 of a document text, hex encoded.
fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
