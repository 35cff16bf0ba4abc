//! # Chenkit Core
//!
//! Shared logic for Chenkit: the document model, paragraph chunking, the
//! vector store abstraction, the semantic index, hybrid ranking, and the
//! term-overlap relatedness graph. Keyword matching and ingredient
//! availability scoring live here too, since the host feeds their output
//! straight into the index.
//!
//! This crate performs no filesystem or network I/O. Source records are
//! supplied by the host (see the `chenkit` crate's markdown loader) and
//! embeddings come from whatever [`embedding::EmbeddingProvider`] the host
//! constructs.

pub mod chunk;
pub mod documents;
pub mod embedding;
pub mod error;
pub mod hybrid;
pub mod index;
pub mod keyword;
pub mod models;
pub mod pantry;
pub mod related;
pub mod store;

pub use error::{IndexError, Result};
pub use index::{IndexSettings, SemanticIndex};
pub use models::{DocKind, Document, KeywordHit, SearchHit, Section, SourceRecord};
