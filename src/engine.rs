//! Library snapshot plus the semantic index built over it.
//!
//! Every `kit` command opens an [`Engine`]: load config, read the markdown
//! library, and, when an embedding backend is available, build one index
//! generation. Without a backend the engine still opens and search commands
//! degrade to keyword matching.

use anyhow::{Context, Result};

use chenkit_core::keyword::keyword_search;
use chenkit_core::store::memory::InMemoryVectorStore;
use chenkit_core::{IndexSettings, KeywordHit, SemanticIndex};

use crate::config::Config;
use crate::embedding::{create_provider, is_available};
use crate::library::Library;

pub struct Engine {
    pub config: Config,
    pub library: Library,
    index: Option<SemanticIndex>,
}

impl Engine {
    /// Load the library and build the index.
    pub fn open(config: Config) -> Result<Self> {
        let library = Library::load(&config.library)?;
        let index = build_index(&config, &library)?;
        Ok(Self {
            config,
            library,
            index,
        })
    }

    /// Load the library only; semantic search is unavailable.
    pub fn open_without_index(config: Config) -> Result<Self> {
        let library = Library::load(&config.library)?;
        Ok(Self {
            config,
            library,
            index: None,
        })
    }

    /// The semantic index, if an embedding backend is configured.
    pub fn index(&self) -> Option<&SemanticIndex> {
        self.index.as_ref()
    }

    /// Substring matches across recipes, rules and transcripts.
    pub fn keyword_hits(&self, query: &str) -> Vec<KeywordHit> {
        keyword_search(
            query,
            &self.library.recipes,
            &self.library.rules,
            &self.library.transcripts,
        )
    }
}

/// Build one index generation, or `None` when no backend is available.
pub fn build_index(config: &Config, library: &Library) -> Result<Option<SemanticIndex>> {
    if !is_available(&config.embedding) {
        tracing::warn!(
            provider = %config.embedding.provider,
            "semantic search unavailable, using keyword matching"
        );
        return Ok(None);
    }

    let provider = create_provider(&config.embedding)?;
    let settings = IndexSettings {
        chunk_max_tokens: config.chunking.max_tokens,
        batch_size: config.embedding.batch_size,
    };
    let mut index = SemanticIndex::with_store(provider, InMemoryVectorStore::new(), settings)?;
    let count = index
        .index_all(&library.recipes, &library.rules, &library.transcripts)
        .context("Failed to build semantic index")?;

    tracing::info!(
        records = count,
        documents = index.len(),
        model = index.model_name(),
        "semantic index ready"
    );
    Ok(Some(index))
}
