//! Embedding backends selected from configuration.
//!
//! - **[`DisabledProvider`]**: zero dimensions; index construction fails
//!   with `DependencyUnavailable` and the CLI falls back to keyword search.
//! - **`hashing`**: the core crate's feature-hashing provider. Fully offline
//!   and deterministic, good for tests and small libraries.
//! - **`LocalProvider`**: multilingual sentence embeddings via fastembed.
//!   Only compiled with `--features local-embeddings`. Models are downloaded
//!   on first use and cached.
//!
//! ```rust
//! # use chenkit::config::EmbeddingConfig;
//! # use chenkit::embedding::{create_provider, is_available};
//! let config = EmbeddingConfig::default(); // provider = "disabled"
//! assert!(!is_available(&config));
//! let provider = create_provider(&config).unwrap();
//! assert_eq!(provider.dims(), 0);
//! ```

use chenkit_core::embedding::{EmbeddingProvider, HashingProvider};
use chenkit_core::{IndexError, Result};

use crate::config::EmbeddingConfig;

/// Default model for the `local` provider: small, multilingual.
pub const DEFAULT_LOCAL_MODEL: &str = "paraphrase-multilingual-minilm-l12-v2";

/// Whether the configured provider can produce embeddings in this build.
pub fn is_available(config: &EmbeddingConfig) -> bool {
    match config.provider.as_str() {
        "hashing" => true,
        "local" => cfg!(feature = "local-embeddings"),
        _ => false,
    }
}

/// Create the provider named in the configuration.
///
/// | Config value | Provider |
/// |--------------|----------|
/// | `"disabled"` | [`DisabledProvider`] |
/// | `"hashing"` | [`HashingProvider`] |
/// | `"local"` | `LocalProvider` (requires `local-embeddings`) |
pub fn create_provider(config: &EmbeddingConfig) -> Result<Box<dyn EmbeddingProvider>> {
    match config.provider.as_str() {
        "disabled" => Ok(Box::new(DisabledProvider)),
        "hashing" => Ok(Box::new(HashingProvider::new(
            config.dims.unwrap_or(HashingProvider::DEFAULT_DIMS),
        ))),
        #[cfg(feature = "local-embeddings")]
        "local" => Ok(Box::new(LocalProvider::new(config)?)),
        #[cfg(not(feature = "local-embeddings"))]
        "local" => Err(IndexError::DependencyUnavailable(
            "local embedding provider requires --features local-embeddings".to_string(),
        )),
        other => Err(IndexError::DependencyUnavailable(format!(
            "unknown embedding provider: {}",
            other
        ))),
    }
}

// ============ Disabled Provider ============

/// Placeholder used when `embedding.provider = "disabled"`.
pub struct DisabledProvider;

impl EmbeddingProvider for DisabledProvider {
    fn model_name(&self) -> &str {
        "disabled"
    }
    fn dims(&self) -> usize {
        0
    }
    fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(IndexError::DependencyUnavailable(
            "embedding provider is disabled".to_string(),
        ))
    }
}

// ============ Local Provider (fastembed) ============

/// Local ONNX inference through fastembed.
///
/// The model is loaded once at construction and guarded by a mutex, since
/// fastembed needs `&mut` access to run a batch.
#[cfg(feature = "local-embeddings")]
pub struct LocalProvider {
    model_name: String,
    dims: usize,
    batch_size: usize,
    model: std::sync::Mutex<fastembed::TextEmbedding>,
}

#[cfg(feature = "local-embeddings")]
impl LocalProvider {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let (model_name, dims) = resolve_local_model(config);
        let fastembed_model = config_to_fastembed_model(&model_name)?;

        tracing::info!(model = %model_name, "loading local embedding model");
        let model = fastembed::TextEmbedding::try_new(
            fastembed::InitOptions::new(fastembed_model).with_show_download_progress(false),
        )
        .map_err(|e| {
            IndexError::DependencyUnavailable(format!(
                "failed to initialize local embedding model: {}",
                e
            ))
        })?;

        Ok(Self {
            model_name,
            dims,
            batch_size: config.batch_size,
            model: std::sync::Mutex::new(model),
        })
    }
}

#[cfg(feature = "local-embeddings")]
impl EmbeddingProvider for LocalProvider {
    fn model_name(&self) -> &str {
        &self.model_name
    }
    fn dims(&self) -> usize {
        self.dims
    }
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| IndexError::Embedding("local model lock poisoned".to_string()))?;
        model
            .embed(texts.to_vec(), Some(self.batch_size))
            .map_err(|e| IndexError::Embedding(format!("local embedding failed: {}", e)))
    }
}

#[cfg(feature = "local-embeddings")]
fn resolve_local_model(config: &EmbeddingConfig) -> (String, usize) {
    let model_name = config
        .model
        .clone()
        .unwrap_or_else(|| DEFAULT_LOCAL_MODEL.to_string());

    let dims = config.dims.unwrap_or(match model_name.as_str() {
        "paraphrase-multilingual-minilm-l12-v2" => 384,
        "paraphrase-multilingual-mpnet-base-v2" => 768,
        "multilingual-e5-small" => 384,
        "multilingual-e5-base" => 768,
        "all-minilm-l6-v2" => 384,
        _ => 384,
    });

    (model_name, dims)
}

#[cfg(feature = "local-embeddings")]
fn config_to_fastembed_model(name: &str) -> Result<fastembed::EmbeddingModel> {
    match name {
        "paraphrase-multilingual-minilm-l12-v2" => {
            Ok(fastembed::EmbeddingModel::ParaphraseMLMiniLML12V2)
        }
        "paraphrase-multilingual-mpnet-base-v2" => {
            Ok(fastembed::EmbeddingModel::ParaphraseMLMpnetBaseV2)
        }
        "multilingual-e5-small" => Ok(fastembed::EmbeddingModel::MultilingualE5Small),
        "multilingual-e5-base" => Ok(fastembed::EmbeddingModel::MultilingualE5Base),
        "all-minilm-l6-v2" => Ok(fastembed::EmbeddingModel::AllMiniLML6V2),
        other => Err(IndexError::DependencyUnavailable(format!(
            "Unknown local embedding model: '{}'. Supported models: \
             paraphrase-multilingual-minilm-l12-v2, paraphrase-multilingual-mpnet-base-v2, \
             multilingual-e5-small, multilingual-e5-base, all-minilm-l6-v2",
            other
        ))),
    }
}
