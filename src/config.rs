//! Configuration parsing and validation.
//!
//! Chenkit reads a TOML file (default `./config/kit.toml`). Every section is
//! optional; a missing file means [`Config::minimal`], which indexes the
//! current directory with embeddings disabled.
//!
//! ```toml
//! [library]
//! root = "~/kitchen"
//!
//! [retrieval]
//! semantic_weight = 0.7
//!
//! [embedding]
//! provider = "hashing"
//! dims = 384
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

/// Where the markdown library lives. Folder names are relative to `root`.
#[derive(Debug, Deserialize, Clone)]
pub struct LibraryConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_recipes")]
    pub recipes: String,
    #[serde(default = "default_rules")]
    pub rules: String,
    #[serde(default = "default_transcripts")]
    pub transcripts: String,
    #[serde(default = "default_inventory")]
    pub inventory: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            recipes: default_recipes(),
            rules: default_rules(),
            transcripts: default_transcripts(),
            inventory: default_inventory(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_recipes() -> String {
    "recipes".to_string()
}
fn default_rules() -> String {
    "rules".to_string()
}
fn default_transcripts() -> String {
    "transcripts".to_string()
}
fn default_inventory() -> String {
    "inventory".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_max_tokens() -> usize {
    chenkit_core::chunk::DEFAULT_MAX_TOKENS
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_semantic_weight")]
    pub semantic_weight: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_related_k")]
    pub related_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            semantic_weight: default_semantic_weight(),
            top_k: default_top_k(),
            related_k: default_related_k(),
        }
    }
}

fn default_semantic_weight() -> f64 {
    0.7
}
fn default_top_k() -> usize {
    15
}
fn default_related_k() -> usize {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dims: Option<usize>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            dims: None,
            batch_size: default_batch_size(),
        }
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_batch_size() -> usize {
    64
}

impl EmbeddingConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

impl LibraryConfig {
    pub fn recipes_dir(&self) -> PathBuf {
        self.root.join(&self.recipes)
    }
    pub fn rules_dir(&self) -> PathBuf {
        self.root.join(&self.rules)
    }
    pub fn transcripts_dir(&self) -> PathBuf {
        self.root.join(&self.transcripts)
    }
    pub fn inventory_dir(&self) -> PathBuf {
        self.root.join(&self.inventory)
    }
}

impl Config {
    /// Defaults for every section, library rooted at `.`.
    pub fn minimal() -> Self {
        Self::default()
    }
}

/// Load and validate the config at `path`, falling back to
/// [`Config::minimal`] when the file does not exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "config file not found, using defaults");
        return Ok(Config::minimal());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), provider = %config.embedding.provider, "loaded config");
    Ok(config)
}

/// Parse and validate config text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.chunking.max_tokens == 0 {
        anyhow::bail!("chunking.max_tokens must be > 0");
    }

    if config.retrieval.top_k < 1 {
        anyhow::bail!("retrieval.top_k must be >= 1");
    }

    if !(0.0..=1.0).contains(&config.retrieval.semantic_weight) {
        anyhow::bail!("retrieval.semantic_weight must be in [0.0, 1.0]");
    }

    if config.embedding.dims == Some(0) {
        anyhow::bail!(
            "embedding.dims must be > 0 when provider is '{}'",
            config.embedding.provider
        );
    }

    if config.embedding.batch_size == 0 {
        anyhow::bail!("embedding.batch_size must be > 0");
    }

    match config.embedding.provider.as_str() {
        "disabled" | "hashing" | "local" => {}
        other => anyhow::bail!(
            "Unknown embedding provider: '{}'. Must be disabled, hashing, or local.",
            other
        ),
    }

    Ok(())
}
