//! `kit status` and `kit index`: what the library holds and whether the
//! semantic backend is usable.

use anyhow::Result;

use crate::config::Config;
use crate::embedding::is_available;
use crate::engine::Engine;
use crate::library::Library;

/// Print library counts and the embedding backend state without embedding
/// anything.
pub fn run_status(config: &Config) -> Result<()> {
    let library = Library::load(&config.library)?;
    let semantic = is_available(&config.embedding);

    println!("Chenkit — Library Status");
    println!("========================");
    println!();
    println!("  Library:      {}", config.library.root.display());
    println!("  Recipes:      {}", library.recipes.len());
    println!("  Rules:        {}", library.rules.len());
    println!("  Transcripts:  {}", library.transcripts.len());
    println!("  Inventory:    {}", library.inventory.len());
    println!();
    println!("  Embedding:    {}", config.embedding.provider);
    let state = if semantic {
        "available"
    } else if config.embedding.is_enabled() {
        "unavailable in this build (keyword fallback)"
    } else {
        "unavailable (keyword fallback)"
    };
    println!("  Semantic:     {}", state);
    Ok(())
}

/// Build one index generation and report its size.
pub fn run_index(config: Config) -> Result<()> {
    let engine = Engine::open(config)?;
    let Some(index) = engine.index() else {
        anyhow::bail!(
            "Embedding provider '{}' is not available. Set [embedding] provider in config.",
            engine.config.embedding.provider
        );
    };

    let records = engine.library.recipes.len()
        + engine.library.rules.len()
        + engine.library.transcripts.len();
    println!("indexed records: {}", records);
    println!("documents: {}", index.len());
    println!("model: {}", index.model_name());
    println!("ok");
    Ok(())
}
