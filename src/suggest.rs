//! `kit suggest`: recipes ranked by how much of their ingredient list is in
//! the inventory.

use anyhow::Result;

use chenkit_core::pantry::{inventory_items, rank_recipes, RecipeAvailability};

use crate::config::Config;
use crate::library::Library;

/// Rank the library's recipes against its inventory.
pub fn suggest(library: &Library, limit: usize) -> Vec<RecipeAvailability> {
    let inventory = inventory_items(&library.inventory);
    tracing::debug!(inventory = inventory.len(), "scoring recipes");
    rank_recipes(&library.recipes, &inventory, limit)
}

pub fn run_suggest(config: &Config, limit: usize, json: bool) -> Result<()> {
    let library = Library::load(&config.library)?;
    let ranked = suggest(&library, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }
    if ranked.is_empty() {
        println!("No recipes with ingredient lists.");
        return Ok(());
    }

    println!("{:>4}  {:>7}  RECIPE", "HAVE", "ITEMS");
    for r in &ranked {
        println!(
            "{:>3}%  {:>3}/{:<3}  {}",
            r.percent, r.available, r.total, r.title
        );
        if !r.missing.is_empty() {
            println!("{:>16}missing: {}", "", r.missing.join(", "));
        }
    }
    Ok(())
}
