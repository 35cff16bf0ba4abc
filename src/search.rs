//! `kit search` and `kit hybrid`.
//!
//! Both commands use the semantic index when one could be built and fall
//! back to ranked keyword matches otherwise, so a library without an
//! embedding backend is still searchable.

use anyhow::Result;
use serde_json::Value;

use chenkit_core::hybrid::merge;
use chenkit_core::{DocKind, IndexError, SearchHit};

use crate::config::Config;
use crate::engine::Engine;

/// Semantic search, optionally restricted to one kind.
pub fn search(engine: &Engine, query: &str, kind: Option<&str>, limit: usize) -> Result<Vec<SearchHit>> {
    if let Some(index) = engine.index() {
        return Ok(index.search(query, limit, kind)?);
    }

    let wanted = match kind {
        None => None,
        Some(label) => match DocKind::parse(label) {
            Some(k) => Some(k),
            None => {
                tracing::warn!(filter = label, "unknown type filter, no results");
                return Ok(Vec::new());
            }
        },
    };
    let keyword: Vec<_> = engine
        .keyword_hits(query)
        .into_iter()
        .filter(|h| wanted.map_or(true, |k| h.kind == k))
        .collect();
    Ok(merge(Vec::new(), &keyword, limit, 0.0))
}

/// Semantic and keyword results blended with `semantic_weight`.
pub fn hybrid(engine: &Engine, query: &str, limit: usize, semantic_weight: f64) -> Result<Vec<SearchHit>> {
    let keyword = engine.keyword_hits(query);
    match engine.index() {
        Some(index) => Ok(index.hybrid_search(query, &keyword, limit, semantic_weight)?),
        None => {
            if !(0.0..=1.0).contains(&semantic_weight) {
                return Err(IndexError::InvalidParameter(format!(
                    "semantic_weight must be in [0.0, 1.0], got {}",
                    semantic_weight
                ))
                .into());
            }
            Ok(merge(Vec::new(), &keyword, limit, semantic_weight))
        }
    }
}

pub fn run_search(
    config: Config,
    query: &str,
    kind: Option<&str>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    if query.trim().is_empty() {
        println!("No results.");
        return Ok(());
    }
    let limit = limit.unwrap_or(config.retrieval.top_k);
    let engine = Engine::open(config)?;
    let hits = search(&engine, query, kind, limit)?;
    print_hits(&hits, json)
}

pub fn run_hybrid(
    config: Config,
    query: &str,
    limit: Option<usize>,
    weight: Option<f64>,
    json: bool,
) -> Result<()> {
    if query.trim().is_empty() {
        println!("No results.");
        return Ok(());
    }
    let limit = limit.unwrap_or(config.retrieval.top_k);
    let weight = weight.unwrap_or(config.retrieval.semantic_weight);
    let engine = Engine::open(config)?;
    let hits = hybrid(&engine, query, limit, weight)?;
    print_hits(&hits, json)
}

fn print_hits(hits: &[SearchHit], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, hit) in hits.iter().enumerate() {
        println!("{}. [{:.3}] {} / {}", i + 1, hit.score, hit.kind, hit.title);
        for key in ["path", "tags", "category", "section"] {
            if let Some(value) = hit.attributes.get(key) {
                println!("    {}: {}", key, display_value(value));
            }
        }
        if let Some(explain) = hit.explain {
            println!(
                "    semantic: {:.3}  keyword: {:.3}",
                explain.semantic, explain.keyword
            );
        }
        println!("    id: {}", hit.id);
        println!();
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
