//! `kit related`: documents sharing key terms with a recipe or rule.

use anyhow::Result;

use chenkit_core::related::RelatednessGraph;
use chenkit_core::{DocKind, SourceRecord};

use crate::config::Config;
use crate::engine::Engine;

/// A neighbour with its display title resolved from the library.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RelatedDoc {
    pub id: String,
    pub title: String,
}

/// Related documents for `kind`/`name`. The graph does not need
/// embeddings, so it is built directly when no index exists.
pub fn related(engine: &Engine, kind: &str, name: &str, limit: usize) -> Vec<RelatedDoc> {
    let Some(kind) = DocKind::parse(kind) else {
        tracing::warn!(kind, "unknown document kind");
        return Vec::new();
    };

    let ids = match engine.index() {
        Some(index) => index.get_related(kind.as_str(), name, limit),
        None => RelatednessGraph::build(&engine.library.recipes, &engine.library.rules)
            .get_related(kind.as_str(), name, limit),
    };

    ids.into_iter()
        .map(|id| {
            let title = lookup_title(engine, &id).unwrap_or_else(|| id.clone());
            RelatedDoc { id, title }
        })
        .collect()
}

fn lookup_title(engine: &Engine, id: &str) -> Option<String> {
    let (kind, name) = id.split_once(':')?;
    let records: &[SourceRecord] = match DocKind::parse(kind)? {
        DocKind::Recipe => &engine.library.recipes,
        DocKind::Rule => &engine.library.rules,
        DocKind::Transcript => &engine.library.transcripts,
    };
    records
        .iter()
        .find(|r| r.name == name)
        .map(|r| r.display_title().to_string())
}

pub fn run_related(config: Config, kind: &str, name: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let limit = limit.unwrap_or(config.retrieval.related_k);
    let engine = Engine::open_without_index(config)?;
    let docs = related(&engine, kind, name, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }
    if docs.is_empty() {
        println!("No related documents.");
        return Ok(());
    }
    for doc in &docs {
        println!("{:<32} {}", doc.id, doc.title);
    }
    Ok(())
}
