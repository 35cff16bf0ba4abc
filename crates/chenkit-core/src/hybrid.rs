//! Hybrid ranking: semantic scores blended with keyword rank positions.
//!
//! # Scoring
//!
//! 1. Each semantic hit contributes `score × w` to its `(kind, name)` key,
//!    where `w` is the semantic weight. When several hits share a key (rule
//!    sections), the first and best one is used. Later hits never overwrite
//!    its score or metadata, so a rule is represented by its best section
//!    rather than its last.
//! 2. The keyword hit at position `p` contributes `(1 - w) × (1 - 0.05 p)`.
//!    Keyword contributions accumulate and are not floored, so very low
//!    ranks (`p ≥ 20`) may subtract.
//! 3. Display metadata comes from the semantic hit when present, otherwise
//!    from the first keyword hit for that key.
//! 4. Sort by combined score (desc), then id (asc); truncate to `top_k`.

use std::collections::HashMap;

use crate::models::{DocKind, KeywordHit, ScoreExplanation, SearchHit};

/// Linear decay applied per keyword rank position.
pub const KEYWORD_RANK_DECAY: f64 = 0.05;

struct Merged {
    hit: SearchHit,
    semantic: f64,
    keyword: f64,
}

/// Merge semantic hits (descending by score) with rank-ordered keyword hits.
///
/// `semantic_weight` is expected in `[0, 1]`; the caller validates it.
pub fn merge(
    semantic: Vec<SearchHit>,
    keyword: &[KeywordHit],
    top_k: usize,
    semantic_weight: f64,
) -> Vec<SearchHit> {
    let keyword_weight = 1.0 - semantic_weight;
    let mut order: Vec<(DocKind, String)> = Vec::new();
    let mut merged: HashMap<(DocKind, String), Merged> = HashMap::new();

    for hit in semantic {
        let key = (hit.kind, hit.name.clone());
        if merged.contains_key(&key) {
            continue;
        }
        let contribution = hit.score * semantic_weight;
        order.push(key.clone());
        merged.insert(
            key,
            Merged {
                hit,
                semantic: contribution,
                keyword: 0.0,
            },
        );
    }

    for (position, kw) in keyword.iter().enumerate() {
        let boost = keyword_weight * (1.0 - position as f64 * KEYWORD_RANK_DECAY);
        let key = (kw.kind, kw.name.clone());
        match merged.get_mut(&key) {
            Some(entry) => entry.keyword += boost,
            None => {
                order.push(key.clone());
                merged.insert(
                    key,
                    Merged {
                        hit: keyword_only_hit(kw),
                        semantic: 0.0,
                        keyword: boost,
                    },
                );
            }
        }
    }

    let mut results: Vec<SearchHit> = order
        .into_iter()
        .filter_map(|key| merged.remove(&key))
        .map(|m| {
            let mut hit = m.hit;
            hit.score = round_score(m.semantic + m.keyword);
            hit.explain = Some(ScoreExplanation {
                semantic: m.semantic,
                keyword: m.keyword,
                semantic_weight,
            });
            hit
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.id.cmp(&b.id))
    });
    results.truncate(top_k);
    results
}

fn keyword_only_hit(kw: &KeywordHit) -> SearchHit {
    SearchHit {
        id: format!("{}:{}", kw.kind.as_str(), kw.name),
        score: 0.0,
        kind: kw.kind,
        name: kw.name.clone(),
        title: kw.title.clone().unwrap_or_else(|| kw.name.clone()),
        attributes: kw.attributes.clone(),
        explain: None,
    }
}

/// Round a score to three decimals for stable display and comparison.
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
