//! Embedding provider trait and vector utilities.
//!
//! Defines the [`EmbeddingProvider`] trait that all embedding backends
//! implement, the [`cosine_similarity`] helper used by the vector store,
//! and [`HashingProvider`], a dependency-free feature-hashing backend.
//!
//! Model-backed providers (fastembed) live in the `chenkit` app crate.

use std::hash::Hasher;

use twox_hash::XxHash64;

use crate::error::{IndexError, Result};

/// Trait for embedding providers.
///
/// A provider reporting `dims() == 0` has no usable backend; the semantic
/// index refuses to be constructed on top of it.
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"paraphrase-multilingual-minilm-l12-v2"`).
    fn model_name(&self) -> &str;
    /// Returns the embedding vector dimensionality (e.g. `384`).
    fn dims(&self) -> usize;
    /// Embed a batch of texts, returning one vector per input in order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Embed a single query text.
pub fn embed_query(provider: &dyn EmbeddingProvider, text: &str) -> Result<Vec<f32>> {
    provider
        .embed(&[text.to_string()])?
        .into_iter()
        .next()
        .ok_or_else(|| IndexError::Embedding("Empty embedding response".to_string()))
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`:
/// - `1.0` = identical direction
/// - `0.0` = orthogonal (unrelated)
/// - `-1.0` = opposite direction
///
/// Returns `0.0` for empty vectors, zero vectors, or vectors of different lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}

/// Feature-hashing bag-of-words embedder.
///
/// Each lowercased word is hashed with XxHash64 into one of `dims` buckets.
/// Vectors are L2-normalized, so texts sharing vocabulary score high under
/// cosine similarity. No model download, fully deterministic: suitable for
/// offline use and tests, not for paraphrase-level matching.
#[derive(Debug, Clone)]
pub struct HashingProvider {
    dims: usize,
}

impl HashingProvider {
    pub const DEFAULT_DIMS: usize = 384;

    pub fn new(dims: usize) -> Self {
        Self { dims }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dims];
        if self.dims == 0 {
            return v;
        }

        let lower = text.to_lowercase();
        for token in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let mut hasher = XxHash64::with_seed(0);
            hasher.write(token.as_bytes());
            let idx = (hasher.finish() % self.dims as u64) as usize;
            v[idx] += 1.0;
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

impl Default for HashingProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMS)
    }
}

impl EmbeddingProvider for HashingProvider {
    fn model_name(&self) -> &str {
        "hashing"
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_hashing_is_deterministic_and_normalized() {
        let p = HashingProvider::new(64);
        let a = p.embed(&["Ginger tea with honey".to_string()]).unwrap();
        let b = p.embed(&["ginger TEA with honey".to_string()]).unwrap();
        assert_eq!(a, b);
        let norm: f32 = a[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hashing_shared_words_score_higher() {
        let p = HashingProvider::default();
        let q = embed_query(&p, "warming ginger").unwrap();
        let related = embed_query(&p, "ginger is warming for digestion").unwrap();
        let unrelated = embed_query(&p, "cold cucumber salad").unwrap();
        assert!(cosine_similarity(&q, &related) > cosine_similarity(&q, &unrelated));
    }

    #[test]
    fn test_hashing_empty_text_is_zero_vector() {
        let p = HashingProvider::new(16);
        let v = embed_query(&p, "").unwrap();
        assert_eq!(v.len(), 16);
        assert!(v.iter().all(|x| *x == 0.0));
    }
}
