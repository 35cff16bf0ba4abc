//! Paragraph-boundary text chunker.
//!
//! Splits long free text (transcripts) into segments small enough to embed.
//! Splitting occurs on paragraph boundaries (runs of two or more newlines)
//! so that each chunk stays semantically coherent.
//!
//! # Algorithm
//!
//! 1. Split text on blank-line paragraph boundaries.
//! 2. Count words per paragraph by whitespace splitting (a size heuristic,
//!    not a token count).
//! 3. Accumulate paragraphs until adding the next one would push the running
//!    word count over `max_tokens`.
//! 4. When exceeded, close the accumulation as one chunk and start a new one
//!    with that paragraph. A single oversized paragraph becomes its own chunk.
//! 5. Guarantee at least one chunk (even for empty text).
//!
//! # Example
//!
//! ```rust
//! use chenkit_core::chunk::chunk_text;
//!
//! let chunks = chunk_text("Hello world.\n\nSecond paragraph.", 400);
//! assert_eq!(chunks, vec!["Hello world.\n\nSecond paragraph.".to_string()]);
//! ```

/// Default chunk budget, in whitespace-separated words.
pub const DEFAULT_MAX_TOKENS: usize = 400;

/// Characters kept by the fallback when no chunk could be produced.
const FALLBACK_CHARS: usize = 2000;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split text into chunks on paragraph boundaries, respecting `max_tokens`.
///
/// # Guarantees
///
/// - At least one chunk is always returned; `chunk_text("", n)` is `[""]`.
/// - Every paragraph of the input lands in exactly one chunk, in order.
/// - Paragraphs inside a chunk are re-joined with a single blank line.
/// - The same input always yields the same chunks.
pub fn chunk_text(text: &str, max_tokens: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for para in split_paragraphs(text) {
        let para_len = para.split_whitespace().count();
        if current_len + para_len > max_tokens && !current.is_empty() {
            chunks.push(current.join(PARAGRAPH_SEPARATOR));
            current.clear();
            current_len = 0;
        }
        current.push(para);
        current_len += para_len;
    }

    if !current.is_empty() {
        chunks.push(current.join(PARAGRAPH_SEPARATOR));
    }

    if chunks.is_empty() {
        chunks.push(text.chars().take(FALLBACK_CHARS).collect());
    }

    chunks
}

/// Split on runs of two or more newlines.
///
/// Leading or trailing separators produce empty paragraphs, which carry no
/// words and are simply absorbed by the neighbouring chunk.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\n' && bytes.get(i + 1) == Some(&b'\n') {
            let mut end = i;
            while end < bytes.len() && bytes[end] == b'\n' {
                end += 1;
            }
            parts.push(&text[start..i]);
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }

    parts.push(&text[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = chunk_text("Hello, world!", 400);
        assert_eq!(chunks, vec!["Hello, world!".to_string()]);
    }

    #[test]
    fn test_empty_text() {
        let chunks = chunk_text("", 400);
        assert_eq!(chunks, vec![String::new()]);
    }

    #[test]
    fn test_zero_budget_still_produces_chunks() {
        let chunks = chunk_text("one two\n\nthree", 0);
        assert_eq!(chunks, vec!["one two".to_string(), "three".to_string()]);
    }

    #[test]
    fn test_multiple_paragraphs_under_limit() {
        let text = "First paragraph.\n\nSecond paragraph.\n\nThird paragraph.";
        let chunks = chunk_text(text, 400);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].contains("First paragraph."));
        assert!(chunks[0].contains("Third paragraph."));
    }

    #[test]
    fn test_greedy_split_on_word_budget() {
        // 4 + 4 words fit in 8; the third paragraph starts a new chunk.
        let text = "one two three four\n\nfive six seven eight\n\nnine ten";
        let chunks = chunk_text(text, 8);
        assert_eq!(
            chunks,
            vec![
                "one two three four\n\nfive six seven eight".to_string(),
                "nine ten".to_string()
            ]
        );
    }

    #[test]
    fn test_oversized_paragraph_kept_whole() {
        let long = (0..50).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let text = format!("intro\n\n{}\n\noutro", long);
        let chunks = chunk_text(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], long);
    }

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(split_paragraphs("a\n\n\n\nb"), vec!["a", "b"]);
        assert_eq!(split_paragraphs("a\nb"), vec!["a\nb"]);
        assert_eq!(split_paragraphs("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn test_every_paragraph_covered_exactly_once() {
        let paragraphs: Vec<String> = (0..40)
            .map(|i| format!("Paragraph {} has a handful of words in it.", i))
            .collect();
        let text = paragraphs.join("\n\n");
        let chunks = chunk_text(&text, 25);
        assert!(chunks.len() > 1);

        let rebuilt: Vec<&str> = chunks.iter().flat_map(|c| split_paragraphs(c)).collect();
        assert_eq!(rebuilt, paragraphs.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Imbir rozgrzewa żołądek.\n\nŚwieża kurkuma i miód.";
        let chunks = chunk_text(text, 3);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], "Świeża kurkuma i miód.");
    }

    #[test]
    fn test_deterministic() {
        let text = "Alpha beta\n\nGamma delta\n\nEpsilon\n\nZeta eta theta";
        assert_eq!(chunk_text(text, 3), chunk_text(text, 3));
    }
}
