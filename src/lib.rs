//! # Chenkit
//!
//! Semantic search and relatedness for a markdown recipe and knowledge
//! library.
//!
//! Chenkit reads four folders of markdown (recipes, rules, transcripts,
//! inventory), turns them into embeddable documents, and answers natural
//! language queries by meaning, blended with plain keyword matching. It also
//! links recipes and rules that share vocabulary and ranks recipes by how
//! many ingredients are on hand.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────────┐
//! │  Markdown    │──▶│ Document builders│──▶│ Semantic index │
//! │  library     │   │ + chunker        │   │ (in memory)    │
//! └──────┬───────┘   └──────────────────┘   └───────┬────────┘
//!        │                                          │
//!        ▼                                          ▼
//! ┌──────────────┐                          ┌────────────────┐
//! │ Keyword hits │─────────────────────────▶│ Hybrid ranker  │
//! └──────────────┘                          └────────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`library`] | Markdown loader |
//! | [`embedding`] | Embedding backends from config |
//! | [`engine`] | Library snapshot plus index |
//! | [`search`] | Semantic and hybrid search commands |
//! | [`related`] | Relatedness lookups |
//! | [`suggest`] | Ingredient availability ranking |
//! | [`status`] | Library and index status |
//!
//! The algorithms live in the `chenkit-core` crate.

pub mod config;
pub mod embedding;
pub mod engine;
pub mod library;
pub mod related;
pub mod search;
pub mod status;
pub mod suggest;
