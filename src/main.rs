//! # Chenkit CLI (`kit`)
//!
//! Search a markdown recipe and knowledge library by meaning, find related
//! notes, and see what can be cooked from the inventory.
//!
//! ## Usage
//!
//! ```bash
//! kit --config ./config/kit.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `kit status` | Library counts and embedding backend state |
//! | `kit index` | Build the semantic index and report its size |
//! | `kit search "<query>"` | Semantic search (keyword fallback) |
//! | `kit hybrid "<query>"` | Semantic and keyword results blended |
//! | `kit related <kind> <name>` | Documents sharing key terms |
//! | `kit suggest` | Recipes ranked by ingredients on hand |
//!
//! ## Examples
//!
//! ```bash
//! kit search "something warming for digestion" --kind rule
//! kit hybrid "imbir" --weight 0.5 --json
//! kit related recipe ginger-tea
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chenkit::config;
use chenkit::{related, search, status, suggest};

/// Chenkit CLI: semantic search and relatedness for a markdown recipe and
/// knowledge library.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file means defaults with the library rooted at `.`.
#[derive(Parser)]
#[command(
    name = "kit",
    about = "Chenkit: semantic search and relatedness for a markdown recipe and knowledge library",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/kit.toml")]
    config: PathBuf,

    /// Log progress at info level. `RUST_LOG` overrides.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show library counts and whether semantic search is available.
    Status,

    /// Build the semantic index over the whole library.
    ///
    /// Fails when no embedding backend is configured.
    Index,

    /// Search by meaning.
    ///
    /// Falls back to keyword matching when no embedding backend exists.
    Search {
        /// Natural language query.
        query: String,

        /// Restrict to one kind: recipe, rule, or transcript.
        #[arg(long)]
        kind: Option<String>,

        /// Maximum number of results (default: retrieval.top_k).
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Blend semantic scores with keyword matches.
    Hybrid {
        /// Query, used both semantically and as a substring.
        query: String,

        /// Maximum number of results (default: retrieval.top_k).
        #[arg(long)]
        limit: Option<usize>,

        /// Semantic weight in [0, 1] (default: retrieval.semantic_weight).
        #[arg(long)]
        weight: Option<f64>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List recipes and rules sharing key terms with a document.
    Related {
        /// Document kind: recipe or rule.
        kind: String,

        /// Document name (file stem).
        name: String,

        /// Maximum number of neighbours (default: retrieval.related_k).
        #[arg(long)]
        limit: Option<usize>,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Rank recipes by the share of ingredients in the inventory.
    Suggest {
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Status => status::run_status(&cfg)?,
        Commands::Index => status::run_index(cfg)?,
        Commands::Search {
            query,
            kind,
            limit,
            json,
        } => search::run_search(cfg, &query, kind.as_deref(), limit, json)?,
        Commands::Hybrid {
            query,
            limit,
            weight,
            json,
        } => search::run_hybrid(cfg, &query, limit, weight, json)?,
        Commands::Related {
            kind,
            name,
            limit,
            json,
        } => related::run_related(cfg, &kind, &name, limit, json)?,
        Commands::Suggest { limit, json } => suggest::run_suggest(&cfg, limit, json)?,
    }

    Ok(())
}
