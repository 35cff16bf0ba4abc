//! Markdown library loader.
//!
//! Each library folder (recipes, rules, transcripts, inventory) holds flat
//! `*.md` files. Files are read in name order; names starting with `_` are
//! drafts and skipped. A missing folder is an empty collection.
//!
//! Parsing is line-based:
//!
//! | Line | Becomes |
//! |------|---------|
//! | first `# Heading` | `title` |
//! | `key: value` | `meta[key]` (key lowercased, last one wins) |
//! | `- [ ] item` / `- [x] item` | `items` |
//! | `## Section` | a new section collecting the following non-blank lines |

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

use chenkit_core::models::Section;
use chenkit_core::SourceRecord;

use crate::config::LibraryConfig;

/// All source records of one library snapshot.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub recipes: Vec<SourceRecord>,
    pub rules: Vec<SourceRecord>,
    pub transcripts: Vec<SourceRecord>,
    pub inventory: Vec<SourceRecord>,
}

impl Library {
    /// Load every folder named in the library config.
    pub fn load(config: &LibraryConfig) -> Result<Self> {
        let library = Self {
            recipes: load_folder(&config.recipes_dir())?,
            rules: load_folder(&config.rules_dir())?,
            transcripts: load_folder(&config.transcripts_dir())?,
            inventory: load_folder(&config.inventory_dir())?,
        };
        tracing::info!(
            root = %config.root.display(),
            recipes = library.recipes.len(),
            rules = library.rules.len(),
            transcripts = library.transcripts.len(),
            inventory = library.inventory.len(),
            "loaded library"
        );
        Ok(library)
    }
}

/// Parse all `*.md` files directly inside `dir`.
pub fn load_folder(dir: &Path) -> Result<Vec<SourceRecord>> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "library folder missing, skipping");
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        if file_name.starts_with('_') || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut record = parse_markdown(&name, &content);
        record.path = Some(path.display().to_string());
        records.push(record);
    }
    Ok(records)
}

/// Parse one markdown document into a [`SourceRecord`].
pub fn parse_markdown(name: &str, content: &str) -> SourceRecord {
    let mut title = None;
    let mut meta = BTreeMap::new();
    let mut items = Vec::new();
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<usize> = None;

    for line in content.lines() {
        if title.is_none() {
            title = parse_title(line);
        }
        if let Some((key, value)) = parse_meta(line) {
            meta.insert(key, value);
        }
        if let Some(item) = parse_item(line) {
            items.push(item);
        }

        if let Some(label) = line.strip_prefix("## ") {
            let label = label.trim();
            // A repeated heading restarts its section.
            let idx = match sections.iter().position(|s| s.label == label) {
                Some(idx) => {
                    sections[idx].lines.clear();
                    idx
                }
                None => {
                    sections.push(Section {
                        label: label.to_string(),
                        lines: Vec::new(),
                    });
                    sections.len() - 1
                }
            };
            current = Some(idx);
        } else if let Some(idx) = current {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                sections[idx].lines.push(trimmed.to_string());
            }
        }
    }

    SourceRecord {
        name: name.to_string(),
        title,
        path: None,
        content: content.to_string(),
        items,
        meta,
        sections,
    }
}

fn parse_title(line: &str) -> Option<String> {
    let rest = line.strip_prefix('#')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let title = rest.trim();
    (!title.is_empty()).then(|| title.to_string())
}

fn parse_meta(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    if key.is_empty() || !key.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }
    let value = value.trim_start();
    if value.is_empty() {
        return None;
    }
    Some((key.to_lowercase(), value.to_string()))
}

fn parse_item(line: &str) -> Option<String> {
    let rest = line.strip_prefix('-')?.trim_start();
    let rest = rest
        .strip_prefix("[ ]")
        .or_else(|| rest.strip_prefix("[x]"))?;
    let item = rest.trim();
    (!item.is_empty()).then(|| item.to_string())
}
