//! TOML item-set parser.
//!
//! Loads hand-authored item sets from TOML files and directories, and
//! validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{default_time_limit, Category, Difficulty, Expected, ItemKind, ItemSet, TestItem};

/// Intermediate TOML structure for parsing item set files.
#[derive(Debug, Deserialize)]
struct TomlItemFile {
    item_set: TomlItemSetHeader,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlItemSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_difficulty: Option<String>,
    #[serde(default = "default_time_limit")]
    default_time_limit_secs: u32,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    category: String,
    #[serde(default)]
    kind: Option<ItemKind>,
    prompt: String,
    #[serde(default)]
    stimulus: Vec<String>,
    #[serde(default)]
    options: Vec<String>,
    expected: Expected,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    time_limit_secs: Option<u32>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty> {
    s.parse().map_err(|e: String| anyhow::anyhow!("{}", e))
}

/// Parse a single TOML file into an `ItemSet`.
pub fn parse_item_set(path: &Path) -> Result<ItemSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read item set file: {}", path.display()))?;

    parse_item_set_str(&content, path)
}

/// Parse a TOML string into an `ItemSet`.
pub fn parse_item_set_str(content: &str, source_path: &Path) -> Result<ItemSet> {
    let parsed: TomlItemFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let default_difficulty = parsed
        .item_set
        .default_difficulty
        .as_deref()
        .map(parse_difficulty)
        .transpose()?
        .unwrap_or_default();
    let default_time_limit = parsed.item_set.default_time_limit_secs;

    let items = parsed
        .items
        .into_iter()
        .map(|i| {
            let category: Category = i
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!("item '{}': {}", i.id, e))?;
            let difficulty = i
                .difficulty
                .as_deref()
                .map(parse_difficulty)
                .transpose()
                .with_context(|| format!("item '{}'", i.id))?
                .unwrap_or(default_difficulty);

            Ok(TestItem {
                id: i.id,
                category,
                kind: i.kind.unwrap_or(ItemKind::Custom),
                prompt: i.prompt,
                stimulus: i.stimulus,
                options: i.options,
                expected: i.expected,
                difficulty,
                time_limit_secs: i.time_limit_secs.unwrap_or(default_time_limit),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ItemSet {
        id: parsed.item_set.id,
        name: parsed.item_set.name,
        description: parsed.item_set.description,
        items,
        default_difficulty,
        default_time_limit_secs: default_time_limit,
    })
}

/// Recursively load all `.toml` item set files from a directory.
pub fn load_item_directory(dir: &Path) -> Result<Vec<ItemSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_item_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_item_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file, or every item set under a directory.
pub fn load_item_sets(path: &Path) -> Result<Vec<ItemSet>> {
    if path.is_dir() {
        load_item_directory(path)
    } else {
        Ok(vec![parse_item_set(path)?])
    }
}

/// A warning from item set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an item set for common authoring mistakes.
pub fn validate_item_set(set: &ItemSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |item: &TestItem, message: String| {
        warnings.push(ValidationWarning {
            item_id: Some(item.id.clone()),
            message,
        });
    };

    let mut seen_ids = HashSet::new();
    for item in &set.items {
        if !seen_ids.insert(&item.id) {
            warn(item, format!("duplicate item ID: {}", item.id));
        }
        if item.prompt.trim().is_empty() {
            warn(item, "prompt is empty".into());
        }
        if item.expected.is_empty() {
            warn(item, "expected answer is empty".into());
        }
        if let Expected::Exact(answer) = &item.expected {
            if !item.options.is_empty() && !item.options.iter().any(|o| o.trim() == answer.trim()) {
                warn(item, format!("expected answer '{answer}' is not among the options"));
            }
        }
        if matches!(item.expected, Expected::Sequence(_)) && item.stimulus.is_empty() {
            warn(item, "sequence answer but no stimulus to memorize".into());
        }
    }

    if set.items.is_empty() {
        warnings.push(ValidationWarning {
            item_id: None,
            message: "item set has no items".into(),
        });
    }

    warnings
}
