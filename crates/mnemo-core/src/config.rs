//! User configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;
use crate::scoring::ScoringConfig;

/// Top-level mnemo configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MnemoConfig {
    /// Tier used when a command isn't given one.
    #[serde(default)]
    pub default_difficulty: Difficulty,
    /// Where history and arena stats are stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Fixed RNG seed for reproducible sessions.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Percentage points a category must move before `compare` reports it.
    #[serde(default = "default_regression_threshold")]
    pub regression_threshold: f64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./mnemo-data")
}
fn default_regression_threshold() -> f64 {
    5.0
}

impl Default for MnemoConfig {
    fn default() -> Self {
        Self {
            default_difficulty: Difficulty::default(),
            data_dir: default_data_dir(),
            seed: None,
            scoring: ScoringConfig::default(),
            regression_threshold: default_regression_threshold(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&lookup(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `mnemo.toml` in the current directory
/// 2. `~/.config/mnemo/config.toml`
///
/// Environment variable overrides: `MNEMO_DATA_DIR`, `MNEMO_DIFFICULTY`.
pub fn load_config() -> Result<MnemoConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MnemoConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("mnemo.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<MnemoConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MnemoConfig::default(),
    };

    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Apply `MNEMO_*` overrides from `lookup`, then expand `${VAR}` in paths.
pub fn apply_overrides(
    mut config: MnemoConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<MnemoConfig> {
    if let Some(dir) = lookup("MNEMO_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(difficulty) = lookup("MNEMO_DIFFICULTY") {
        config.default_difficulty = difficulty
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("invalid MNEMO_DIFFICULTY")?;
    }

    let data_dir = config.data_dir.to_string_lossy().into_owned();
    if data_dir.contains("${") {
        config.data_dir = PathBuf::from(resolve_env_vars(&data_dir, &lookup));
    }
    anyhow::ensure!(
        (0.0..=100.0).contains(&config.regression_threshold),
        "regression_threshold must be between 0 and 100, got {}",
        config.regression_threshold
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("mnemo"))
}
