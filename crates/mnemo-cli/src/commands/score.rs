//! The `mnemo score` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use mnemo_core::model::TestItem;
use mnemo_core::session::{NoopReporter, ScriptedRespondent, SessionRunner};

pub fn execute(
    items_path: PathBuf,
    answers_path: PathBuf,
    output: Option<PathBuf>,
    record: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;

    let items: Vec<TestItem> = read_json(&items_path)?;
    let answers: HashMap<String, String> = read_json(&answers_path)?;
    anyhow::ensure!(!items.is_empty(), "no items in {}", items_path.display());

    let unknown: Vec<&String> = answers
        .keys()
        .filter(|id| !items.iter().any(|i| &i.id == *id))
        .collect();
    if !unknown.is_empty() {
        tracing::warn!("ignoring answers for unknown items: {unknown:?}");
    }

    // a session is as hard as its hardest item
    let difficulty = items
        .iter()
        .map(|i| i.difficulty)
        .max()
        .unwrap_or(config.default_difficulty);

    let runner = SessionRunner::new(config.scoring.clone()).with_source(
        items_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );
    let mut respondent = ScriptedRespondent::by_id(answers);
    let result = runner.run(&items, difficulty, &mut respondent, &NoopReporter);

    super::print_result(&result);

    if let Some(path) = &output {
        result.save_json(path)?;
        eprintln!("Result saved to: {}", path.display());
    }

    if record {
        let (mut history, mut store) = super::open_history(&config)?;
        history.record(result, &mut store)?;
        eprintln!("Recorded in history ({} sessions)", history.len());
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
