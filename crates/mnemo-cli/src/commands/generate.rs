//! The `mnemo generate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mnemo_core::generator::ItemGenerator;
use mnemo_core::model::Difficulty;

pub fn execute(
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let difficulty = difficulty.unwrap_or(config.default_difficulty);

    let mut generator = ItemGenerator::new(super::rng_for(seed.or(config.seed)));
    let items = generator.generate_session(difficulty);
    let json = serde_json::to_string_pretty(&items)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Generated {} {} items: {}",
                items.len(),
                difficulty,
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
