//! Subcommand implementations and the helpers they share.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use mnemo_core::config::{load_config_from, MnemoConfig};
use mnemo_core::report::SessionResult;
use mnemo_core::store::{History, JsonFileStore};

pub mod arena;
pub mod challenge;
pub mod compare;
pub mod generate;
pub mod history;
pub mod init;
pub mod profile;
pub mod recommend;
pub mod report;
pub mod run;
pub mod score;
pub mod tasks;
pub mod validate;

pub(crate) fn load_config(path: Option<&Path>) -> Result<MnemoConfig> {
    load_config_from(path)
}

/// Open the history store under the configured data directory.
pub(crate) fn open_history(config: &MnemoConfig) -> Result<(History, JsonFileStore)> {
    let mut store = JsonFileStore::new(&config.data_dir);
    let history = History::load(&mut store)?;
    Ok((history, store))
}

/// Seeded when a seed is given on the command line or in config.
pub(crate) fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub(crate) fn category_table(result: &SessionResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Correct", "Attempted", "Score"]);
    for score in &result.category_scores {
        table.add_row(vec![
            Cell::new(score.category.label()),
            Cell::new(score.correct),
            Cell::new(score.attempted),
            Cell::new(format!("{:.1}%", score.percentage)),
        ]);
    }
    table
}

pub(crate) fn print_result(result: &SessionResult) {
    println!("{}", category_table(result));
    println!("Overall: {:.1}%", result.overall);
}
