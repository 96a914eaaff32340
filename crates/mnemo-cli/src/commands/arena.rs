//! The `mnemo arena` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mnemo_core::games::Game;
use mnemo_core::store::{load_arena, save_arena, JsonFileStore};

pub fn execute(game: Option<Game>, score: Option<u32>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let mut store = JsonFileStore::new(&config.data_dir);
    let mut stats = load_arena(&mut store)?;

    if let (Some(game), Some(score)) = (game, score) {
        let unlocked = stats.record(game, score, chrono::Utc::now());
        save_arena(&mut store, &stats)?;
        println!("Recorded {score} points for {game}");
        for kind in unlocked {
            println!("Achievement unlocked: {}", kind.title());
        }
    }

    println!(
        "Level {} | {} XP ({} to next level) | {} games | best {} | streak {}",
        stats.level,
        stats.total_xp,
        stats.xp_to_next_level(),
        stats.games_played,
        stats.highest_score,
        stats.current_streak
    );

    let mut table = Table::new();
    table.set_header(vec!["Achievement", "Progress", "Unlocked"]);
    for a in &stats.achievements {
        table.add_row(vec![
            Cell::new(a.kind.title()),
            Cell::new(format!("{}/{}", a.progress.min(a.kind.target()), a.kind.target())),
            Cell::new(if a.unlocked { "yes" } else { "" }),
        ]);
    }
    println!("{table}");

    Ok(())
}
