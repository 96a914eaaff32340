//! The `mnemo recommend` command.

use std::path::PathBuf;

use anyhow::Result;

use mnemo_core::model::Category;
use mnemo_core::statistics::{recommend_difficulty, strengths_and_weaknesses};
use mnemo_core::tips::{personalized_tip, recommendations, TipFocus};

pub fn execute(category: Option<Category>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let (history, _) = super::open_history(&config)?;

    let rec = recommend_difficulty(&history.sessions, category);
    match (category, rec.based_on) {
        (Some(c), Some(avg)) => println!(
            "Recommended difficulty for {}: {} (average {:.1}% over {} sessions)",
            c.label(),
            rec.difficulty,
            avg,
            rec.sample_size
        ),
        (None, Some(avg)) => println!(
            "Recommended difficulty: {} (average {:.1}% over {} sessions)",
            rec.difficulty, avg, rec.sample_size
        ),
        (_, None) => println!(
            "Recommended difficulty: {} (no matching history yet)",
            rec.difficulty
        ),
    }

    let mut rng = super::rng_for(config.seed);
    let focus = category.map(TipFocus::for_category).unwrap_or(TipFocus::General);
    let score = rec.based_on.unwrap_or(0.0);
    println!("Tip: {}", personalized_tip(score, focus, &mut rng));

    if let Some(latest) = history.latest() {
        for line in recommendations(&strengths_and_weaknesses(latest)) {
            println!("  - {line}");
        }
    }

    Ok(())
}
