//! The `mnemo history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use mnemo_core::statistics::{
    category_improvement, cognitive_load, progress_analysis, recent_performance, trend,
};

pub fn execute(limit: Option<usize>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let (history, _) = super::open_history(&config)?;

    if history.is_empty() {
        println!("No sessions recorded yet. Run `mnemo run` to take a test.");
        return Ok(());
    }

    let sessions = &history.sessions;
    let shown = limit.unwrap_or(sessions.len()).min(sessions.len());

    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Difficulty", "Overall", "Minutes", "Source"]);
    for (i, r) in sessions.iter().enumerate().skip(sessions.len() - shown) {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(r.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(r.difficulty),
            Cell::new(format!("{:.1}%", r.overall)),
            Cell::new(format!("{:.1}", r.minutes())),
            Cell::new(r.source.as_deref().unwrap_or("generated")),
        ]);
    }
    println!("{table}");
    println!("{} sessions recorded", sessions.len());

    println!("Trend: {}", trend(sessions));
    println!("Cognitive load: {}", cognitive_load(sessions));

    if let Some(analysis) = progress_analysis(sessions) {
        println!(
            "Progress: latest {:.1}%, average {:.1}%, improvement {:+.1}%, consistency {:.1} ({}, {:+.2}/day)",
            analysis.latest,
            analysis.mean,
            analysis.improvement,
            analysis.consistency,
            analysis.direction,
            analysis.slope_per_day
        );

        let recent = recent_performance(sessions);
        if recent.historical_mean > 0.0 {
            println!(
                "Recent average {:.1}% vs earlier {:.1}% ({:+.1}%)",
                recent.recent_mean, recent.historical_mean, recent.change
            );
        }
    }

    if let (Some(first), Some(latest)) = (sessions.first(), history.latest()) {
        let deltas = category_improvement(first, latest);
        if sessions.len() > 1 && !deltas.is_empty() {
            println!("\nSince your first session:");
            for (category, delta) in deltas {
                println!("  {:<18} {:+.1}%", category.label(), delta);
            }
        }
    }

    Ok(())
}
