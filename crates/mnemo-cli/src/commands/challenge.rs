//! The `mnemo challenge` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Table};

use mnemo_core::challenges::{ChallengeLength, ChallengeLevel};
use mnemo_core::store::{load_challenges, save_challenges, JsonFileStore};

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// Start a new challenge
    Start {
        /// week or month
        #[arg(long, default_value = "week")]
        length: ChallengeLength,

        /// beginner, intermediate or advanced
        #[arg(long, default_value = "beginner")]
        level: ChallengeLevel,
    },

    /// Mark a goal as done
    Complete {
        /// Challenge id, as listed by `mnemo challenge`
        #[arg(long)]
        challenge: u32,

        /// Goal id, e.g. 1-0
        #[arg(long)]
        goal: String,
    },
}

pub fn execute(action: Option<ChallengeAction>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let mut store = JsonFileStore::new(&config.data_dir);
    let mut board = load_challenges(&mut store)?;
    let now = chrono::Utc::now();

    match action {
        Some(ChallengeAction::Start { length, level }) => {
            let started = board.start(length, level, now);
            println!(
                "Started challenge {}: {} ({} goals over {} days)",
                started.id,
                started.title,
                started.goals.len(),
                started.length.days()
            );
            save_challenges(&mut store, &board)?;
        }
        Some(ChallengeAction::Complete { challenge, goal }) => {
            let done = board.complete_goal(challenge, &goal, now)?;
            save_challenges(&mut store, &board)?;
            println!("Completed goal {goal}: +{} points", done.points);
            if let Some(rewards) = done.rewards {
                println!("Challenge complete! Rewards:");
                for reward in rewards {
                    println!("  - {reward}");
                }
            }
        }
        None => {}
    }

    let stats = &board.stats;
    println!(
        "Level {} | {} points | streak {} (best {}) | {} challenges completed",
        stats.level,
        stats.total_points,
        stats.current_streak,
        stats.longest_streak,
        stats.challenges_completed
    );

    if board.active.is_empty() {
        println!("No active challenges. Start one with `mnemo challenge start`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Challenge", "Level", "Day", "Progress", "Ends"]);
    for c in &board.active {
        let days = c.length.days();
        let progress = c.progress();
        table.add_row(vec![
            Cell::new(c.id),
            Cell::new(&c.title),
            Cell::new(c.level),
            Cell::new(format!("{}/{days}", c.day_at(now).min(days))),
            Cell::new(format!(
                "{}/{} ({:.0}%)",
                progress.completed, progress.total, progress.percentage
            )),
            Cell::new(c.ends_at().format("%Y-%m-%d")),
        ]);
    }
    println!("{table}");

    for c in &board.active {
        let today = c.goals_for_day(now);
        if today.is_empty() {
            continue;
        }
        println!("\nToday in challenge {}:", c.id);
        for goal in today {
            let mark = if goal.completed { "x" } else { " " };
            println!("  [{mark}] {} {} (+{})", goal.id, goal.title, goal.points);
        }
    }

    Ok(())
}
