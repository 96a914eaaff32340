//! The `mnemo tasks` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Table};

use mnemo_core::profile::LearningStyle;
use mnemo_core::store::{load_tasks, save_tasks, History, JsonFileStore};
use mnemo_core::tasks::{completion_rate, focus_areas, plan_tasks, streak_stats, weekly_completion};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Generate a new plan, replacing the current one
    Plan {
        /// Number of days to plan
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Learning style, as reported by `mnemo profile`
        #[arg(long)]
        style: Option<LearningStyle>,

        /// Practice minutes per day
        #[arg(long, default_value_t = 30)]
        minutes: u32,

        /// RNG seed for reproducible plans
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Toggle a task between done and not done
    Done {
        /// Task id, e.g. 1-1-technique
        id: String,
    },
}

pub fn execute(action: Option<TaskAction>, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let mut store = JsonFileStore::new(&config.data_dir);
    let mut tasks = load_tasks(&mut store)?;
    let now = chrono::Utc::now();
    let today = now.date_naive();

    match action {
        Some(TaskAction::Plan {
            days,
            style,
            minutes,
            seed,
        }) => {
            anyhow::ensure!(days > 0, "--days must be at least 1");
            let history = History::load(&mut store)?;
            let focus = history.latest().map(focus_areas).unwrap_or_default();
            let mut rng = super::rng_for(seed.or(config.seed));

            tasks = plan_tasks(today, days, style, &focus, minutes, &mut rng);
            save_tasks(&mut store, &tasks)?;
            println!("Planned {} tasks over {days} days", tasks.len());
            if !focus.is_empty() {
                let names: Vec<&str> = focus.iter().map(|c| c.label()).collect();
                println!("Focus: {}", names.join(", "));
            }
        }
        Some(TaskAction::Done { id }) => {
            let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
                anyhow::bail!("no task with id {id}");
            };
            if task.toggle(now) {
                println!("Completed {}: {}", task.id, task.title);
            } else {
                println!("Marked {} as not done", task.id);
            }
            save_tasks(&mut store, &tasks)?;
        }
        None => {}
    }

    if tasks.is_empty() {
        println!("No tasks planned yet. Create a plan with `mnemo tasks plan`.");
        return Ok(());
    }

    let todays: Vec<_> = tasks.iter().filter(|t| t.date == today).collect();
    if todays.is_empty() {
        println!("Nothing planned for today.");
    } else {
        let mut table = Table::new();
        table.set_header(vec!["Id", "Task", "Category", "Minutes", "Target", "Done"]);
        for t in &todays {
            table.add_row(vec![
                Cell::new(&t.id),
                Cell::new(&t.title),
                Cell::new(t.category.label()),
                Cell::new(t.minutes),
                Cell::new(&t.target_area),
                Cell::new(if t.completed { "yes" } else { "" }),
            ]);
        }
        println!("{table}");
    }

    let done_today = todays.iter().filter(|t| t.completed).count();
    let streaks = streak_stats(&tasks, today);
    println!(
        "Today: {done_today}/{} ({:.0}%) | last 7 days {:.0}% | best streak {} | average streak {:.1}",
        todays.len(),
        completion_rate(&tasks, today),
        weekly_completion(&tasks, today),
        streaks.max_streak,
        streaks.average_streak
    );

    Ok(())
}
