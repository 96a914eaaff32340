//! mnemo CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use mnemo_core::games::Game;
use mnemo_core::model::{Category, Difficulty};

mod commands;

#[derive(Parser)]
#[command(name = "mnemo", version, about = "Memory training and assessment")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take an interactive memory test
    Run {
        /// Difficulty tier: easy, medium, hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Use items from a .toml item set or directory instead of generating them
        #[arg(long)]
        item_set: Option<PathBuf>,

        /// RNG seed for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,

        /// Don't record the result in history
        #[arg(long)]
        no_save: bool,
    },

    /// Generate a test session and write it as JSON
    Generate {
        /// Difficulty tier: easy, medium, hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// RNG seed for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score a JSON map of answers against generated items
    Score {
        /// Items JSON, as written by `mnemo generate`
        #[arg(long)]
        items: PathBuf,

        /// Answers JSON: an object mapping item id to answer
        #[arg(long)]
        answers: PathBuf,

        /// Write the session result JSON here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also record the result in history
        #[arg(long)]
        record: bool,
    },

    /// Show past sessions and progress analysis
    History {
        /// Only show the most recent N sessions
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Compare two session results
    Compare {
        /// Baseline session JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current session JSON
        #[arg(long)]
        current: PathBuf,

        /// Regression threshold in percentage points (default from config)
        #[arg(long)]
        threshold: Option<f64>,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Recommend the next difficulty tier and a training tip
    Recommend {
        /// Base the recommendation on one category
        #[arg(long)]
        category: Option<Category>,
    },

    /// Write an HTML progress report
    Report {
        /// Output HTML file
        #[arg(long, default_value = "mnemo-report.html")]
        output: PathBuf,
    },

    /// Record a mini-game score and show arena progress
    Arena {
        /// Game played: nback, dual_task, speed_sort, word_match,
        /// number_sequence, pattern_recall, matching
        #[arg(long, requires = "score")]
        game: Option<Game>,

        /// Points scored
        #[arg(long, requires = "game")]
        score: Option<u32>,
    },

    /// Start, complete and review multi-day challenges
    Challenge {
        #[command(subcommand)]
        action: Option<commands::challenge::ChallengeAction>,
    },

    /// Plan and tick off daily practice tasks
    Tasks {
        #[command(subcommand)]
        action: Option<commands::tasks::TaskAction>,
    },

    /// Work out your learning style from the questionnaire
    Profile {
        /// Chosen option (1-4) for each question, comma-separated
        #[arg(long)]
        answers: Option<String>,
    },

    /// Validate item set TOML files
    Validate {
        /// Path to item set file or directory
        #[arg(long)]
        item_set: PathBuf,
    },

    /// Create starter config and example item set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mnemo=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Run {
            difficulty,
            item_set,
            seed,
            no_save,
        } => commands::run::execute(difficulty, item_set, seed, no_save, config),
        Commands::Generate {
            difficulty,
            seed,
            output,
        } => commands::generate::execute(difficulty, seed, output, config),
        Commands::Score {
            items,
            answers,
            output,
            record,
        } => commands::score::execute(items, answers, output, record, config),
        Commands::History { limit } => commands::history::execute(limit, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
            config,
        ),
        Commands::Recommend { category } => commands::recommend::execute(category, config),
        Commands::Report { output } => commands::report::execute(output, config),
        Commands::Arena { game, score } => commands::arena::execute(game, score, config),
        Commands::Challenge { action } => commands::challenge::execute(action, config),
        Commands::Tasks { action } => commands::tasks::execute(action, config),
        Commands::Profile { answers } => commands::profile::execute(answers),
        Commands::Validate { item_set } => commands::validate::execute(item_set),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
