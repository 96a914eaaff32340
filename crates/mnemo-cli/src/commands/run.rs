//! The `mnemo run` command.

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use mnemo_core::generator::ItemGenerator;
use mnemo_core::model::{Difficulty, TestItem};
use mnemo_core::parser;
use mnemo_core::report::SessionResult;
use mnemo_core::scoring::AnswerRecord;
use mnemo_core::session::{ProgressReporter, Respondent, SessionRunner};
use mnemo_core::statistics::strengths_and_weaknesses;
use mnemo_core::tips::{personalized_tip, recommendations, TipFocus};

/// Reads answers line by line from a terminal or a pipe.
struct ConsoleRespondent<R> {
    input: R,
    interactive: bool,
}

impl<R: BufRead> ConsoleRespondent<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        Ok((!line.is_empty()).then(|| line.to_string()))
    }
}

impl<R: BufRead> Respondent for ConsoleRespondent<R> {
    fn present(&mut self, item: &TestItem) -> Result<()> {
        if item.stimulus.is_empty() {
            return Ok(());
        }
        let mut out = std::io::stdout().lock();
        writeln!(out, "Memorize: {}", item.stimulus.join("  "))?;
        if self.interactive {
            write!(out, "(press Enter when ready)")?;
            out.flush()?;
            self.read_line()?;
            // clear the screen so the stimulus can't be copied
            write!(out, "\x1b[2J\x1b[H")?;
        }
        Ok(())
    }

    fn respond(&mut self, item: &TestItem) -> Result<Option<String>> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{} ({}s)", item.prompt, item.time_limit_secs)?;
        if !item.options.is_empty() {
            writeln!(out, "Options: {}", item.options.join(", "))?;
        }
        write!(out, "> ")?;
        out.flush()?;
        drop(out);

        self.read_line()
    }
}

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_item_start(&self, index: usize, total: usize, item: &TestItem) {
        println!("\n[{}/{}] {}", index + 1, total, item.category.label());
    }

    fn on_item_scored(&self, record: &AnswerRecord) {
        match (&record.answer, record.correct) {
            (None, _) => println!("  skipped"),
            (Some(_), true) => println!("  correct"),
            (Some(_), false) => println!("  incorrect"),
        }
    }

    fn on_session_complete(&self, result: &SessionResult, elapsed: Duration) {
        println!(
            "\nComplete: {} items in {:.1}s",
            result.answers.len(),
            elapsed.as_secs_f64()
        );
    }
}

pub fn execute(
    difficulty: Option<Difficulty>,
    item_set: Option<PathBuf>,
    seed: Option<u64>,
    no_save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let difficulty = difficulty.unwrap_or(config.default_difficulty);
    let mut rng = super::rng_for(seed.or(config.seed));

    let mut runner = SessionRunner::new(config.scoring.clone());
    let items = match &item_set {
        Some(path) => {
            let sets = parser::load_item_sets(path)?;
            let items: Vec<TestItem> = sets.iter().flat_map(|s| s.items.clone()).collect();
            anyhow::ensure!(!items.is_empty(), "no items found in {}", path.display());
            let ids: Vec<&str> = sets.iter().map(|s| s.id.as_str()).collect();
            runner = runner.with_source(ids.join(","));
            items
        }
        None => ItemGenerator::new(&mut rng).generate_session(difficulty),
    };

    println!("mnemo v{} - {} items at {difficulty}", env!("CARGO_PKG_VERSION"), items.len());

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut respondent = ConsoleRespondent {
        input: stdin.lock(),
        interactive,
    };
    let result = runner.run(&items, difficulty, &mut respondent, &ConsoleReporter);

    println!();
    super::print_result(&result);

    let sw = strengths_and_weaknesses(&result);
    println!("\nRecommendations:");
    for rec in recommendations(&sw) {
        println!("  - {rec}");
    }
    let focus = sw
        .weaknesses
        .first()
        .map(|&c| TipFocus::for_category(c))
        .unwrap_or(TipFocus::General);
    println!("Tip: {}", personalized_tip(result.overall, focus, &mut rng));

    if !no_save {
        let (mut history, mut store) = super::open_history(&config)?;
        history.record(result, &mut store)?;
        eprintln!(
            "Saved to history ({} sessions in {})",
            history.len(),
            store.dir().display()
        );
    }

    Ok(())
}
