//! The `mnemo compare` command.

use std::path::PathBuf;

use anyhow::Result;

use mnemo_core::report::SessionResult;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: Option<f64>,
    fail_on_regression: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let threshold = match threshold {
        Some(t) => t,
        None => super::load_config(config_path.as_deref())?.regression_threshold,
    };
    anyhow::ensure!(
        (0.0..=100.0).contains(&threshold),
        "threshold must be between 0 and 100"
    );

    let baseline = SessionResult::load_json(&baseline_path)?;
    let current = SessionResult::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!(
                "Overall: {:.1}% -> {:.1}% ({:+.1}%)",
                report.baseline_overall,
                report.current_overall,
                report.current_overall - report.baseline_overall
            );
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1}%)",
                        r.category.label(),
                        r.baseline_score,
                        r.current_score,
                        r.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} {:.1}% -> {:.1}% ({:+.1}%)",
                        i.category.label(),
                        i.baseline_score,
                        i.current_score,
                        i.delta
                    );
                }
            }

            if report.new_categories > 0 {
                println!("\n{} new category(ies)", report.new_categories);
            }
            if report.removed_categories > 0 {
                println!("{} removed category(ies)", report.removed_categories);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
