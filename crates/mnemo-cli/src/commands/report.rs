//! The `mnemo report` command.

use std::path::PathBuf;

use anyhow::Result;

use mnemo_report::html::write_html_report;

pub fn execute(output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path.as_deref())?;
    let (history, _) = super::open_history(&config)?;

    if history.is_empty() {
        eprintln!("Warning: no sessions recorded; the report will be empty.");
    }

    write_html_report(&history.sessions, &output)?;
    println!("HTML report: {}", output.display());
    Ok(())
}
