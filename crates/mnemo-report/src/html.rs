//! HTML progress report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use mnemo_core::model::Category;
use mnemo_core::report::SessionResult;
use mnemo_core::statistics::{
    category_averages, cognitive_load, progress_analysis, strengths_and_weaknesses, trend,
};

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn score_class(score: f64) -> &'static str {
    if score >= 75.0 {
        "pass"
    } else if score < 60.0 {
        "fail"
    } else {
        ""
    }
}

/// Generate an HTML progress report from session history (oldest first).
pub fn generate_html(history: &[SessionResult]) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>mnemo progress report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>mnemo progress report</h1>\n");
    let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    match (history.first(), history.last()) {
        (Some(first), Some(last)) => html.push_str(&format!(
            "<p class=\"meta\">{} sessions | {} to {} | generated {}</p>\n",
            history.len(),
            first.created_at.format("%Y-%m-%d"),
            last.created_at.format("%Y-%m-%d"),
            generated
        )),
        _ => html.push_str(&format!(
            "<p class=\"meta\">No sessions recorded yet | generated {generated}</p>\n"
        )),
    }
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n<tbody>\n");
    if let Some(latest) = history.last() {
        html.push_str(&format!(
            "<tr><th>Latest overall</th><td>{:.1}%</td></tr>\n",
            latest.overall
        ));
    }
    html.push_str(&format!(
        "<tr><th>Trend</th><td>{}</td></tr>\n",
        trend(history)
    ));
    html.push_str(&format!(
        "<tr><th>Cognitive load</th><td>{}</td></tr>\n",
        cognitive_load(history)
    ));
    if let Some(analysis) = progress_analysis(history) {
        html.push_str(&format!(
            "<tr><th>Average</th><td>{:.1}%</td></tr>\n",
            analysis.mean
        ));
        html.push_str(&format!(
            "<tr><th>Improvement</th><td>{:+.1}%</td></tr>\n",
            analysis.improvement
        ));
        html.push_str(&format!(
            "<tr><th>Consistency</th><td>{:.1}</td></tr>\n",
            analysis.consistency
        ));
    }
    html.push_str("</tbody></table>\n");

    let averages = category_averages(history);
    if !averages.is_empty() {
        html.push_str("<h3>Category averages</h3>\n");
        html.push_str(&generate_bar_chart(&averages));
    }

    if let Some(latest) = history.last() {
        let sw = strengths_and_weaknesses(latest);
        let list = |cats: &[Category]| {
            if cats.is_empty() {
                "none".to_string()
            } else {
                cats.iter().map(|c| c.label()).collect::<Vec<_>>().join(", ")
            }
        };
        html.push_str(&format!(
            "<p>Strengths: <strong>{}</strong></p>\n<p>Needs work: <strong>{}</strong></p>\n",
            list(&sw.strengths),
            list(&sw.weaknesses)
        ));
    }
    html.push_str("</section>\n");

    // Per-session results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Sessions</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Date</th><th onclick=\"sortTable(1)\">Difficulty</th><th onclick=\"sortTable(2)\">Overall</th><th onclick=\"sortTable(3)\">Minutes</th><th onclick=\"sortTable(4)\">Source</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in history.iter().rev() {
        let class = score_class(r.overall);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"{}\">{:.1}%</td><td>{:.1}</td><td>{}</td></tr>\n",
            r.created_at.format("%Y-%m-%d %H:%M"),
            r.difficulty,
            class,
            r.overall,
            r.minutes(),
            html_escape(r.source.as_deref().unwrap_or("generated")),
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    match serde_json::to_string_pretty(history) {
        Ok(json) => html.push_str(&html_escape(&json)),
        Err(e) => tracing::warn!("could not embed session JSON: {e}"),
    }
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(history: &[SessionResult], path: &Path) -> Result<()> {
    let html = generate_html(history);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    tracing::info!("wrote HTML report to {}", path.display());
    Ok(())
}

fn generate_bar_chart(averages: &BTreeMap<Category, f64>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = averages.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (category, score)) in averages.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (score.clamp(0.0, 100.0) / 100.0 * max_width as f64) as usize;

        let color = if *score >= 75.0 {
            "#22c55e"
        } else if *score >= 60.0 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            category.label()
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
table.summary { width: auto; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
