//! Session results with JSON persistence and regression detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Category, Difficulty};
use crate::scoring::{AnswerRecord, CategoryScore};

/// A completed, scored assessment session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    /// Unique session identifier.
    pub id: Uuid,
    /// When the session finished.
    pub created_at: DateTime<Utc>,
    /// Tier the session was played at.
    pub difficulty: Difficulty,
    /// Per-category scores, only for categories that were attempted.
    pub category_scores: Vec<CategoryScore>,
    /// Mean of the category percentages.
    pub overall: f64,
    /// Wall-clock duration in milliseconds.
    pub elapsed_ms: u64,
    /// Individual answers.
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    /// Item set the session came from, if it wasn't generated.
    #[serde(default)]
    pub source: Option<String>,
}

impl SessionResult {
    /// Percentage for one category, if it was attempted.
    pub fn category_percentage(&self, category: Category) -> Option<f64> {
        self.category_scores
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.percentage)
    }

    /// Session length in minutes.
    pub fn minutes(&self) -> f64 {
        self.elapsed_ms as f64 / 60_000.0
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize session")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session from {}", path.display()))?;
        let result: SessionResult =
            serde_json::from_str(&content).context("failed to parse session JSON")?;
        Ok(result)
    }

    /// Compare this session against a baseline, category by category.
    ///
    /// `threshold` is in percentage points: a category whose score moved by
    /// no more than that counts as unchanged.
    pub fn compare(&self, baseline: &SessionResult, threshold: f64) -> ScoreComparison {
        let score_map = |result: &SessionResult| -> HashMap<Category, f64> {
            result
                .category_scores
                .iter()
                .map(|s| (s.category, s.percentage))
                .collect()
        };

        let baseline_scores = score_map(baseline);
        let current_scores = score_map(self);

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_categories = 0usize;

        for score in &self.category_scores {
            let current = score.percentage;
            let Some(&baseline_val) = baseline_scores.get(&score.category) else {
                new_categories += 1;
                continue;
            };
            let change = ScoreChange {
                category: score.category,
                baseline_score: baseline_val,
                current_score: current,
                delta: current - baseline_val,
            };
            if change.delta < -threshold {
                regressions.push(change);
            } else if change.delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let removed_categories = baseline_scores
            .keys()
            .filter(|c| !current_scores.contains_key(c))
            .count();

        ScoreComparison {
            baseline_overall: baseline.overall,
            current_overall: self.overall,
            regressions,
            improvements,
            unchanged,
            new_categories,
            removed_categories,
        }
    }
}

/// Result of comparing two sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreComparison {
    pub baseline_overall: f64,
    pub current_overall: f64,
    /// Categories whose score went down.
    pub regressions: Vec<ScoreChange>,
    /// Categories whose score went up.
    pub improvements: Vec<ScoreChange>,
    /// Categories with no significant change.
    pub unchanged: usize,
    /// Categories in current but not baseline.
    pub new_categories: usize,
    /// Categories in baseline but not current.
    pub removed_categories: usize,
}

/// A category score movement between two sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreChange {
    pub category: Category,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

impl ScoreComparison {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Overall:** {:.1}% → {:.1}% ({:+.1})\n\n",
            self.baseline_overall,
            self.current_overall,
            self.current_overall - self.baseline_overall
        ));
        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        let mut table = |title: &str, changes: &[ScoreChange]| {
            if changes.is_empty() {
                return;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Category | Baseline | Current | Delta |\n");
            md.push_str("|----------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {:+.1}% |\n",
                    c.category.label(),
                    c.baseline_score,
                    c.current_score,
                    c.delta
                ));
            }
            md.push('\n');
        };
        table("Regressions", &self.regressions);
        table("Improvements", &self.improvements);

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result(scores: &[(Category, f64)]) -> SessionResult {
        let category_scores: Vec<CategoryScore> = scores
            .iter()
            .map(|&(category, percentage)| CategoryScore {
                category,
                correct: 0,
                attempted: 1,
                percentage,
            })
            .collect();
        let overall = if scores.is_empty() {
            0.0
        } else {
            scores.iter().map(|s| s.1).sum::<f64>() / scores.len() as f64
        };
        SessionResult {
            id: Uuid::nil(),
            created_at: Utc::now(),
            difficulty: Difficulty::Medium,
            category_scores,
            overall,
            elapsed_ms: 120_000,
            answers: vec![],
            source: None,
        }
    }

    #[test]
    fn compare_identical_sessions() {
        let r = make_result(&[(Category::WorkingMemory, 80.0)]);
        let cmp = r.compare(&r.clone(), 5.0);
        assert!(cmp.regressions.is_empty());
        assert!(cmp.improvements.is_empty());
        assert_eq!(cmp.unchanged, 1);
    }

    #[test]
    fn compare_with_regression_and_improvement() {
        let baseline = make_result(&[(Category::WorkingMemory, 100.0), (Category::Attention, 50.0)]);
        let current = make_result(&[(Category::WorkingMemory, 60.0), (Category::Attention, 75.0)]);

        let cmp = current.compare(&baseline, 5.0);
        assert_eq!(cmp.regressions.len(), 1);
        assert_eq!(cmp.regressions[0].category, Category::WorkingMemory);
        assert_eq!(cmp.regressions[0].delta, -40.0);
        assert_eq!(cmp.improvements.len(), 1);
        assert!(cmp.has_regressions());
    }

    #[test]
    fn compare_with_new_and_removed() {
        let baseline = make_result(&[(Category::VisualMemory, 70.0)]);
        let current = make_result(&[(Category::ProcessingSpeed, 70.0)]);
        let cmp = current.compare(&baseline, 5.0);
        assert_eq!(cmp.new_categories, 1);
        assert_eq!(cmp.removed_categories, 1);
    }

    #[test]
    fn json_persistence() {
        let result = make_result(&[(Category::WorkingMemory, 66.67)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        result.save_json(&path).unwrap();
        let loaded = SessionResult::load_json(&path).unwrap();
        assert_eq!(loaded.category_percentage(Category::WorkingMemory), Some(66.67));
        assert_eq!(loaded.minutes(), 2.0);
    }

    #[test]
    fn load_missing_file_has_context() {
        let err = SessionResult::load_json(Path::new("/nonexistent/session.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read session"));
    }

    #[test]
    fn markdown_output() {
        let baseline = make_result(&[(Category::WorkingMemory, 100.0)]);
        let current = make_result(&[(Category::WorkingMemory, 50.0)]);
        let md = current.compare(&baseline, 5.0).to_markdown();
        assert!(md.contains("Regressions"));
        assert!(md.contains("Working Memory"));
        assert!(md.contains("-50.0%"));
    }
}
