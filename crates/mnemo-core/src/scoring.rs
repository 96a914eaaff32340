//! Answer checking and score aggregation.
//!
//! A session's answers are checked one by one against each item's
//! [`Expected`] answer, then rolled up into per-category percentages and a
//! single overall percentage.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::model::{Category, Difficulty, Expected, TestItem};

/// Scoring options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Scale each category percentage by its tier multiplier
    /// (0.8 / 1.0 / 1.2) before clamping.
    #[serde(default)]
    pub difficulty_weighting: bool,
}

/// The outcome of one answered (or timed-out) item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub item_id: String,
    pub category: Category,
    /// Raw answer text; `None` when the item timed out or was skipped.
    #[serde(default)]
    pub answer: Option<String>,
    pub correct: bool,
    /// Time taken to answer, if measured.
    #[serde(default)]
    pub response_ms: Option<u64>,
}

/// Aggregated result for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub correct: u32,
    pub attempted: u32,
    /// Percentage in `[0, 100]`.
    pub percentage: f64,
}

/// Split a comma-separated answer into trimmed, non-empty tokens.
pub fn parse_sequence_answer(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Check an answer against an item's expected answer.
///
/// Missing and blank answers are always incorrect.
pub fn is_correct(item: &TestItem, answer: Option<&str>) -> bool {
    let Some(answer) = answer.map(str::trim).filter(|a| !a.is_empty()) else {
        return false;
    };

    match &item.expected {
        Expected::Exact(expected) => answer == expected.trim(),
        Expected::Sequence(expected) => {
            let tokens = parse_sequence_answer(answer);
            tokens.len() == expected.len()
                && tokens.iter().zip(expected).all(|(got, want)| got == want.trim())
        }
        Expected::AnyOf(values) => values.iter().any(|v| v.trim() == answer),
    }
}

/// Score a single answer.
pub fn score_answer(item: &TestItem, answer: Option<&str>, response_ms: Option<u64>) -> AnswerRecord {
    AnswerRecord {
        item_id: item.id.clone(),
        category: item.category,
        answer: answer.map(String::from),
        correct: is_correct(item, answer),
        response_ms,
    }
}

/// `correct / attempted × 100`, clamped to `[0, 100]`; 0 when nothing was attempted.
pub fn category_percentage(correct: u32, attempted: u32) -> f64 {
    if attempted == 0 {
        return 0.0;
    }
    (correct as f64 / attempted as f64 * 100.0).clamp(0.0, 100.0)
}

/// Aggregate answer records into category scores and an overall percentage.
///
/// Only categories with at least one attempted item appear. The overall
/// score is the mean of those category percentages, or 0 when there are none.
/// With difficulty weighting on, a category uses the hardest tier among its
/// items.
pub fn score_session(
    items: &[TestItem],
    records: &[AnswerRecord],
    config: &ScoringConfig,
) -> (Vec<CategoryScore>, f64) {
    let tiers: HashMap<&str, Difficulty> =
        items.iter().map(|i| (i.id.as_str(), i.difficulty)).collect();

    let mut tallies: BTreeMap<Category, (u32, u32, Difficulty)> = BTreeMap::new();
    for record in records {
        let tier = tiers
            .get(record.item_id.as_str())
            .copied()
            .unwrap_or_default();
        let entry = tallies
            .entry(record.category)
            .or_insert((0, 0, Difficulty::Easy));
        entry.1 += 1;
        if record.correct {
            entry.0 += 1;
        }
        entry.2 = entry.2.max(tier);
    }

    let scores: Vec<CategoryScore> = tallies
        .into_iter()
        .map(|(category, (correct, attempted, tier))| {
            let mut percentage = category_percentage(correct, attempted);
            if config.difficulty_weighting {
                percentage = (percentage * tier.category_multiplier()).clamp(0.0, 100.0);
            }
            CategoryScore {
                category,
                correct,
                attempted,
                percentage,
            }
        })
        .collect();

    let overall = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|s| s.percentage).sum::<f64>() / scores.len() as f64
    };

    (scores, overall)
}
