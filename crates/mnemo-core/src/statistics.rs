//! Progress analytics over a user's session history.
//!
//! All functions take history oldest-first.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Category, Difficulty};
use crate::report::SessionResult;

/// Number of recent sessions the difficulty recommendation looks at.
const RECOMMENDATION_WINDOW: usize = 3;
/// Number of recent sessions compared against older ones.
const RECENT_WINDOW: usize = 10;
/// Half-on-half change needed before a trend is called.
const TREND_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Improving,
    Declining,
    Stable,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Improving => write!(f, "improving"),
            Direction::Declining => write!(f, "declining"),
            Direction::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CognitiveLoad {
    Low,
    Medium,
    High,
}

impl fmt::Display for CognitiveLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CognitiveLoad::Low => write!(f, "low"),
            CognitiveLoad::Medium => write!(f, "medium"),
            CognitiveLoad::High => write!(f, "high"),
        }
    }
}

/// Summary of a user's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressAnalysis {
    pub latest: f64,
    pub mean: f64,
    /// Latest minus first overall score.
    pub improvement: f64,
    /// Least-squares slope of overall score per day.
    pub slope_per_day: f64,
    /// `max(0, 100 − 2σ)`.
    pub consistency: f64,
    pub direction: Direction,
    pub sessions: usize,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary least-squares slope of `ys` against `xs`; 0 when `xs` has no spread.
pub fn least_squares_slope(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = mean(xs);
    let my = mean(ys);
    let mut num = 0.0;
    let mut den = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        num += (x - mx) * (y - my);
        den += (x - mx).powi(2);
    }
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Analyze overall-score progress. Needs at least two sessions.
pub fn progress_analysis(history: &[SessionResult]) -> Option<ProgressAnalysis> {
    if history.len() < 2 {
        return None;
    }
    let mut sorted: Vec<&SessionResult> = history.iter().collect();
    sorted.sort_by_key(|r| r.created_at);

    let first_at = sorted[0].created_at;
    let days: Vec<f64> = sorted
        .iter()
        .map(|r| (r.created_at - first_at).num_days() as f64)
        .collect();
    let scores: Vec<f64> = sorted.iter().map(|r| r.overall).collect();

    let slope = least_squares_slope(&days, &scores);
    let direction = if slope > 0.0 {
        Direction::Improving
    } else if slope < 0.0 {
        Direction::Declining
    } else {
        Direction::Stable
    };

    Some(ProgressAnalysis {
        latest: scores[scores.len() - 1],
        mean: mean(&scores),
        improvement: scores[scores.len() - 1] - scores[0],
        slope_per_day: slope,
        consistency: (100.0 - 2.0 * std_dev(&scores)).max(0.0),
        direction,
        sessions: scores.len(),
    })
}

/// Compare the second half of the history with the first half.
pub fn trend(history: &[SessionResult]) -> Direction {
    if history.len() < 2 {
        return Direction::Stable;
    }
    let scores: Vec<f64> = history.iter().map(|r| r.overall).collect();
    let (first, second) = scores.split_at(scores.len() / 2);
    let change = mean(second) - mean(first);
    if change > TREND_THRESHOLD {
        Direction::Improving
    } else if change < -TREND_THRESHOLD {
        Direction::Declining
    } else {
        Direction::Stable
    }
}

/// Long sessions with low scores suggest the material is too demanding.
pub fn cognitive_load(history: &[SessionResult]) -> CognitiveLoad {
    if history.is_empty() {
        return CognitiveLoad::Low;
    }
    let minutes: Vec<f64> = history.iter().map(SessionResult::minutes).collect();
    let scores: Vec<f64> = history.iter().map(|r| r.overall).collect();
    let (avg_minutes, avg_score) = (mean(&minutes), mean(&scores));

    if avg_minutes > 15.0 && avg_score < 60.0 {
        CognitiveLoad::High
    } else if avg_minutes > 10.0 && avg_score < 70.0 {
        CognitiveLoad::Medium
    } else {
        CognitiveLoad::Low
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthsAndWeaknesses {
    pub strengths: Vec<Category>,
    pub weaknesses: Vec<Category>,
}

/// Categories at or above 75 are strengths; below 60 are weaknesses.
pub fn strengths_and_weaknesses(result: &SessionResult) -> StrengthsAndWeaknesses {
    let mut out = StrengthsAndWeaknesses::default();
    for score in &result.category_scores {
        if score.percentage >= 75.0 {
            out.strengths.push(score.category);
        } else if score.percentage < 60.0 {
            out.weaknesses.push(score.category);
        }
    }
    out
}

/// Per-category change between two sessions, for categories present in both.
pub fn category_improvement(first: &SessionResult, latest: &SessionResult) -> BTreeMap<Category, f64> {
    latest
        .category_scores
        .iter()
        .filter_map(|score| {
            first
                .category_percentage(score.category)
                .map(|before| (score.category, score.percentage - before))
        })
        .collect()
}

/// Mean overall score of the last 10 sessions against everything before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPerformance {
    pub recent_mean: f64,
    pub historical_mean: f64,
    /// `recent − historical`, 0 when there is no older history.
    pub change: f64,
}

pub fn recent_performance(history: &[SessionResult]) -> RecentPerformance {
    let scores: Vec<f64> = history.iter().map(|r| r.overall).collect();
    let split = scores.len().saturating_sub(RECENT_WINDOW);
    let (historical, recent) = scores.split_at(split);
    let recent_mean = mean(recent);
    let historical_mean = mean(historical);
    RecentPerformance {
        recent_mean,
        historical_mean,
        change: if historical.is_empty() {
            0.0
        } else {
            recent_mean - historical_mean
        },
    }
}

/// Mean score per category across the whole history.
pub fn category_averages(history: &[SessionResult]) -> BTreeMap<Category, f64> {
    let mut buckets: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
    for result in history {
        for score in &result.category_scores {
            buckets.entry(score.category).or_default().push(score.percentage);
        }
    }
    buckets.into_iter().map(|(c, v)| (c, mean(&v))).collect()
}

/// The recommendation and the evidence behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRecommendation {
    pub difficulty: Difficulty,
    /// Mean score the recommendation is based on, if any history matched.
    pub based_on: Option<f64>,
    pub sample_size: usize,
}

/// Recommend the next tier from the last three relevant sessions.
///
/// With a category, only sessions that scored that category count and its
/// percentage is used; otherwise the overall score is. No matching history
/// recommends medium.
pub fn recommend_difficulty(
    history: &[SessionResult],
    category: Option<Category>,
) -> DifficultyRecommendation {
    let scores: Vec<f64> = history
        .iter()
        .filter_map(|r| match category {
            Some(c) => r.category_percentage(c),
            None => Some(r.overall),
        })
        .collect();

    if scores.is_empty() {
        return DifficultyRecommendation {
            difficulty: Difficulty::Medium,
            based_on: None,
            sample_size: 0,
        };
    }

    let recent = &scores[scores.len().saturating_sub(RECOMMENDATION_WINDOW)..];
    let avg = mean(recent);
    let difficulty = if avg >= 85.0 {
        Difficulty::Hard
    } else if avg >= 65.0 {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    };
    tracing::debug!(%difficulty, avg, samples = recent.len(), "recommended difficulty");

    DifficultyRecommendation {
        difficulty,
        based_on: Some(avg),
        sample_size: recent.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CategoryScore;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn session(day: i64, overall: f64, minutes: u64) -> SessionResult {
        SessionResult {
            id: Uuid::new_v4(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap() + Duration::days(day),
            difficulty: Difficulty::Medium,
            category_scores: vec![CategoryScore {
                category: Category::WorkingMemory,
                correct: 0,
                attempted: 0,
                percentage: overall,
            }],
            overall,
            elapsed_ms: minutes * 60_000,
            answers: vec![],
            source: None,
        }
    }

    #[test]
    fn analysis_needs_two_sessions() {
        assert!(progress_analysis(&[]).is_none());
        assert!(progress_analysis(&[session(0, 50.0, 5)]).is_none());
    }

    #[test]
    fn analysis_of_rising_scores() {
        let history = vec![session(0, 50.0, 5), session(1, 60.0, 5), session(2, 70.0, 5)];
        let a = progress_analysis(&history).unwrap();
        assert_eq!(a.latest, 70.0);
        assert_eq!(a.mean, 60.0);
        assert_eq!(a.improvement, 20.0);
        assert!((a.slope_per_day - 10.0).abs() < 1e-9);
        // population sd of 50/60/70 is 8.165
        assert!((a.consistency - 83.67).abs() < 0.01);
        assert_eq!(a.direction, Direction::Improving);
    }

    #[test]
    fn same_day_sessions_are_stable() {
        let history = vec![session(0, 90.0, 5), session(0, 10.0, 5)];
        let a = progress_analysis(&history).unwrap();
        assert_eq!(a.slope_per_day, 0.0);
        assert_eq!(a.direction, Direction::Stable);
        assert_eq!(a.consistency, 20.0);
    }

    #[test]
    fn trend_by_halves() {
        let up = vec![session(0, 50.0, 5), session(1, 52.0, 5), session(2, 60.0, 5), session(3, 62.0, 5)];
        assert_eq!(trend(&up), Direction::Improving);
        let flat = vec![session(0, 50.0, 5), session(1, 54.0, 5)];
        assert_eq!(trend(&flat), Direction::Stable);
        let down = vec![session(0, 80.0, 5), session(1, 60.0, 5), session(2, 70.0, 5)];
        assert_eq!(trend(&down), Direction::Declining);
        assert_eq!(trend(&up[..1]), Direction::Stable);
    }

    #[test]
    fn load_levels() {
        assert_eq!(cognitive_load(&[session(0, 50.0, 20)]), CognitiveLoad::High);
        assert_eq!(cognitive_load(&[session(0, 65.0, 12)]), CognitiveLoad::Medium);
        assert_eq!(cognitive_load(&[session(0, 50.0, 5)]), CognitiveLoad::Low);
        assert_eq!(cognitive_load(&[]), CognitiveLoad::Low);
    }

    #[test]
    fn strengths_and_weaknesses_thresholds() {
        let mut r = session(0, 0.0, 5);
        r.category_scores = vec![
            CategoryScore { category: Category::WorkingMemory, correct: 3, attempted: 4, percentage: 75.0 },
            CategoryScore { category: Category::Attention, correct: 2, attempted: 3, percentage: 66.7 },
            CategoryScore { category: Category::VisualMemory, correct: 1, attempted: 2, percentage: 50.0 },
        ];
        let sw = strengths_and_weaknesses(&r);
        assert_eq!(sw.strengths, vec![Category::WorkingMemory]);
        assert_eq!(sw.weaknesses, vec![Category::VisualMemory]);
    }

    #[test]
    fn improvement_only_for_shared_categories() {
        let first = session(0, 40.0, 5);
        let mut latest = session(3, 70.0, 5);
        latest.category_scores.push(CategoryScore {
            category: Category::Attention,
            correct: 1,
            attempted: 1,
            percentage: 100.0,
        });
        let delta = category_improvement(&first, &latest);
        assert_eq!(delta.len(), 1);
        assert_eq!(delta[&Category::WorkingMemory], 30.0);
    }

    #[test]
    fn recommendation_uses_last_three() {
        let none = recommend_difficulty(&[], None);
        assert_eq!(none.difficulty, Difficulty::Medium);
        assert_eq!(none.sample_size, 0);

        let history = vec![
            session(0, 10.0, 5),
            session(1, 90.0, 5),
            session(2, 85.0, 5),
            session(3, 88.0, 5),
        ];
        let rec = recommend_difficulty(&history, None);
        assert_eq!(rec.difficulty, Difficulty::Hard);
        assert_eq!(rec.sample_size, 3);

        let mid = vec![session(0, 70.0, 5), session(1, 66.0, 5)];
        assert_eq!(recommend_difficulty(&mid, None).difficulty, Difficulty::Medium);
        let low = vec![session(0, 40.0, 5)];
        assert_eq!(recommend_difficulty(&low, None).difficulty, Difficulty::Easy);
    }

    #[test]
    fn recommendation_for_missing_category_is_medium() {
        let history = vec![session(0, 95.0, 5)];
        let rec = recommend_difficulty(&history, Some(Category::Attention));
        assert_eq!(rec.difficulty, Difficulty::Medium);
        assert_eq!(
            recommend_difficulty(&history, Some(Category::WorkingMemory)).difficulty,
            Difficulty::Hard
        );
    }

    #[test]
    fn recent_against_historical() {
        let mut history: Vec<SessionResult> = (0..2).map(|d| session(d, 40.0, 5)).collect();
        history.extend((2..12).map(|d| session(d, 60.0, 5)));
        let p = recent_performance(&history);
        assert_eq!(p.recent_mean, 60.0);
        assert_eq!(p.historical_mean, 40.0);
        assert_eq!(p.change, 20.0);

        let short = recent_performance(&history[..3]);
        assert_eq!(short.change, 0.0);
    }

    #[test]
    fn averages_per_category() {
        let history = vec![session(0, 40.0, 5), session(1, 80.0, 5)];
        assert_eq!(category_averages(&history)[&Category::WorkingMemory], 60.0);
    }
}
