//! Dual task: mental arithmetic while distractions play.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scale_points;
use crate::model::Difficulty;

pub const QUESTIONS: usize = 10;
const POINTS_PER_ANSWER: f64 = 10.0;
const SPEED_BONUS: f64 = 5.0;
const SPEED_BONUS_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistractionLevel {
    Low,
    Medium,
    High,
}

impl DistractionLevel {
    /// Messages shown while the player is solving.
    pub fn distractions(self) -> &'static [&'static str] {
        match self {
            DistractionLevel::Low => &["Soft music playing...", "Ocean waves...", "Wind sounds..."],
            DistractionLevel::Medium => &["Pop music playing...", "Traffic noise...", "Crowd chatter..."],
            DistractionLevel::High => &["Loud music...", "Sirens...", "TV noise...", "Carnival sounds..."],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualTaskSettings {
    pub time_limit_ms: u64,
    pub distraction: DistractionLevel,
}

impl DualTaskSettings {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (time_limit_ms, distraction) = match difficulty {
            Difficulty::Easy => (15_000, DistractionLevel::Low),
            Difficulty::Medium => (10_000, DistractionLevel::Medium),
            Difficulty::Hard => (7_000, DistractionLevel::High),
        };
        Self {
            time_limit_ms,
            distraction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathQuestion {
    pub text: String,
    pub answer: i64,
}

/// Generate one arithmetic question for the tier.
pub fn generate_question<R: Rng>(difficulty: Difficulty, rng: &mut R) -> MathQuestion {
    let (text, answer) = match difficulty {
        Difficulty::Easy => {
            let a: i64 = rng.gen_range(1..=20);
            let b: i64 = rng.gen_range(1..=20);
            if rng.gen_bool(0.5) {
                (format!("{a} + {b}"), a + b)
            } else {
                let (larger, smaller) = (a.max(b), a.min(b));
                (format!("{larger} - {smaller}"), larger - smaller)
            }
        }
        Difficulty::Medium => {
            let c: i64 = rng.gen_range(2..=13);
            let d: i64 = rng.gen_range(2..=13);
            let e: i64 = rng.gen_range(1..=10);
            match rng.gen_range(0..3) {
                0 => (format!("{c} × {d}"), c * d),
                1 => (format!("{} ÷ {c}", c * d), d),
                _ => (format!("({c} + {d}) × {e}"), (c + d) * e),
            }
        }
        Difficulty::Hard => {
            let f: i64 = rng.gen_range(5..=19);
            let g: i64 = rng.gen_range(5..=19);
            let h: i64 = rng.gen_range(2..=9);
            match rng.gen_range(0..3) {
                0 => {
                    let n: i64 = rng.gen_range(8..=19);
                    (format!("{n}²"), n * n)
                }
                1 => (format!("{f} × {g} - {h}²"), f * g - h * h),
                _ => (format!("{} ÷ 2 + {g}", f * 2), f + g),
            }
        }
    };
    MathQuestion { text, answer }
}

/// Pick a distraction message for the tier.
pub fn pick_distraction<R: Rng>(level: DistractionLevel, rng: &mut R) -> &'static str {
    level.distractions().choose(rng).copied().unwrap_or_default()
}

/// Points for one answer: 10, +5 when answered within 5 s, scaled by tier.
pub fn answer_points(correct: bool, reaction_ms: u64, difficulty: Difficulty) -> u32 {
    if !correct {
        return 0;
    }
    let mut points = POINTS_PER_ANSWER;
    if reaction_ms < SPEED_BONUS_MS {
        points += SPEED_BONUS;
    }
    scale_points(points, difficulty)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualTaskAnswer {
    pub given: Option<i64>,
    pub expected: i64,
    pub reaction_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualTaskScore {
    pub correct: usize,
    pub total_points: u32,
    /// `total / (questions × 10) × 100`, clamped to `[0, 100]`.
    pub accuracy: f64,
}

/// Score every answer, including the last one.
///
/// Accuracy is measured against the full round of [`QUESTIONS`], so an
/// abandoned game scores only what was answered.
pub fn score(answers: &[DualTaskAnswer], difficulty: Difficulty) -> DualTaskScore {
    let mut correct = 0;
    let mut total_points = 0;
    for a in answers {
        let ok = a.given == Some(a.expected);
        if ok {
            correct += 1;
        }
        total_points += answer_points(ok, a.reaction_ms, difficulty);
    }
    let accuracy = (total_points as f64 / (QUESTIONS as f64 * POINTS_PER_ANSWER) * 100.0).clamp(0.0, 100.0);
    DualTaskScore {
        correct,
        total_points,
        accuracy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Evaluate the question text independently of the generator.
    fn evaluate(text: &str) -> i64 {
        let t = text.replace('²', " ^2");
        let tokens: Vec<&str> = t.split_whitespace().collect();
        match tokens.as_slice() {
            [n, "^2"] => n.parse::<i64>().unwrap().pow(2),
            [a, "+", b] => a.parse::<i64>().unwrap() + b.parse::<i64>().unwrap(),
            [a, "-", b] => a.parse::<i64>().unwrap() - b.parse::<i64>().unwrap(),
            [a, "×", b] => a.parse::<i64>().unwrap() * b.parse::<i64>().unwrap(),
            [a, "÷", b] => a.parse::<i64>().unwrap() / b.parse::<i64>().unwrap(),
            [a, "×", b, "-", h, "^2"] => {
                a.parse::<i64>().unwrap() * b.parse::<i64>().unwrap() - h.parse::<i64>().unwrap().pow(2)
            }
            [a, "÷", "2", "+", g] => a.parse::<i64>().unwrap() / 2 + g.parse::<i64>().unwrap(),
            [c, "+", d, "×", e] => {
                let c: i64 = c.trim_start_matches('(').parse().unwrap();
                let d: i64 = d.trim_end_matches(')').parse().unwrap();
                (c + d) * e.parse::<i64>().unwrap()
            }
            other => panic!("unexpected question shape: {other:?}"),
        }
    }

    #[test]
    fn generated_answers_match_question_text() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for difficulty in Difficulty::ALL {
            for _ in 0..100 {
                let q = generate_question(difficulty, &mut rng);
                assert_eq!(evaluate(&q.text), q.answer, "{}", q.text);
            }
        }
    }

    #[test]
    fn easy_subtraction_never_negative() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..200 {
            assert!(generate_question(Difficulty::Easy, &mut rng).answer >= 0);
        }
    }

    #[test]
    fn answer_points_with_speed_bonus() {
        assert_eq!(answer_points(true, 3000, Difficulty::Easy), 15);
        assert_eq!(answer_points(true, 6000, Difficulty::Easy), 10);
        assert_eq!(answer_points(true, 3000, Difficulty::Hard), 23);
        assert_eq!(answer_points(false, 100, Difficulty::Hard), 0);
    }

    #[test]
    fn last_answer_counts_toward_total() {
        let answers: Vec<DualTaskAnswer> = (0..QUESTIONS)
            .map(|i| DualTaskAnswer {
                given: Some(i as i64),
                expected: i as i64,
                reaction_ms: 6000,
            })
            .collect();
        let result = score(&answers, Difficulty::Easy);
        assert_eq!(result.correct, QUESTIONS);
        assert_eq!(result.total_points, 100);
        assert_eq!(result.accuracy, 100.0);
    }

    #[test]
    fn partial_game_is_measured_against_full_round() {
        let answers = [DualTaskAnswer {
            given: Some(4),
            expected: 4,
            reaction_ms: 1000,
        }];
        let result = score(&answers, Difficulty::Easy);
        assert_eq!(result.correct, 1);
        assert_eq!(result.total_points, 15);
        assert_eq!(result.accuracy, 15.0);

        assert_eq!(score(&[], Difficulty::Easy).accuracy, 0.0);
    }

    #[test]
    fn accuracy_is_clamped_with_bonuses() {
        let answers = vec![
            DualTaskAnswer {
                given: Some(4),
                expected: 4,
                reaction_ms: 100,
            };
            QUESTIONS
        ];
        assert_eq!(score(&answers, Difficulty::Hard).accuracy, 100.0);
    }

    #[test]
    fn settings_and_distractions() {
        let hard = DualTaskSettings::for_difficulty(Difficulty::Hard);
        assert_eq!(hard.time_limit_ms, 7_000);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let msg = pick_distraction(hard.distraction, &mut rng);
        assert!(DistractionLevel::High.distractions().contains(&msg));
    }
}
