//! Number sequence: watch a run of numbers, then type it back.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

pub const ROUNDS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSequenceSettings {
    pub length: usize,
    pub range: u32,
    pub time_secs: u32,
    /// Display time per number.
    pub speed_ms: u64,
}

impl NumberSequenceSettings {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (length, range, time_secs, speed_ms) = match difficulty {
            Difficulty::Easy => (4, 10, 15, 1000),
            Difficulty::Medium => (6, 50, 12, 800),
            Difficulty::Hard => (8, 100, 10, 600),
        };
        Self {
            length,
            range,
            time_secs,
            speed_ms,
        }
    }

    /// Sequence length for a 1-based round: grows by one every two rounds.
    pub fn length_for_round(&self, round: u32) -> usize {
        self.length + (round.saturating_sub(1) / 2) as usize
    }
}

pub fn generate_round<R: Rng>(settings: &NumberSequenceSettings, round: u32, rng: &mut R) -> Vec<u32> {
    (0..settings.length_for_round(round))
        .map(|_| rng.gen_range(1..=settings.range))
        .collect()
}

/// Percentage of positions where the entered number matches.
pub fn positional_accuracy(expected: &[u32], entered: &[u32]) -> f64 {
    if expected.is_empty() {
        return 0.0;
    }
    let correct = expected
        .iter()
        .zip(entered)
        .filter(|(want, got)| want == got)
        .count();
    correct as f64 / expected.len() as f64 * 100.0
}

fn band_points(difficulty: Difficulty) -> [u32; 4] {
    match difficulty {
        Difficulty::Easy => [20, 15, 10, 5],
        Difficulty::Medium => [30, 22, 15, 8],
        Difficulty::Hard => [40, 30, 20, 10],
    }
}

/// Round points: accuracy band (100 / ≥75 / ≥50 / ≥25) plus half the seconds left.
pub fn round_points(accuracy: f64, time_left_secs: u32, difficulty: Difficulty) -> u32 {
    let [perfect, high, mid, low] = band_points(difficulty);
    let base = if accuracy >= 100.0 {
        perfect
    } else if accuracy >= 75.0 {
        high
    } else if accuracy >= 50.0 {
        mid
    } else if accuracy >= 25.0 {
        low
    } else {
        0
    };
    base + time_left_secs / 2
}
