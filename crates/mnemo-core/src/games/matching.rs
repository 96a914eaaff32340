//! Memory matching: flip cards two at a time to find every pair.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

const SYMBOLS: [&str; 12] = [
    "target", "star", "fire", "bolt", "palette", "tent", "mask", "rocket", "guitar", "dice",
    "bowling", "gamepad",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingSettings {
    pub pairs: usize,
    pub time_secs: u32,
    pub grid_cols: usize,
}

impl MatchingSettings {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (pairs, time_secs, grid_cols) = match difficulty {
            Difficulty::Easy => (6, 90, 4),
            Difficulty::Medium => (8, 75, 4),
            Difficulty::Hard => (12, 60, 6),
        };
        Self {
            pairs,
            time_secs,
            grid_cols,
        }
    }

    fn completion_points(&self) -> i64 {
        match self.pairs {
            p if p >= 12 => 60,
            p if p >= 8 => 45,
            _ => 30,
        }
    }
}

/// Two copies of each symbol in play, shuffled.
pub fn deal<R: Rng>(settings: &MatchingSettings, rng: &mut R) -> Vec<&'static str> {
    let symbols = &SYMBOLS[..settings.pairs.min(SYMBOLS.len())];
    let mut deck: Vec<&'static str> = symbols.iter().chain(symbols).copied().collect();
    deck.shuffle(rng);
    deck
}

/// Round points.
///
/// Finding every pair earns a completion score plus one point per five
/// seconds left, minus one per two moves beyond `2 × pairs`. Otherwise the
/// round earns one point per 5 % of pairs found. Never negative.
pub fn round_points(settings: &MatchingSettings, matches: usize, moves: u32, time_left_secs: u32) -> u32 {
    let pairs = settings.pairs.max(1);
    let points = if matches >= pairs {
        let excess_moves = (moves as i64 - 2 * pairs as i64).max(0);
        settings.completion_points() + (time_left_secs / 5) as i64 - excess_moves / 2
    } else {
        let match_percentage = matches as f64 / pairs as f64 * 100.0;
        (match_percentage / 5.0).floor() as i64
    };
    points.max(0) as u32
}
