//! Mini-game rules and scoring.
//!
//! Each game is a set of pure functions: tier settings, round generation
//! from an injected RNG, and scoring of the player's responses. Points are
//! scaled by [`Difficulty::game_multiplier`] and rounded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Difficulty;

pub mod arena;
pub mod dual_task;
pub mod matching;
pub mod nback;
pub mod number_sequence;
pub mod pattern_recall;
pub mod speed_sort;
pub mod word_match;

/// The arena games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Game {
    NBack,
    DualTask,
    SpeedSort,
    WordMatch,
    NumberSequence,
    PatternRecall,
    Matching,
}

impl Game {
    pub const ALL: [Game; 7] = [
        Game::NBack,
        Game::DualTask,
        Game::SpeedSort,
        Game::WordMatch,
        Game::NumberSequence,
        Game::PatternRecall,
        Game::Matching,
    ];
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Game::NBack => "nback",
            Game::DualTask => "dual_task",
            Game::SpeedSort => "speed_sort",
            Game::WordMatch => "word_match",
            Game::NumberSequence => "number_sequence",
            Game::PatternRecall => "pattern_recall",
            Game::Matching => "matching",
        };
        f.write_str(s)
    }
}

impl FromStr for Game {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "nback" | "n_back" => Ok(Game::NBack),
            "dual_task" | "dual" => Ok(Game::DualTask),
            "speed_sort" | "speed_sorting" => Ok(Game::SpeedSort),
            "word_match" | "word_image" => Ok(Game::WordMatch),
            "number_sequence" | "numbers" => Ok(Game::NumberSequence),
            "pattern_recall" | "pattern" => Ok(Game::PatternRecall),
            "matching" | "memory_matching" => Ok(Game::Matching),
            other => Err(format!("unknown game: {other}")),
        }
    }
}

/// Apply the tier multiplier to raw points and round to a whole score.
pub fn scale_points(points: f64, difficulty: Difficulty) -> u32 {
    (points * difficulty.game_multiplier()).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_rounds_half_up() {
        assert_eq!(scale_points(15.0, Difficulty::Easy), 15);
        assert_eq!(scale_points(15.0, Difficulty::Medium), 18);
        assert_eq!(scale_points(15.0, Difficulty::Hard), 23);
        assert_eq!(scale_points(-4.0, Difficulty::Hard), 0);
    }

    #[test]
    fn game_names_parse() {
        for game in Game::ALL {
            assert_eq!(game.to_string().parse::<Game>().unwrap(), game);
        }
        assert_eq!("n-back".parse::<Game>().unwrap(), Game::NBack);
        assert!("chess".parse::<Game>().is_err());
    }
}
