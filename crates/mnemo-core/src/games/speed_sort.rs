//! Speed sorting: drop each item into its category before the window closes.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scale_points;
use crate::model::Difficulty;

pub const ROUNDS: u32 = 15;
pub const INITIAL_WINDOW_MS: u64 = 3000;
const MIN_WINDOW_MS: u64 = 1000;
const WINDOW_STEP_MS: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    pub content: &'static str,
    pub category: &'static str,
}

const fn item(content: &'static str, category: &'static str) -> SortItem {
    SortItem { content, category }
}

const EASY_ITEMS: [SortItem; 9] = [
    item("Red", "Colors"),
    item("Blue", "Colors"),
    item("Green", "Colors"),
    item("Dog", "Animals"),
    item("Cat", "Animals"),
    item("Bird", "Animals"),
    item("Apple", "Food"),
    item("Banana", "Food"),
    item("Pizza", "Food"),
];

const MEDIUM_ITEMS: [SortItem; 12] = [
    item("Happy", "Emotions"),
    item("Sad", "Emotions"),
    item("Angry", "Emotions"),
    item("Car", "Vehicles"),
    item("Plane", "Vehicles"),
    item("Bike", "Vehicles"),
    item("Tree", "Nature"),
    item("Mountain", "Nature"),
    item("Ocean", "Nature"),
    item("Phone", "Technology"),
    item("Computer", "Technology"),
    item("Robot", "Technology"),
];

const HARD_ITEMS: [SortItem; 15] = [
    item("Freedom", "Abstract Concepts"),
    item("Justice", "Abstract Concepts"),
    item("Love", "Abstract Concepts"),
    item("Doctor", "Professions"),
    item("Teacher", "Professions"),
    item("Engineer", "Professions"),
    item("Physics", "Sciences"),
    item("Chemistry", "Sciences"),
    item("Biology", "Sciences"),
    item("Painting", "Arts"),
    item("Music", "Arts"),
    item("Dance", "Arts"),
    item("Soccer", "Sports"),
    item("Basketball", "Sports"),
    item("Tennis", "Sports"),
];

/// Sorting categories for the tier.
pub fn categories(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Easy => &["Colors", "Animals", "Food"],
        Difficulty::Medium => &["Emotions", "Vehicles", "Nature", "Technology"],
        Difficulty::Hard => &["Abstract Concepts", "Professions", "Sciences", "Arts", "Sports"],
    }
}

/// Items to sort for the tier.
pub fn items(difficulty: Difficulty) -> &'static [SortItem] {
    match difficulty {
        Difficulty::Easy => &EASY_ITEMS,
        Difficulty::Medium => &MEDIUM_ITEMS,
        Difficulty::Hard => &HARD_ITEMS,
    }
}

pub fn next_item<R: Rng>(difficulty: Difficulty, rng: &mut R) -> SortItem {
    let pool = items(difficulty);
    pool.choose(rng).copied().unwrap_or(pool[0])
}

/// Points for a pick made `reaction_ms` into a `window_ms` window.
///
/// Timeouts and wrong picks score nothing.
pub fn pick_points(correct: bool, reaction_ms: u64, window_ms: u64, difficulty: Difficulty) -> u32 {
    if !correct || reaction_ms >= window_ms {
        return 0;
    }
    let fraction = reaction_ms as f64 / window_ms as f64;
    let bonus = if fraction < 0.3 {
        15.0
    } else if fraction < 0.5 {
        10.0
    } else if fraction < 0.7 {
        5.0
    } else {
        0.0
    };
    scale_points(10.0 + bonus, difficulty)
}

/// Running state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedSortGame {
    pub difficulty: Difficulty,
    pub round: u32,
    pub window_ms: u64,
    pub score: u32,
    pub reaction_times: Vec<u64>,
}

impl SpeedSortGame {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            round: 1,
            window_ms: INITIAL_WINDOW_MS,
            score: 0,
            reaction_times: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.round > ROUNDS
    }

    /// Record a pick (or a timeout with `picked = None`) and advance a round.
    ///
    /// Returns the points awarded.
    pub fn pick(&mut self, item: &SortItem, picked: Option<&str>, reaction_ms: u64) -> u32 {
        let correct = picked == Some(item.category) && reaction_ms < self.window_ms;
        let points = pick_points(correct, reaction_ms, self.window_ms, self.difficulty);
        if picked.is_some() {
            self.reaction_times.push(reaction_ms);
        }
        self.score += points;
        if correct && self.round % 3 == 0 {
            self.window_ms = self.window_ms.saturating_sub(WINDOW_STEP_MS).max(MIN_WINDOW_MS);
        }
        self.round += 1;
        points
    }

    pub fn mean_reaction_ms(&self) -> f64 {
        if self.reaction_times.is_empty() {
            return 0.0;
        }
        self.reaction_times.iter().sum::<u64>() as f64 / self.reaction_times.len() as f64
    }
}
