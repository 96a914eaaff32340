//! Pattern recall: memorize the lit cells of a grid and reproduce them.

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scale_points;
use crate::model::Difficulty;

pub const ROUNDS: u32 = 5;
const PERFECT_BONUS: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecallSettings {
    pub grid_size: usize,
    pub lit_cells: usize,
    pub show_ms: u64,
    pub recall_ms: u64,
}

impl PatternRecallSettings {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (grid_size, lit_cells, show_ms, recall_ms) = match difficulty {
            Difficulty::Easy => (3, 3, 5000, 10_000),
            Difficulty::Medium => (4, 6, 4000, 8000),
            Difficulty::Hard => (5, 10, 3000, 6000),
        };
        Self {
            grid_size,
            lit_cells,
            show_ms,
            recall_ms,
        }
    }
}

/// A square grid of on/off cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPattern {
    pub size: usize,
    pub cells: Vec<bool>,
}

impl GridPattern {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// `lit` distinct cells switched on at random.
    pub fn random<R: Rng>(size: usize, lit: usize, rng: &mut R) -> Self {
        let total = size * size;
        let mut pattern = Self::empty(size);
        for i in index::sample(rng, total, lit.min(total)) {
            pattern.cells[i] = true;
        }
        pattern
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        if row < self.size && col < self.size {
            let i = row * self.size + col;
            self.cells[i] = !self.cells[i];
        }
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// `(row, col)` of each lit cell.
    pub fn lit_positions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &on)| on)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }
}

/// Percentage of cells (lit or not) the player reproduced correctly.
pub fn cell_accuracy(pattern: &GridPattern, recalled: &GridPattern) -> f64 {
    if pattern.cells.is_empty() {
        return 0.0;
    }
    let matching = pattern
        .cells
        .iter()
        .enumerate()
        .filter(|&(i, &want)| recalled.cells.get(i).copied().unwrap_or(false) == want)
        .count();
    matching as f64 / pattern.cells.len() as f64 * 100.0
}

/// `round(accuracy)`, +20 when perfect, scaled by tier.
pub fn round_points(accuracy: f64, difficulty: Difficulty) -> u32 {
    let mut points = accuracy.round();
    if accuracy >= 100.0 {
        points += PERFECT_BONUS;
    }
    scale_points(points, difficulty)
}
