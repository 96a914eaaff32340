//! N-back: say whether the current stimulus matches the one `n` steps back.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scale_points;
use crate::model::Difficulty;

pub const LETTERS: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

/// Probability of deliberately repeating the item `n` back.
const REPEAT_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StimulusKind {
    Letters,
    /// Cells of a 3×3 grid, written `"x,y"`.
    Positions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NBackSettings {
    pub n: usize,
    pub length: usize,
    pub show_ms: u64,
    pub stimuli: StimulusKind,
}

impl NBackSettings {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                n: 1,
                length: 15,
                show_ms: 2000,
                stimuli: StimulusKind::Letters,
            },
            Difficulty::Medium => Self {
                n: 2,
                length: 20,
                show_ms: 1500,
                stimuli: StimulusKind::Letters,
            },
            Difficulty::Hard => Self {
                n: 3,
                length: 25,
                show_ms: 1000,
                stimuli: StimulusKind::Positions,
            },
        }
    }
}

fn random_stimulus<R: Rng>(kind: StimulusKind, rng: &mut R) -> String {
    match kind {
        StimulusKind::Letters => LETTERS[rng.gen_range(0..LETTERS.len())].to_string(),
        StimulusKind::Positions => format!("{},{}", rng.gen_range(0..3), rng.gen_range(0..3)),
    }
}

/// Build a stimulus sequence, seeding matches with a fixed probability.
pub fn generate_sequence<R: Rng>(settings: &NBackSettings, rng: &mut R) -> Vec<String> {
    let mut sequence: Vec<String> = Vec::with_capacity(settings.length);
    for i in 0..settings.length {
        if i >= settings.n && rng.gen_bool(REPEAT_PROBABILITY) {
            let repeated = sequence[i - settings.n].clone();
            sequence.push(repeated);
        } else {
            sequence.push(random_stimulus(settings.stimuli, rng));
        }
    }
    sequence
}

/// Whether position `i` repeats the stimulus `n` steps back.
pub fn is_match(sequence: &[String], i: usize, n: usize) -> bool {
    i >= n && i < sequence.len() && sequence[i] == sequence[i - n]
}

/// One "match" / "no match" answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NBackResponse {
    pub index: usize,
    pub claimed_match: bool,
    pub reaction_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NBackScore {
    pub correct: usize,
    pub responses: usize,
    pub accuracy: f64,
    pub mean_reaction_ms: f64,
    pub points: u32,
}

/// Score a run. Responses before position `n` or past the end are ignored.
pub fn score(
    sequence: &[String],
    n: usize,
    responses: &[NBackResponse],
    difficulty: Difficulty,
) -> NBackScore {
    let counted: Vec<&NBackResponse> = responses
        .iter()
        .filter(|r| r.index >= n && r.index < sequence.len())
        .collect();

    let correct = counted
        .iter()
        .filter(|r| r.claimed_match == is_match(sequence, r.index, n))
        .count();
    let accuracy = if counted.is_empty() {
        0.0
    } else {
        correct as f64 / counted.len() as f64 * 100.0
    };
    let mean_reaction_ms = if counted.is_empty() {
        0.0
    } else {
        counted.iter().map(|r| r.reaction_ms as f64).sum::<f64>() / counted.len() as f64
    };

    let mut points = accuracy.round();
    if !counted.is_empty() && mean_reaction_ms < 1000.0 {
        points += 10.0;
    }

    NBackScore {
        correct,
        responses: counted.len(),
        accuracy,
        mean_reaction_ms,
        points: scale_points(points, difficulty),
    }
}
