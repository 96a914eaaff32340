//! Word–image match: choose the word that best describes a picture.
//!
//! Answers are graded with a small semantic-accuracy heuristic built on
//! hand-written relation and opposite tables.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::scale_points;
use crate::model::Difficulty;

pub const ROUNDS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchItem {
    pub image: &'static str,
    pub correct_words: [&'static str; 3],
    pub options: [&'static str; 4],
    pub explanation: &'static str,
}

const EASY: [MatchItem; 4] = [
    MatchItem {
        image: "Tree",
        correct_words: ["green", "nature", "wood"],
        options: ["green", "metal", "water", "fire"],
        explanation: "Trees are green, part of nature, and made of wood.",
    },
    MatchItem {
        image: "Sun",
        correct_words: ["bright", "hot", "yellow"],
        options: ["bright", "cold", "dark", "blue"],
        explanation: "The sun is bright, hot, and appears yellow.",
    },
    MatchItem {
        image: "Ocean",
        correct_words: ["blue", "water", "deep"],
        options: ["blue", "red", "dry", "small"],
        explanation: "Oceans are blue, made of water, and very deep.",
    },
    MatchItem {
        image: "Fire",
        correct_words: ["hot", "red", "dangerous"],
        options: ["hot", "cold", "safe", "blue"],
        explanation: "Fire is hot, often red, and can be dangerous.",
    },
];

const MEDIUM: [MatchItem; 4] = [
    MatchItem {
        image: "Brain",
        correct_words: ["thinking", "smart", "complex"],
        options: ["thinking", "simple", "empty", "slow"],
        explanation: "The brain is associated with thinking, intelligence, and complexity.",
    },
    MatchItem {
        image: "Heart",
        correct_words: ["love", "emotion", "vital"],
        options: ["love", "hate", "unimportant", "cold"],
        explanation: "Hearts symbolize love, emotion, and are vital for life.",
    },
    MatchItem {
        image: "Mountain",
        correct_words: ["tall", "rocky", "majestic"],
        options: ["tall", "flat", "tiny", "liquid"],
        explanation: "Mountains are tall, rocky, and often considered majestic.",
    },
    MatchItem {
        image: "Book",
        correct_words: ["knowledge", "learning", "wisdom"],
        options: ["knowledge", "ignorance", "confusion", "emptiness"],
        explanation: "Books represent knowledge, learning, and wisdom.",
    },
];

const HARD: [MatchItem; 4] = [
    MatchItem {
        image: "Clock",
        correct_words: ["temporal", "cyclical", "precise"],
        options: ["temporal", "spatial", "chaotic", "imprecise"],
        explanation: "Clocks relate to time, work in cycles, and measure precisely.",
    },
    MatchItem {
        image: "Key",
        correct_words: ["access", "solution", "unlock"],
        options: ["access", "barrier", "problem", "lock"],
        explanation: "Keys provide access, represent solutions, and unlock things.",
    },
    MatchItem {
        image: "Bridge",
        correct_words: ["connection", "transition", "spanning"],
        options: ["connection", "separation", "stagnation", "blocking"],
        explanation: "Bridges create connections, enable transitions, and span distances.",
    },
    MatchItem {
        image: "Lighthouse",
        correct_words: ["guidance", "beacon", "safety"],
        options: ["guidance", "confusion", "danger", "darkness"],
        explanation: "Lighthouses provide guidance, serve as beacons, and ensure safety.",
    },
];

const RELATED: [(&str, [&str; 4]); 8] = [
    ("green", ["nature", "plant", "leaf", "forest"]),
    ("blue", ["water", "sky", "ocean", "sea"]),
    ("hot", ["warm", "fire", "sun", "heat"]),
    ("bright", ["light", "shiny", "luminous", "radiant"]),
    ("thinking", ["mind", "brain", "thought", "cognitive"]),
    ("love", ["heart", "emotion", "feeling", "affection"]),
    ("tall", ["high", "big", "large", "elevated"]),
    ("knowledge", ["wisdom", "learning", "education", "smart"]),
];

const OPPOSITES: [(&str, &[&str]); 4] = [
    ("hot", &["cold", "cool", "freezing"]),
    ("bright", &["dark", "dim", "black"]),
    ("big", &["small", "tiny", "little"]),
    ("love", &["hate", "dislike"]),
];

pub fn items(difficulty: Difficulty) -> &'static [MatchItem] {
    match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

pub fn next_item<R: Rng>(difficulty: Difficulty, rng: &mut R) -> MatchItem {
    let pool = items(difficulty);
    pool.choose(rng).copied().unwrap_or(pool[0])
}

/// Semantic accuracy of `word` against an item's correct words:
/// 100 exact, 75 related, 20 opposite, 40 otherwise.
pub fn semantic_accuracy(word: &str, correct_words: &[&str]) -> u32 {
    let word = word.trim().to_lowercase();
    if correct_words.contains(&word.as_str()) {
        return 100;
    }
    let related = RELATED
        .iter()
        .filter(|(key, _)| correct_words.contains(key))
        .any(|(_, words)| words.contains(&word.as_str()));
    if related {
        return 75;
    }
    let opposite = OPPOSITES
        .iter()
        .filter(|(key, _)| correct_words.contains(key))
        .any(|(_, words)| words.contains(&word.as_str()));
    if opposite {
        return 20;
    }
    40
}

/// Points for a given accuracy, scaled by tier.
pub fn points_for_accuracy(accuracy: u32, difficulty: Difficulty) -> u32 {
    let points = match accuracy {
        90.. => 15.0,
        70..=89 => 12.0,
        50..=69 => 8.0,
        30..=49 => 4.0,
        _ => 1.0,
    };
    scale_points(points, difficulty)
}
