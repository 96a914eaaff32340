//! Randomized test-item generation.
//!
//! Every generator is parameterized by a [`Difficulty`] tier. The tier's
//! [`TierBounds`] are the contract: generated sequence lengths, word counts
//! and numeric values always fall inside them.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::games::pattern_recall::GridPattern;
use crate::model::{Category, Difficulty, Expected, ItemKind, TestItem};

/// Declared generation bounds for one difficulty tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierBounds {
    /// Allowed number-sequence lengths.
    pub sequence_len: RangeInclusive<usize>,
    /// Largest value a generated sequence element may take (smallest is 1).
    pub max_value: u32,
    /// Allowed word-list lengths.
    pub word_count: RangeInclusive<usize>,
}

impl TierBounds {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                sequence_len: 3..=5,
                max_value: 20,
                word_count: 3..=5,
            },
            Difficulty::Medium => Self {
                sequence_len: 5..=7,
                max_value: 100,
                word_count: 5..=7,
            },
            Difficulty::Hard => Self {
                sequence_len: 7..=9,
                max_value: 200,
                word_count: 7..=9,
            },
        }
    }

    /// Returns `true` if `values` respects this tier's sequence bounds.
    pub fn admits_sequence(&self, values: &[u32]) -> bool {
        self.sequence_len.contains(&values.len())
            && values.iter().all(|v| (1..=self.max_value).contains(v))
    }
}

/// (length, max value, time limit) variants for sequence items.
fn sequence_variants(difficulty: Difficulty) -> &'static [(usize, u32, u32)] {
    match difficulty {
        Difficulty::Easy => &[(4, 10, 15), (3, 20, 12), (5, 15, 18)],
        Difficulty::Medium => &[(6, 50, 12), (7, 30, 15), (5, 100, 10)],
        Difficulty::Hard => &[(8, 100, 10), (9, 50, 12), (7, 200, 8)],
    }
}

/// (word count, time limit) variants for word-recall items.
fn word_variants(difficulty: Difficulty) -> &'static [(usize, u32)] {
    match difficulty {
        Difficulty::Easy => &[(4, 8), (3, 10), (5, 12)],
        Difficulty::Medium => &[(6, 10), (7, 8), (5, 6)],
        Difficulty::Hard => &[(8, 8), (9, 6), (7, 5)],
    }
}

pub const WORD_BANK: [&str; 36] = [
    "apple", "book", "chair", "door", "elephant", "flower", "guitar", "house", "island", "jacket",
    "kitchen", "laptop", "mountain", "notebook", "ocean", "pencil", "queen", "rainbow", "sunset",
    "telescope", "umbrella", "violin", "window", "xylophone", "yellow", "zebra", "butterfly",
    "camera", "diamond", "engine", "forest", "garden", "horizon", "journey", "knowledge",
    "library",
];

const COLOURS: [&str; 6] = ["red", "blue", "green", "yellow", "purple", "orange"];

/// (pattern, continuation) puzzles per tier.
fn pattern_puzzles(difficulty: Difficulty) -> &'static [(&'static str, &'static str)] {
    match difficulty {
        Difficulty::Easy => &[("A-B-A-B-?", "A"), ("Red-Blue-Red-Blue-?", "Red"), ("1-2-1-2-?", "1")],
        Difficulty::Medium => &[("A-B-C-A-B-C-?", "A"), ("1-4-7-10-?", "13"), ("Mon-Wed-Fri-?", "Sun")],
        Difficulty::Hard => &[("2-6-18-54-?", "162"), ("A-C-F-J-?", "O"), ("1-1-2-3-5-8-?", "13")],
    }
}

/// Themed groups and the outsider that does not belong to them.
const ODD_ONE_OUT_GROUPS: [([&str; 5], &str); 4] = [
    (["cat", "dog", "bird", "horse", "rabbit"], "hammer"),
    (["apple", "banana", "cherry", "grape", "pear"], "bicycle"),
    (["red", "blue", "green", "yellow", "purple"], "seven"),
    (["piano", "violin", "guitar", "flute", "drum"], "carrot"),
];

/// Tier-specific word lists for the word-span test.
fn span_words(difficulty: Difficulty) -> &'static [&'static str; 8] {
    match difficulty {
        Difficulty::Easy => &["cat", "dog", "sun", "car", "book", "tree", "fish", "bird"],
        Difficulty::Medium => &[
            "elephant", "mountain", "keyboard", "butterfly", "telescope", "umbrella", "sandwich",
            "bicycle",
        ],
        Difficulty::Hard => &[
            "phenomenon", "architecture", "psychology", "mathematics", "philosophy", "technology",
            "environment", "communication",
        ],
    }
}

/// Backend-style tier table: span length, time limit, complexity.
fn span_config(difficulty: Difficulty) -> (usize, u32, usize) {
    match difficulty {
        Difficulty::Easy => (4, 10, 1),
        Difficulty::Medium => (6, 8, 2),
        Difficulty::Hard => (8, 6, 3),
    }
}

/// English ordinal for a 1-based position ("1st", "2nd", "11th", ...).
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Produces randomized test items.
pub struct ItemGenerator<R: Rng = ChaCha8Rng> {
    rng: R,
    counter: usize,
}

impl ItemGenerator<ChaCha8Rng> {
    /// Reproducible generator: the same seed yields the same items.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> ItemGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, counter: 0 }
    }

    fn next_id(&mut self, category: Category) -> String {
        self.counter += 1;
        format!("{}-{}", category.id_prefix(), self.counter)
    }

    /// Uniform random sequence of `len` values in `1..=max`.
    pub fn random_sequence(&mut self, len: usize, max: u32) -> Vec<u32> {
        (0..len).map(|_| self.rng.gen_range(1..=max)).collect()
    }

    /// `count` distinct words drawn from the word bank.
    pub fn random_words(&mut self, count: usize) -> Vec<String> {
        WORD_BANK
            .choose_multiple(&mut self.rng, count.min(WORD_BANK.len()))
            .map(|w| w.to_string())
            .collect()
    }

    /// Remember a number sequence and enter it in reverse order.
    pub fn generate_sequence_item(&mut self, difficulty: Difficulty) -> TestItem {
        let variants = sequence_variants(difficulty);
        let (len, max, time_limit) = variants[self.rng.gen_range(0..variants.len())];
        let sequence = self.random_sequence(len, max);
        let stimulus: Vec<String> = sequence.iter().map(u32::to_string).collect();
        let expected = stimulus.iter().rev().cloned().collect();

        TestItem {
            id: self.next_id(Category::WorkingMemory),
            category: Category::WorkingMemory,
            kind: ItemKind::Sequence,
            prompt: "Remember this sequence and enter it in reverse order:".into(),
            stimulus,
            options: Vec::new(),
            expected: Expected::Sequence(expected),
            difficulty,
            time_limit_secs: time_limit,
        }
    }

    /// Memorize a word list and recall the word at a random position.
    pub fn generate_word_item(&mut self, difficulty: Difficulty) -> TestItem {
        let variants = word_variants(difficulty);
        let (count, time_limit) = variants[self.rng.gen_range(0..variants.len())];
        let words = self.random_words(count);
        let position = self.rng.gen_range(0..words.len());
        let answer = words[position].clone();

        let extras: Vec<String> = WORD_BANK
            .iter()
            .filter(|w| !words.iter().any(|chosen| chosen == *w))
            .copied()
            .collect::<Vec<_>>()
            .choose_multiple(&mut self.rng, 2)
            .map(|w| w.to_string())
            .collect();
        let mut options: Vec<String> = words.iter().cloned().chain(extras).collect();
        options.shuffle(&mut self.rng);

        TestItem {
            id: self.next_id(Category::ShortTermMemory),
            category: Category::ShortTermMemory,
            kind: ItemKind::WordRecall,
            prompt: format!(
                "Memorize these words: {}. What was the {} word?",
                words.join(", "),
                ordinal(position + 1)
            ),
            stimulus: words,
            options,
            expected: Expected::Exact(answer),
            difficulty,
            time_limit_secs: time_limit,
        }
    }

    /// Quick arithmetic with four candidate answers.
    pub fn generate_math_item(&mut self, difficulty: Difficulty) -> TestItem {
        let (question, answer, mut options) = match difficulty {
            Difficulty::Easy => {
                let a: i64 = self.rng.gen_range(1..=20);
                let b: i64 = self.rng.gen_range(1..=20);
                let x = a + b;
                (format!("{a} + {b}"), x, vec![x, x + 1, x - 1, x + 2])
            }
            Difficulty::Medium => {
                let c: i64 = self.rng.gen_range(2..=13);
                let d: i64 = self.rng.gen_range(2..=13);
                let x = c * d;
                (format!("{c} × {d}"), x, vec![x, x + c, x - d, x + d])
            }
            Difficulty::Hard => {
                let e: i64 = self.rng.gen_range(5..=19);
                let f: i64 = self.rng.gen_range(2..=9);
                let x = e * e - f;
                (format!("{e}² - {f}"), x, vec![x, x + 5, x - 3, x + 8])
            }
        };
        // distractors can coincide with each other (e.g. `c == d`)
        let mut seen = HashSet::new();
        options.retain(|o| seen.insert(*o));
        let mut options: Vec<String> = options.iter().map(i64::to_string).collect();
        options.shuffle(&mut self.rng);

        TestItem {
            id: self.next_id(Category::ProcessingSpeed),
            category: Category::ProcessingSpeed,
            kind: ItemKind::Math,
            prompt: format!("Solve quickly: {question}"),
            stimulus: Vec::new(),
            options,
            expected: Expected::Exact(answer.to_string()),
            difficulty,
            time_limit_secs: 5,
        }
    }

    /// Continue a symbolic pattern.
    pub fn generate_pattern_item(&mut self, difficulty: Difficulty) -> TestItem {
        let (pattern, answer) = *pattern_puzzles(difficulty)
            .choose(&mut self.rng)
            .unwrap_or(&("1-2-1-2-?", "1"));
        let time_limit = match difficulty {
            Difficulty::Easy => 10,
            Difficulty::Medium => 8,
            Difficulty::Hard => 6,
        };

        TestItem {
            id: self.next_id(Category::ProcessingSpeed),
            category: Category::ProcessingSpeed,
            kind: ItemKind::Pattern,
            prompt: format!("What comes next? {pattern}"),
            stimulus: Vec::new(),
            options: Vec::new(),
            expected: Expected::Exact(answer.to_string()),
            difficulty,
            time_limit_secs: time_limit,
        }
    }

    /// Recall the colours that were shown, in order.
    pub fn generate_colour_item(&mut self, difficulty: Difficulty) -> TestItem {
        let count = match difficulty {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        };
        let shown: Vec<String> = COLOURS
            .choose_multiple(&mut self.rng, count)
            .map(|c| c.to_string())
            .collect();

        TestItem {
            id: self.next_id(Category::VisualMemory),
            category: Category::VisualMemory,
            kind: ItemKind::ColourRecall,
            prompt: "Which colours were shown? Enter them in the order they appeared.".into(),
            expected: Expected::Sequence(shown.clone()),
            stimulus: shown,
            options: COLOURS.iter().map(|c| c.to_string()).collect(),
            difficulty,
            time_limit_secs: 8,
        }
    }

    /// Find the item that does not belong to the group.
    pub fn generate_odd_one_out_item(&mut self, difficulty: Difficulty) -> TestItem {
        let distractor_count = match difficulty {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        };
        let (group, outsider) = ODD_ONE_OUT_GROUPS[self.rng.gen_range(0..ODD_ONE_OUT_GROUPS.len())];
        let mut options: Vec<String> = group
            .choose_multiple(&mut self.rng, distractor_count)
            .map(|w| w.to_string())
            .collect();
        options.push(outsider.to_string());
        options.shuffle(&mut self.rng);

        TestItem {
            id: self.next_id(Category::Attention),
            category: Category::Attention,
            kind: ItemKind::OddOneOut,
            prompt: format!("Find the odd one out: {}", options.join(", ")),
            stimulus: Vec::new(),
            options,
            expected: Expected::Exact(outsider.to_string()),
            difficulty,
            time_limit_secs: 6,
        }
    }

    /// A full assessment: working memory, short-term memory, processing
    /// speed (math or pattern), visual memory and attention, in that order.
    pub fn generate_session(&mut self, difficulty: Difficulty) -> Vec<TestItem> {
        let processing = if self.rng.gen_bool(0.5) {
            self.generate_math_item(difficulty)
        } else {
            self.generate_pattern_item(difficulty)
        };
        let items = vec![
            self.generate_sequence_item(difficulty),
            self.generate_word_item(difficulty),
            processing,
            self.generate_colour_item(difficulty),
            self.generate_odd_one_out_item(difficulty),
        ];
        tracing::debug!(%difficulty, count = items.len(), "generated session items");
        items
    }

    /// Digits 1..=9 to be entered in reverse order.
    pub fn generate_digit_span(&mut self, difficulty: Difficulty) -> TestItem {
        let (len, time_limit, _) = span_config(difficulty);
        let digits = self.random_sequence(len, 9);
        let stimulus: Vec<String> = digits.iter().map(u32::to_string).collect();
        let expected = stimulus.iter().rev().cloned().collect();

        TestItem {
            id: self.next_id(Category::WorkingMemory),
            category: Category::WorkingMemory,
            kind: ItemKind::Sequence,
            prompt: "Memorize the sequence and enter it in reverse order".into(),
            stimulus,
            options: Vec::new(),
            expected: Expected::Sequence(expected),
            difficulty,
            time_limit_secs: time_limit,
        }
    }

    /// Words from the tier's list, to be typed back in order.
    pub fn generate_word_span(&mut self, difficulty: Difficulty) -> TestItem {
        let (len, time_limit, _) = span_config(difficulty);
        let words: Vec<String> = span_words(difficulty)
            .choose_multiple(&mut self.rng, len)
            .map(|w| w.to_string())
            .collect();

        TestItem {
            id: self.next_id(Category::ShortTermMemory),
            category: Category::ShortTermMemory,
            kind: ItemKind::Sequence,
            prompt: "Memorize the words in order and type them back".into(),
            expected: Expected::Sequence(words.clone()),
            stimulus: words,
            options: Vec::new(),
            difficulty,
            time_limit_secs: time_limit,
        }
    }

    /// Highlighted squares on a `(3 + c)²` grid, `3 + c` cells lit.
    pub fn generate_grid_pattern(&mut self, difficulty: Difficulty) -> GridPattern {
        let (_, _, complexity) = span_config(difficulty);
        GridPattern::random(3 + complexity, 3 + complexity, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_numbers(item: &TestItem) -> Vec<u32> {
        item.stimulus.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn sequence_items_respect_tier_bounds() {
        let mut gen = ItemGenerator::seeded(7);
        for difficulty in Difficulty::ALL {
            let bounds = TierBounds::for_difficulty(difficulty);
            for _ in 0..200 {
                let item = gen.generate_sequence_item(difficulty);
                let values = parse_numbers(&item);
                assert!(
                    bounds.admits_sequence(&values),
                    "{difficulty}: {values:?} outside {bounds:?}"
                );
            }
        }
    }

    #[test]
    fn sequence_expected_is_reversed_stimulus() {
        let mut gen = ItemGenerator::seeded(1);
        let item = gen.generate_sequence_item(Difficulty::Medium);
        let mut reversed = item.stimulus.clone();
        reversed.reverse();
        assert_eq!(item.expected, Expected::Sequence(reversed));
        assert_eq!(item.category, Category::WorkingMemory);
    }

    #[test]
    fn word_items_have_distinct_words_within_bounds() {
        let mut gen = ItemGenerator::seeded(11);
        for difficulty in Difficulty::ALL {
            let bounds = TierBounds::for_difficulty(difficulty);
            for _ in 0..100 {
                let item = gen.generate_word_item(difficulty);
                assert!(bounds.word_count.contains(&item.stimulus.len()));
                let mut unique = item.stimulus.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), item.stimulus.len());
                assert_eq!(item.options.len(), item.stimulus.len() + 2);
                let Expected::Exact(answer) = &item.expected else {
                    panic!("word item should expect an exact answer");
                };
                assert!(item.options.contains(answer));
            }
        }
    }

    #[test]
    fn math_answer_is_among_options() {
        let mut gen = ItemGenerator::seeded(3);
        for difficulty in Difficulty::ALL {
            for _ in 0..500 {
                let item = gen.generate_math_item(difficulty);
                let Expected::Exact(answer) = &item.expected else {
                    panic!("math item should expect an exact answer");
                };
                assert!(item.options.contains(answer));
                let distinct: std::collections::HashSet<_> = item.options.iter().collect();
                assert_eq!(distinct.len(), item.options.len(), "{:?}", item.options);
                assert_eq!(item.time_limit_secs, 5);
            }
        }
    }

    #[test]
    fn colour_count_scales_with_difficulty() {
        let mut gen = ItemGenerator::seeded(5);
        assert_eq!(gen.generate_colour_item(Difficulty::Easy).stimulus.len(), 3);
        assert_eq!(gen.generate_colour_item(Difficulty::Medium).stimulus.len(), 4);
        assert_eq!(gen.generate_colour_item(Difficulty::Hard).stimulus.len(), 5);
    }

    #[test]
    fn odd_one_out_contains_outsider_once() {
        let mut gen = ItemGenerator::seeded(9);
        let item = gen.generate_odd_one_out_item(Difficulty::Hard);
        assert_eq!(item.options.len(), 6);
        let Expected::Exact(outsider) = &item.expected else {
            panic!("odd-one-out should expect an exact answer");
        };
        assert_eq!(item.options.iter().filter(|o| *o == outsider).count(), 1);
    }

    #[test]
    fn session_covers_five_categories_with_unique_ids() {
        let mut gen = ItemGenerator::seeded(42);
        let items = gen.generate_session(Difficulty::Easy);
        let categories: Vec<Category> = items.iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![
                Category::WorkingMemory,
                Category::ShortTermMemory,
                Category::ProcessingSpeed,
                Category::VisualMemory,
                Category::Attention,
            ]
        );
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn same_seed_same_session() {
        let a = ItemGenerator::seeded(99).generate_session(Difficulty::Hard);
        let b = ItemGenerator::seeded(99).generate_session(Difficulty::Hard);
        let prompts_a: Vec<_> = a.iter().map(|i| i.prompt.clone()).collect();
        let prompts_b: Vec<_> = b.iter().map(|i| i.prompt.clone()).collect();
        assert_eq!(prompts_a, prompts_b);
    }

    #[test]
    fn span_tests_follow_tier_table() {
        let mut gen = ItemGenerator::seeded(2);
        let digits = gen.generate_digit_span(Difficulty::Hard);
        assert_eq!(digits.stimulus.len(), 8);
        assert!(parse_numbers(&digits).iter().all(|d| (1..=9).contains(d)));

        let words = gen.generate_word_span(Difficulty::Medium);
        assert_eq!(words.stimulus.len(), 6);
        assert_eq!(words.expected, Expected::Sequence(words.stimulus.clone()));

        let grid = gen.generate_grid_pattern(Difficulty::Easy);
        assert_eq!(grid.size, 4);
        assert_eq!(grid.lit_count(), 4);
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(22), "22nd");
    }
}
