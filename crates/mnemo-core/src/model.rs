//! Core data model types for mnemo.
//!
//! These are the fundamental types the rest of the system uses to represent
//! test items, expected answers, difficulty tiers and cognitive categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier controlling generation bounds and scoring multipliers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Multiplier applied to category percentages when difficulty weighting
    /// is enabled in the scoring config.
    pub fn category_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.2,
        }
    }

    /// Multiplier applied to mini-game points.
    pub fn game_multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.2,
            Difficulty::Hard => 1.5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A cognitive-skill bucket that items are scored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    WorkingMemory,
    ShortTermMemory,
    LongTermMemory,
    VisualMemory,
    AuditoryMemory,
    ProcessingSpeed,
    Attention,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::WorkingMemory,
        Category::ShortTermMemory,
        Category::LongTermMemory,
        Category::VisualMemory,
        Category::AuditoryMemory,
        Category::ProcessingSpeed,
        Category::Attention,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Category::WorkingMemory => "Working Memory",
            Category::ShortTermMemory => "Short-term Memory",
            Category::LongTermMemory => "Long-term Memory",
            Category::VisualMemory => "Visual Memory",
            Category::AuditoryMemory => "Auditory Memory",
            Category::ProcessingSpeed => "Processing Speed",
            Category::Attention => "Attention",
        }
    }

    /// Short prefix used when building item ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Category::WorkingMemory => "wm",
            Category::ShortTermMemory => "st",
            Category::LongTermMemory => "lt",
            Category::VisualMemory => "vm",
            Category::AuditoryMemory => "am",
            Category::ProcessingSpeed => "ps",
            Category::Attention => "at",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::WorkingMemory => "working_memory",
            Category::ShortTermMemory => "short_term_memory",
            Category::LongTermMemory => "long_term_memory",
            Category::VisualMemory => "visual_memory",
            Category::AuditoryMemory => "auditory_memory",
            Category::ProcessingSpeed => "processing_speed",
            Category::Attention => "attention",
        };
        f.write_str(s)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "working_memory" | "working" => Ok(Category::WorkingMemory),
            "short_term_memory" | "short_term" | "shortterm" => Ok(Category::ShortTermMemory),
            "long_term_memory" | "long_term" | "longterm" => Ok(Category::LongTermMemory),
            "visual_memory" | "visual" => Ok(Category::VisualMemory),
            "auditory_memory" | "auditory" => Ok(Category::AuditoryMemory),
            "processing_speed" | "processing" => Ok(Category::ProcessingSpeed),
            "attention" => Ok(Category::Attention),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// What kind of task an item poses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Recall a number sequence, possibly transformed (reversed).
    Sequence,
    /// Recall one word from a memorized list.
    WordRecall,
    /// Solve an arithmetic problem.
    Math,
    /// Continue a symbolic pattern.
    Pattern,
    /// Recall which colours were shown, in order.
    ColourRecall,
    /// Pick the item that does not belong.
    OddOneOut,
    /// Hand-authored item with free-form content.
    Custom,
}

/// The answer an item expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    /// A single scalar or string value, matched exactly.
    Exact(String),
    /// An ordered sequence, matched element-wise in order.
    Sequence(Vec<String>),
    /// Any one of the listed values is correct.
    AnyOf(Vec<String>),
}

impl Expected {
    /// Returns `true` if there is nothing to match against.
    pub fn is_empty(&self) -> bool {
        match self {
            Expected::Exact(s) => s.trim().is_empty(),
            Expected::Sequence(v) | Expected::AnyOf(v) => v.is_empty(),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Exact(s) => f.write_str(s),
            Expected::Sequence(v) => f.write_str(&v.join(",")),
            Expected::AnyOf(v) => f.write_str(&v.join(" | ")),
        }
    }
}

/// A single test item presented to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestItem {
    /// Identifier, unique within a session or item set.
    pub id: String,
    /// Category the item is scored under.
    pub category: Category,
    /// Task kind.
    pub kind: ItemKind,
    /// Question text.
    pub prompt: String,
    /// Items shown for memorization before answering.
    #[serde(default)]
    pub stimulus: Vec<String>,
    /// Multiple-choice options, empty for free-text answers.
    #[serde(default)]
    pub options: Vec<String>,
    /// The expected answer.
    pub expected: Expected,
    /// Difficulty tier the item was generated for.
    pub difficulty: Difficulty,
    /// Time allowance in seconds.
    pub time_limit_secs: u32,
}

/// A hand-authored collection of test items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<TestItem>,
    /// Tier for items that don't specify one.
    #[serde(default)]
    pub default_difficulty: Difficulty,
    /// Time limit for items that don't specify one.
    #[serde(default = "default_time_limit")]
    pub default_time_limit_secs: u32,
}

pub(crate) fn default_time_limit() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!("EASY".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" medium ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn multipliers_by_tier() {
        assert_eq!(Difficulty::Easy.category_multiplier(), 0.8);
        assert_eq!(Difficulty::Hard.category_multiplier(), 1.2);
        assert_eq!(Difficulty::Medium.game_multiplier(), 1.2);
        assert_eq!(Difficulty::Hard.game_multiplier(), 1.5);
    }

    #[test]
    fn category_parse_accepts_aliases() {
        assert_eq!("working".parse::<Category>().unwrap(), Category::WorkingMemory);
        assert_eq!("shortTerm".parse::<Category>().unwrap(), Category::ShortTermMemory);
        assert_eq!(
            "processing-speed".parse::<Category>().unwrap(),
            Category::ProcessingSpeed
        );
        for c in Category::ALL {
            assert_eq!(c.to_string().parse::<Category>().unwrap(), c);
        }
        assert!("smell".parse::<Category>().is_err());
    }

    #[test]
    fn expected_serializes_as_tagged_map() {
        let e = Expected::Sequence(vec!["9".into(), "2".into()]);
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(json, r#"{"sequence":["9","2"]}"#);
        assert_eq!(e.to_string(), "9,2");
        assert!(Expected::AnyOf(vec![]).is_empty());
        assert!(Expected::Exact("  ".into()).is_empty());
    }
}
