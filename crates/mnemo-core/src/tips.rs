//! Training tips and recommendations.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::statistics::StrengthsAndWeaknesses;

/// Areas the tips database is organized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipFocus {
    WorkingMemory,
    PatternMemory,
    WordSequence,
    General,
}

impl TipFocus {
    /// The focus area that trains a scoring category.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::WorkingMemory | Category::Attention => TipFocus::WorkingMemory,
            Category::VisualMemory | Category::ProcessingSpeed => TipFocus::PatternMemory,
            Category::ShortTermMemory | Category::LongTermMemory | Category::AuditoryMemory => {
                TipFocus::WordSequence
            }
        }
    }

    fn tips(self) -> &'static [&'static str] {
        match self {
            TipFocus::WorkingMemory => &[
                "Practice the 'chunking' technique: group information into smaller, manageable pieces",
                "Use visualization: create mental images to represent abstract information",
                "Try the dual n-back exercise to strengthen working memory capacity",
                "Practice mindfulness meditation to improve focus and attention control",
            ],
            TipFocus::PatternMemory => &[
                "Create stories or narratives that connect visual elements",
                "Use the method of loci: associate patterns with familiar locations",
                "Practice drawing patterns from memory to strengthen visual recall",
                "Break complex patterns into simpler geometric shapes",
            ],
            TipFocus::WordSequence => &[
                "Create acronyms using the first letters of words",
                "Build a story that incorporates all the words in sequence",
                "Use rhyming or alliteration to make words more memorable",
                "Practice spaced repetition: review words at increasing intervals",
            ],
            TipFocus::General => &[
                "Get 7-9 hours of quality sleep for optimal memory consolidation",
                "Exercise regularly to increase BDNF (brain-derived neurotrophic factor)",
                "Eat brain-healthy foods rich in omega-3 fatty acids",
                "Stay hydrated - even mild dehydration affects cognitive performance",
            ],
        }
    }
}

impl fmt::Display for TipFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipFocus::WorkingMemory => write!(f, "working memory"),
            TipFocus::PatternMemory => write!(f, "pattern memory"),
            TipFocus::WordSequence => write!(f, "word sequence"),
            TipFocus::General => write!(f, "general"),
        }
    }
}

impl FromStr for TipFocus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "working_memory" => Ok(TipFocus::WorkingMemory),
            "pattern_memory" => Ok(TipFocus::PatternMemory),
            "word_sequence" => Ok(TipFocus::WordSequence),
            "general" => Ok(TipFocus::General),
            other => Err(format!("unknown tip focus: {other}")),
        }
    }
}

const ADVANCED_TIPS: [&str; 3] = [
    "Try increasing the difficulty level to continue challenging yourself",
    "Teach these techniques to others to reinforce your own learning",
    "Explore advanced memory techniques like the Major System",
];

/// Pick a tip matched to the score.
///
/// Below 60 the pool mixes encouragement with focus tips, below 80 it is
/// the focus tips alone, and otherwise advanced tips.
pub fn personalized_tip<R: Rng>(score: f64, focus: TipFocus, rng: &mut R) -> String {
    let pool: Vec<String> = if score < 60.0 {
        let mut pool = vec![
            format!("Focus on {focus} exercises for 10-15 minutes daily"),
            "Start with easier variations and gradually increase difficulty".to_string(),
            "Don't get discouraged - improvement takes consistent practice".to_string(),
        ];
        pool.extend(focus.tips().iter().map(|t| t.to_string()));
        pool
    } else if score < 80.0 {
        focus.tips().iter().map(|t| t.to_string()).collect()
    } else {
        ADVANCED_TIPS.iter().map(|t| t.to_string()).collect()
    };
    pool.choose(rng).cloned().unwrap_or_default()
}

/// Training suggestions drawn from a session's strengths and weaknesses.
pub fn recommendations(sw: &StrengthsAndWeaknesses) -> Vec<String> {
    let mut out = Vec::new();
    if sw.weaknesses.contains(&Category::WorkingMemory) {
        out.push("Focus on dual n-back training exercises".to_string());
    }
    if sw.weaknesses.contains(&Category::Attention) {
        out.push("Practice mindfulness meditation for 10 minutes daily".to_string());
    }
    if sw.weaknesses.contains(&Category::ProcessingSpeed) {
        out.push("Try speed-based cognitive games and exercises".to_string());
    }
    if let Some(strength) = sw.strengths.first() {
        out.push(format!(
            "Leverage your strength in {} to tackle challenging areas",
            strength.label()
        ));
    }
    if out.is_empty() {
        out.push("Continue your current training routine".to_string());
    }
    out
}
