//! Learning-style profile from the cognitive questionnaire.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    Verbal,
}

impl LearningStyle {
    /// Declaration order, also used to break ties.
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Visual,
        LearningStyle::Auditory,
        LearningStyle::Kinesthetic,
        LearningStyle::Verbal,
    ];

    fn strengths(self) -> [&'static str; 2] {
        match self {
            LearningStyle::Visual => ["Excellent spatial awareness", "Strong pattern recognition"],
            LearningStyle::Auditory => ["Superior listening skills", "Great at remembering conversations"],
            LearningStyle::Kinesthetic => ["Learn best through hands-on experience", "Strong muscle memory"],
            LearningStyle::Verbal => ["Strong language processing", "Excellent reading comprehension"],
        }
    }

    fn recommendations(self) -> [&'static str; 3] {
        match self {
            LearningStyle::Visual => [
                "Use colorful mind maps and diagrams",
                "Create visual associations for abstract concepts",
                "Practice with image-based memory techniques",
            ],
            LearningStyle::Auditory => [
                "Use verbal repetition and rhymes",
                "Study with background music",
                "Practice explaining concepts aloud",
            ],
            LearningStyle::Kinesthetic => [
                "Use physical movements while learning",
                "Practice with hands-on activities",
                "Take frequent breaks to move around",
            ],
            LearningStyle::Verbal => [
                "Use acronyms and word associations",
                "Create stories to remember information",
                "Practice with written exercises",
            ],
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearningStyle::Visual => write!(f, "visual"),
            LearningStyle::Auditory => write!(f, "auditory"),
            LearningStyle::Kinesthetic => write!(f, "kinesthetic"),
            LearningStyle::Verbal => write!(f, "verbal"),
        }
    }
}

impl FromStr for LearningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visual" => Ok(LearningStyle::Visual),
            "auditory" => Ok(LearningStyle::Auditory),
            "kinesthetic" => Ok(LearningStyle::Kinesthetic),
            "verbal" => Ok(LearningStyle::Verbal),
            other => Err(format!("unknown learning style: {other}")),
        }
    }
}

/// One questionnaire question; option `i` maps to `LearningStyle::ALL[i]`.
#[derive(Debug, Clone, Copy)]
pub struct ProfileQuestion {
    pub question: &'static str,
    pub options: [&'static str; 4],
}

pub const QUESTIONS: [ProfileQuestion; 8] = [
    ProfileQuestion {
        question: "When learning something new, I prefer to:",
        options: [
            "See diagrams, charts, or visual demonstrations",
            "Listen to explanations or audio recordings",
            "Practice hands-on or through physical activity",
            "Read detailed written instructions",
        ],
    },
    ProfileQuestion {
        question: "When I need to remember a phone number, I:",
        options: [
            "Visualize the numbers in my mind",
            "Repeat it out loud several times",
            "Write it down or type it",
            "Break it into word patterns",
        ],
    },
    ProfileQuestion {
        question: "In a meeting, I remember information best when:",
        options: [
            "I can see slides, charts, or visual aids",
            "I listen carefully to the discussion",
            "I take notes or doodle",
            "I can ask questions and discuss",
        ],
    },
    ProfileQuestion {
        question: "When giving directions, I typically:",
        options: [
            "Draw a map or point to landmarks",
            "Describe the route verbally",
            "Walk through the route physically",
            "Write down step-by-step instructions",
        ],
    },
    ProfileQuestion {
        question: "I concentrate best when:",
        options: [
            "My workspace is visually organized",
            "There's background music or white noise",
            "I can move around or fidget",
            "I can think through problems verbally",
        ],
    },
    ProfileQuestion {
        question: "When solving problems, I:",
        options: [
            "Create mental images or diagrams",
            "Talk through the problem aloud",
            "Try different approaches hands-on",
            "Write out pros and cons",
        ],
    },
    ProfileQuestion {
        question: "I remember faces better when:",
        options: [
            "I focus on visual features",
            "I remember their voice or name",
            "I recall our physical interaction",
            "I associate them with stories",
        ],
    },
    ProfileQuestion {
        question: "When stressed, I prefer to:",
        options: [
            "Look at calming images or organize visually",
            "Listen to music or talk to someone",
            "Exercise or do physical activities",
            "Write in a journal or read",
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProfile {
    pub primary: LearningStyle,
    pub secondary: LearningStyle,
    /// Rounded share of answers per style.
    pub percentages: BTreeMap<LearningStyle, u32>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Build a profile from one chosen option index per question.
pub fn learning_profile(answers: &[usize]) -> Result<LearningProfile> {
    anyhow::ensure!(
        answers.len() == QUESTIONS.len(),
        "expected {} answers, got {}",
        QUESTIONS.len(),
        answers.len()
    );

    let mut counts = [0u32; 4];
    for (question, &choice) in answers.iter().enumerate() {
        anyhow::ensure!(
            choice < LearningStyle::ALL.len(),
            "answer {} to question {} is out of range",
            choice,
            question + 1
        );
        counts[choice] += 1;
    }

    let total = answers.len() as f64;
    let percentages: BTreeMap<LearningStyle, u32> = LearningStyle::ALL
        .iter()
        .zip(counts)
        .map(|(&style, n)| (style, (n as f64 / total * 100.0).round() as u32))
        .collect();

    // stable sort keeps declaration order among ties
    let mut ranked = LearningStyle::ALL;
    ranked.sort_by(|a, b| percentages[b].cmp(&percentages[a]));
    let (primary, secondary) = (ranked[0], ranked[1]);

    let mut strengths: Vec<String> = primary.strengths().iter().map(|s| s.to_string()).collect();
    strengths.push(secondary.strengths()[0].to_string());
    let mut recommendations: Vec<String> =
        primary.recommendations().iter().map(|s| s.to_string()).collect();
    recommendations.push(secondary.recommendations()[0].to_string());

    Ok(LearningProfile {
        primary,
        secondary,
        percentages,
        strengths,
        recommendations,
    })
}
