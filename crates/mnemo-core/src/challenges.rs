//! Multi-day training challenges.
//!
//! A challenge is a 7- or 30-day run of daily goals built from a template
//! for the chosen level. Completing goals earns points toward a level and
//! keeps a day streak going; finishing every goal moves the challenge to
//! the completed list and hands out its rewards.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const POINTS_PER_LEVEL: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeLength {
    Week,
    Month,
}

impl ChallengeLength {
    pub fn days(self) -> u32 {
        match self {
            ChallengeLength::Week => 7,
            ChallengeLength::Month => 30,
        }
    }
}

impl fmt::Display for ChallengeLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-day", self.days())
    }
}

impl FromStr for ChallengeLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "").as_str() {
            "week" | "7day" | "7" => Ok(ChallengeLength::Week),
            "month" | "30day" | "30" => Ok(ChallengeLength::Month),
            other => Err(format!("unknown challenge length: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ChallengeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChallengeLevel::Beginner => write!(f, "beginner"),
            ChallengeLevel::Intermediate => write!(f, "intermediate"),
            ChallengeLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for ChallengeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ChallengeLevel::Beginner),
            "intermediate" => Ok(ChallengeLevel::Intermediate),
            "advanced" => Ok(ChallengeLevel::Advanced),
            other => Err(format!("unknown challenge level: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Test,
    Exercise,
    Habit,
    Milestone,
}

struct Template {
    title: &'static str,
    description: &'static str,
    goals: [(&'static str, GoalKind, u32); 3],
}

fn template(length: ChallengeLength, level: ChallengeLevel) -> Template {
    use ChallengeLength::*;
    use ChallengeLevel::*;
    use GoalKind::*;

    match (length, level) {
        (Month, Beginner) => Template {
            title: "30-Day Memory Foundation",
            description: "Build strong memory habits with daily exercises and techniques",
            goals: [
                ("Complete daily memory test", Test, 10),
                ("Practice one memory technique", Exercise, 5),
                ("Read brain health tip", Habit, 3),
            ],
        },
        (Month, Intermediate) => Template {
            title: "30-Day Memory Mastery",
            description: "Advanced memory training with challenging exercises",
            goals: [
                ("Score 80%+ on memory test", Test, 15),
                ("Complete 3 memory exercises", Exercise, 10),
                ("Practice spaced repetition", Habit, 8),
            ],
        },
        (Month, Advanced) => Template {
            title: "30-Day Memory Champion",
            description: "Elite-level memory training for peak performance",
            goals: [
                ("Score 90%+ on hard difficulty test", Test, 25),
                ("Master new memory technique", Exercise, 20),
                ("Teach technique to someone", Milestone, 15),
            ],
        },
        (Week, Beginner) => Template {
            title: "7-Day Memory Kickstart",
            description: "Quick introduction to memory improvement",
            goals: [
                ("Take memory assessment", Test, 15),
                ("Learn basic technique", Exercise, 10),
                ("Practice daily", Habit, 5),
            ],
        },
        (Week, Intermediate) => Template {
            title: "7-Day Memory Intensive",
            description: "Intensive week of memory training",
            goals: [
                ("Improve test score by 10%", Test, 20),
                ("Master 2 techniques", Exercise, 15),
                ("Complete all daily tasks", Habit, 10),
            ],
        },
        (Week, Advanced) => Template {
            title: "7-Day Memory Sprint",
            description: "High-intensity memory training week",
            goals: [
                ("Achieve personal best score", Test, 30),
                ("Complete advanced exercises", Exercise, 25),
                ("Perfect daily streak", Milestone, 20),
            ],
        },
    }
}

/// Rewards granted when every goal of a challenge is done.
pub fn rewards(length: ChallengeLength, level: ChallengeLevel) -> Vec<String> {
    let days = length.days();
    let level_name = level.to_string();
    let mut level_title = level_name[..1].to_uppercase();
    level_title.push_str(&level_name[1..]);

    let mut rewards = vec![
        format!("{days}-Day Completion Badge"),
        format!("{level_title} Level Certificate"),
    ];
    if level == ChallengeLevel::Advanced {
        rewards.push("Memory Champion Title".into());
        rewards.push("Exclusive Advanced Techniques Guide".into());
    }
    if days >= 30 {
        rewards.push("Monthly Warrior Badge".into());
        rewards.push("Habit Master Achievement".into());
    }
    rewards
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoal {
    /// `<day>-<index>`, unique within its challenge.
    pub id: String,
    pub day: u32,
    pub title: String,
    pub kind: GoalKind,
    pub points: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub length: ChallengeLength,
    pub level: ChallengeLevel,
    pub started_at: DateTime<Utc>,
    pub goals: Vec<DailyGoal>,
    pub rewards: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChallengeProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
}

impl Challenge {
    /// Expand the template into one set of goals per day.
    pub fn new(id: u32, length: ChallengeLength, level: ChallengeLevel, started_at: DateTime<Utc>) -> Self {
        let template = template(length, level);
        let goals = (1..=length.days())
            .flat_map(|day| {
                template
                    .goals
                    .iter()
                    .enumerate()
                    .map(move |(index, &(title, kind, points))| DailyGoal {
                        id: format!("{day}-{index}"),
                        day,
                        title: title.to_string(),
                        kind,
                        points,
                        completed: false,
                    })
            })
            .collect();

        Self {
            id,
            title: template.title.to_string(),
            description: template.description.to_string(),
            length,
            level,
            started_at,
            goals,
            rewards: rewards(length, level),
        }
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.started_at + Duration::days(i64::from(self.length.days()))
    }

    /// 1-based challenge day that `now` falls on.
    pub fn day_at(&self, now: DateTime<Utc>) -> u32 {
        let elapsed = (now - self.started_at).num_days().max(0);
        u32::try_from(elapsed).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// Goals scheduled for the day `now` falls on; empty once the challenge has run out.
    pub fn goals_for_day(&self, now: DateTime<Utc>) -> Vec<&DailyGoal> {
        let day = self.day_at(now);
        self.goals.iter().filter(|g| g.day == day).collect()
    }

    pub fn progress(&self) -> ChallengeProgress {
        let completed = self.goals.iter().filter(|g| g.completed).count();
        let total = self.goals.len();
        let percentage = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        ChallengeProgress {
            completed,
            total,
            percentage,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.goals.iter().all(|g| g.completed)
    }
}

/// Points, level and streaks earned across all challenges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStats {
    pub total_points: u32,
    /// Consecutive calendar days with at least one completed goal.
    pub current_streak: u32,
    pub longest_streak: u32,
    pub level: u32,
    pub challenges_completed: u32,
    #[serde(default)]
    pub last_active: Option<NaiveDate>,
}

impl Default for ChallengeStats {
    fn default() -> Self {
        Self {
            total_points: 0,
            current_streak: 0,
            longest_streak: 0,
            level: 1,
            challenges_completed: 0,
            last_active: None,
        }
    }
}

impl ChallengeStats {
    fn award(&mut self, points: u32, today: NaiveDate) {
        self.total_points += points;
        self.level = self.total_points / POINTS_PER_LEVEL + 1;

        self.current_streak = match self.last_active {
            Some(last) if last == today => self.current_streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.current_streak + 1,
            _ => 1,
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_active = Some(today);
    }
}

/// What completing one goal earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalCompletion {
    pub points: u32,
    pub level: u32,
    /// Set when this goal finished the challenge.
    pub rewards: Option<Vec<String>>,
}

/// Every challenge a player has started, plus their running stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeBoard {
    #[serde(default)]
    pub stats: ChallengeStats,
    #[serde(default)]
    pub active: Vec<Challenge>,
    #[serde(default)]
    pub completed: Vec<Challenge>,
}

impl ChallengeBoard {
    fn next_id(&self) -> u32 {
        self.active
            .iter()
            .chain(&self.completed)
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Start a new challenge and return it.
    pub fn start(&mut self, length: ChallengeLength, level: ChallengeLevel, now: DateTime<Utc>) -> &Challenge {
        let challenge = Challenge::new(self.next_id(), length, level, now);
        tracing::info!(id = challenge.id, title = %challenge.title, "challenge started");
        self.active.push(challenge);
        &self.active[self.active.len() - 1]
    }

    /// Mark a goal done, award its points and retire the challenge once every goal is done.
    pub fn complete_goal(&mut self, challenge_id: u32, goal_id: &str, now: DateTime<Utc>) -> Result<GoalCompletion> {
        let Some(position) = self.active.iter().position(|c| c.id == challenge_id) else {
            anyhow::bail!("no active challenge with id {challenge_id}");
        };
        let challenge = &mut self.active[position];
        let Some(goal) = challenge.goals.iter_mut().find(|g| g.id == goal_id) else {
            anyhow::bail!("challenge {challenge_id} has no goal {goal_id}");
        };
        anyhow::ensure!(!goal.completed, "goal {goal_id} is already completed");

        goal.completed = true;
        let points = goal.points;
        self.stats.award(points, now.date_naive());

        let rewards = if challenge.is_complete() {
            let finished = self.active.remove(position);
            tracing::info!(id = finished.id, title = %finished.title, "challenge completed");
            let rewards = finished.rewards.clone();
            self.stats.challenges_completed += 1;
            self.completed.push(finished);
            Some(rewards)
        } else {
            None
        };

        Ok(GoalCompletion {
            points,
            level: self.stats.level,
            rewards,
        })
    }
}
