//! Arena progression: XP, levels, streaks and achievements across games.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Game;

const XP_PER_LEVEL: u64 = 100;
/// A game scoring above this extends the win streak.
const STREAK_THRESHOLD: u32 = 50;

/// One finished arena game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub game: Game,
    pub score: u32,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    FirstGame,
    Score100,
    Streak5,
    Level10,
    Games50,
    NBackMaster,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 6] = [
        AchievementKind::FirstGame,
        AchievementKind::Score100,
        AchievementKind::Streak5,
        AchievementKind::Level10,
        AchievementKind::Games50,
        AchievementKind::NBackMaster,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AchievementKind::FirstGame => "First Steps",
            AchievementKind::Score100 => "Century Club",
            AchievementKind::Streak5 => "On Fire",
            AchievementKind::Level10 => "Memory Master",
            AchievementKind::Games50 => "Dedicated Trainer",
            AchievementKind::NBackMaster => "N-Back Champion",
        }
    }

    pub fn target(self) -> u64 {
        match self {
            AchievementKind::FirstGame => 1,
            AchievementKind::Score100 => 100,
            AchievementKind::Streak5 => 5,
            AchievementKind::Level10 => 10,
            AchievementKind::Games50 => 50,
            AchievementKind::NBackMaster => 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub progress: u64,
    pub unlocked: bool,
}

/// Cumulative arena state for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaStats {
    pub total_xp: u64,
    pub level: u64,
    pub games_played: u32,
    pub highest_score: u32,
    pub current_streak: u32,
    #[serde(default)]
    pub history: Vec<GameSession>,
    #[serde(default = "default_achievements")]
    pub achievements: Vec<Achievement>,
}

fn default_achievements() -> Vec<Achievement> {
    AchievementKind::ALL
        .iter()
        .map(|&kind| Achievement {
            kind,
            progress: 0,
            unlocked: false,
        })
        .collect()
}

impl Default for ArenaStats {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: 1,
            games_played: 0,
            highest_score: 0,
            current_streak: 0,
            history: Vec::new(),
            achievements: default_achievements(),
        }
    }
}

impl ArenaStats {
    /// Fold a finished game into the stats.
    ///
    /// Returns the achievements unlocked by this game.
    pub fn record(&mut self, game: Game, score: u32, played_at: DateTime<Utc>) -> Vec<AchievementKind> {
        self.total_xp += u64::from(score);
        self.level = self.total_xp / XP_PER_LEVEL + 1;
        self.games_played += 1;
        self.highest_score = self.highest_score.max(score);
        self.current_streak = if score > STREAK_THRESHOLD {
            self.current_streak + 1
        } else {
            0
        };
        self.history.push(GameSession {
            game,
            score,
            played_at,
        });
        self.update_achievements()
    }

    /// XP still needed for the next level.
    pub fn xp_to_next_level(&self) -> u64 {
        XP_PER_LEVEL - self.total_xp % XP_PER_LEVEL
    }

    fn best_score(&self, game: Game) -> u32 {
        self.history
            .iter()
            .filter(|s| s.game == game)
            .map(|s| s.score)
            .max()
            .unwrap_or(0)
    }

    fn update_achievements(&mut self) -> Vec<AchievementKind> {
        let best_nback = u64::from(self.best_score(Game::NBack));
        let mut unlocked = Vec::new();
        for achievement in &mut self.achievements {
            let progress = match achievement.kind {
                AchievementKind::FirstGame => u64::from(self.games_played > 0),
                AchievementKind::Score100 => {
                    achievement.progress.max(u64::from(self.highest_score))
                }
                AchievementKind::Streak5 => u64::from(self.current_streak),
                AchievementKind::Level10 => self.level,
                AchievementKind::Games50 => u64::from(self.games_played),
                AchievementKind::NBackMaster => achievement.progress.max(best_nback),
            };
            achievement.progress = progress;
            if !achievement.unlocked && progress >= achievement.kind.target() {
                achievement.unlocked = true;
                tracing::info!(achievement = achievement.kind.title(), "achievement unlocked");
                unlocked.push(achievement.kind);
            }
        }
        unlocked
    }
}
