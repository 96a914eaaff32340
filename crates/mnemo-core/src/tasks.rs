//! Daily practice plan.
//!
//! A plan is a list of dated tasks generated from the player's learning
//! style and the categories their latest session scored poorly in. Each
//! task carries its own streak, which completing bumps and un-completing
//! takes back.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::Category;
use crate::profile::LearningStyle;
use crate::report::SessionResult;

/// Categories scoring under this are plan focus areas.
const FOCUS_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Technique,
    Exercise,
    Lifestyle,
    Diet,
}

impl TaskCategory {
    pub fn label(self) -> &'static str {
        match self {
            TaskCategory::Technique => "technique",
            TaskCategory::Exercise => "exercise",
            TaskCategory::Lifestyle => "lifestyle",
            TaskCategory::Diet => "diet",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub date: NaiveDate,
    pub minutes: u32,
    pub target_area: String,
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub streak: u32,
}

impl DailyTask {
    /// Flip completion. Completing adds one to the streak; undoing takes it back.
    pub fn toggle(&mut self, now: DateTime<Utc>) -> bool {
        self.completed = !self.completed;
        if self.completed {
            self.streak += 1;
            self.completed_at = Some(now);
        } else {
            self.streak = self.streak.saturating_sub(1);
            self.completed_at = None;
        }
        self.completed
    }
}

fn techniques(style: Option<LearningStyle>) -> &'static [&'static str] {
    match style {
        Some(LearningStyle::Visual) => &[
            "Visual memory palace practice",
            "Mind mapping exercises",
            "Image association training",
            "Color-coding memory practice",
        ],
        Some(LearningStyle::Auditory) => &[
            "Verbal repetition exercises",
            "Rhyme and rhythm memory",
            "Story-telling memory practice",
            "Audio pattern recognition",
        ],
        Some(LearningStyle::Kinesthetic) => &[
            "Physical movement memory",
            "Tactile memory exercises",
            "Body-based mnemonics",
            "Action-sequence memory",
        ],
        Some(LearningStyle::Verbal) | None => &[
            "Multi-sensory memory training",
            "Combination technique practice",
            "Adaptive memory exercises",
            "Cross-modal memory tasks",
        ],
    }
}

const EXERCISES: [(&str, &str); 8] = [
    ("Number sequence recall", "Practice recalling increasingly longer sequences of numbers"),
    ("Word list memorization", "Memorize and recall lists of words with various strategies"),
    ("Pattern recognition", "Identify and remember complex visual patterns"),
    ("Dual n-back training", "Train working memory with dual-task exercises"),
    ("Attention switching exercise", "Practice switching attention between different tasks"),
    ("Visual-spatial memory", "Strengthen visual-spatial memory with location tasks"),
    ("Working memory updating", "Update and maintain information in working memory"),
    ("Interference resistance training", "Build resistance to memory interference"),
];

const WELLNESS: [(&str, &str); 8] = [
    ("Brain-healthy breakfast", "Start your day with brain-boosting foods like blueberries and nuts"),
    ("Meditation practice", "Practice mindfulness meditation to improve focus and reduce stress"),
    ("Physical exercise", "Engage in 30 minutes of physical activity to boost brain health"),
    ("Quality sleep routine", "Maintain consistent sleep schedule for memory consolidation"),
    ("Stress management", "Practice stress-reduction techniques like deep breathing"),
    ("Hydration tracking", "Track water intake to maintain optimal brain hydration"),
    ("Omega-3 rich meal", "Include omega-3 rich foods like fish or walnuts in your meal"),
    ("Digital detox hour", "Take a break from digital devices to reduce cognitive overload"),
];

/// Categories the session scored under 70% in, in category order.
pub fn focus_areas(result: &SessionResult) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|&c| {
            result
                .category_percentage(c)
                .is_some_and(|p| p < FOCUS_THRESHOLD)
        })
        .collect()
}

/// Generate `days` days of tasks starting at `start`.
///
/// Every day gets a technique and an exercise sharing a third of
/// `minutes_per_day` each; about half the days also get a short wellness
/// task, alternating lifestyle and diet weeks.
pub fn plan_tasks<R: Rng>(
    start: NaiveDate,
    days: u32,
    style: Option<LearningStyle>,
    focus: &[Category],
    minutes_per_day: u32,
    rng: &mut R,
) -> Vec<DailyTask> {
    let slot = minutes_per_day / 3;
    let primary = focus.first().map_or("general", |c| c.label());
    let secondary = focus.get(1).or(focus.first()).map_or("general", |c| c.label());
    let techniques = techniques(style);
    let mut tasks = Vec::new();

    for offset in 0..days {
        let week = offset / 7 + 1;
        let day = offset % 7 + 1;
        let date = start + Duration::days(i64::from(offset));
        let task = |suffix: &str, title: &str, description: String, category, minutes, target: &str| DailyTask {
            id: format!("{week}-{day}-{suffix}"),
            title: title.to_string(),
            description,
            category,
            date,
            minutes,
            target_area: target.to_string(),
            completed: false,
            completed_at: None,
            streak: 0,
        };

        let technique = techniques.choose(rng).copied().unwrap_or("Memory technique practice");
        let focus_name = focus.first().map_or("general improvement", |c| c.label());
        tasks.push(task(
            "technique",
            technique,
            format!("Practice this technique for {slot} minutes focusing on {focus_name}"),
            TaskCategory::Technique,
            slot,
            primary,
        ));

        let (exercise, about) = EXERCISES.choose(rng).copied().unwrap_or(EXERCISES[0]);
        tasks.push(task(
            "exercise",
            exercise,
            about.to_string(),
            TaskCategory::Exercise,
            slot,
            secondary,
        ));

        if rng.gen_bool(0.5) {
            let (title, about) = WELLNESS.choose(rng).copied().unwrap_or(WELLNESS[0]);
            let category = if week % 2 == 0 {
                TaskCategory::Diet
            } else {
                TaskCategory::Lifestyle
            };
            tasks.push(task(
                "lifestyle",
                title,
                about.to_string(),
                category,
                slot / 2,
                "general wellness",
            ));
        }
    }
    tasks
}

/// Percentage of the tasks dated `date` that are done; 0 with no tasks.
pub fn completion_rate(tasks: &[DailyTask], date: NaiveDate) -> f64 {
    rate(tasks.iter().filter(|t| t.date == date))
}

/// Completion over the seven days up to and including `today`.
pub fn weekly_completion(tasks: &[DailyTask], today: NaiveDate) -> f64 {
    let week_ago = today - Duration::days(7);
    rate(tasks.iter().filter(|t| t.date >= week_ago && t.date <= today))
}

fn rate<'a>(tasks: impl Iterator<Item = &'a DailyTask>) -> f64 {
    let (done, total) = tasks.fold((0usize, 0usize), |(done, total), t| {
        (done + usize::from(t.completed), total + 1)
    });
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakStats {
    pub max_streak: u32,
    pub average_streak: f64,
    /// Tasks dated today that are done.
    pub current_streak: u32,
}

pub fn streak_stats(tasks: &[DailyTask], today: NaiveDate) -> StreakStats {
    let max_streak = tasks.iter().map(|t| t.streak).max().unwrap_or(0);
    let average_streak = if tasks.is_empty() {
        0.0
    } else {
        tasks.iter().map(|t| f64::from(t.streak)).sum::<f64>() / tasks.len() as f64
    };
    let current_streak = tasks.iter().filter(|t| t.completed && t.date == today).count() as u32;
    StreakStats {
        max_streak,
        average_streak,
        current_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;
    use crate::scoring::CategoryScore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, day).unwrap()
    }

    fn plan(days: u32, focus: &[Category]) -> Vec<DailyTask> {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        plan_tasks(date(1), days, Some(LearningStyle::Visual), focus, 30, &mut rng)
    }

    #[test]
    fn every_day_gets_technique_and_exercise() {
        let tasks = plan(10, &[Category::Attention]);
        for offset in 0..10 {
            let day = date(1) + Duration::days(offset);
            let on_day: Vec<_> = tasks.iter().filter(|t| t.date == day).collect();
            assert!((2..=3).contains(&on_day.len()), "{day}: {}", on_day.len());
            assert!(on_day.iter().any(|t| t.category == TaskCategory::Technique));
            assert!(on_day.iter().any(|t| t.category == TaskCategory::Exercise));
        }
        assert!(tasks.iter().all(|t| t.date < date(11)));
    }

    #[test]
    fn plan_uses_style_and_focus() {
        let tasks = plan(7, &[Category::WorkingMemory, Category::Attention]);
        let technique = &tasks[0];
        assert_eq!(technique.id, "1-1-technique");
        assert_eq!(technique.minutes, 10);
        assert_eq!(technique.target_area, "Working Memory");
        assert!(techniques(Some(LearningStyle::Visual)).contains(&technique.title.as_str()));
        assert!(technique.description.contains("10 minutes"));

        let exercise = &tasks[1];
        assert_eq!(exercise.target_area, "Attention");
    }

    #[test]
    fn wellness_tasks_alternate_by_week() {
        let tasks = plan(28, &[]);
        let wellness: Vec<_> = tasks
            .iter()
            .filter(|t| matches!(t.category, TaskCategory::Lifestyle | TaskCategory::Diet))
            .collect();
        assert!(!wellness.is_empty());
        for t in wellness {
            let week: u32 = t.id.split('-').next().unwrap().parse().unwrap();
            let expected = if week % 2 == 0 { TaskCategory::Diet } else { TaskCategory::Lifestyle };
            assert_eq!(t.category, expected);
            assert_eq!(t.minutes, 5);
            assert_eq!(t.target_area, "general wellness");
        }
    }

    #[test]
    fn toggle_moves_the_streak_both_ways() {
        let mut task = plan(1, &[])[0].clone();
        let now = Utc::now();

        assert!(task.toggle(now));
        assert_eq!(task.streak, 1);
        assert_eq!(task.completed_at, Some(now));

        assert!(!task.toggle(now));
        assert_eq!(task.streak, 0);
        assert_eq!(task.completed_at, None);

        // never below zero
        task.streak = 0;
        task.completed = true;
        task.toggle(now);
        assert_eq!(task.streak, 0);
    }

    #[test]
    fn completion_and_streak_stats() {
        let mut tasks = plan(3, &[]);
        assert_eq!(completion_rate(&tasks, date(1)), 0.0);
        assert_eq!(completion_rate(&tasks, date(20)), 0.0);

        let today: Vec<usize> = (0..tasks.len()).filter(|&i| tasks[i].date == date(2)).collect();
        tasks[today[0]].toggle(Utc::now());
        tasks[today[1]].toggle(Utc::now());

        let expected = 200.0 / today.len() as f64;
        assert!((completion_rate(&tasks, date(2)) - expected).abs() < 1e-9);
        assert!(weekly_completion(&tasks, date(3)) > 0.0);
        assert_eq!(weekly_completion(&tasks, date(30)), 0.0);

        let stats = streak_stats(&tasks, date(2));
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.current_streak, 2);
        assert!((stats.average_streak - 2.0 / tasks.len() as f64).abs() < 1e-9);

        let empty = streak_stats(&[], date(2));
        assert_eq!(empty.max_streak, 0);
        assert_eq!(empty.average_streak, 0.0);
    }

    #[test]
    fn focus_areas_are_weak_categories() {
        let result = SessionResult {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            difficulty: Difficulty::Medium,
            category_scores: vec![
                CategoryScore {
                    category: Category::Attention,
                    correct: 1,
                    attempted: 2,
                    percentage: 50.0,
                },
                CategoryScore {
                    category: Category::WorkingMemory,
                    correct: 2,
                    attempted: 2,
                    percentage: 100.0,
                },
                CategoryScore {
                    category: Category::ShortTermMemory,
                    correct: 0,
                    attempted: 1,
                    percentage: 0.0,
                },
            ],
            overall: 50.0,
            elapsed_ms: 1000,
            answers: vec![],
            source: None,
        };
        assert_eq!(
            focus_areas(&result),
            vec![Category::ShortTermMemory, Category::Attention]
        );
    }
}
