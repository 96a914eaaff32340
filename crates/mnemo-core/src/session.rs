//! Session runner.
//!
//! Presents items to a [`Respondent`] one at a time, times and scores each
//! answer, and rolls everything up into a [`SessionResult`].

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use anyhow::Result;
use uuid::Uuid;

use crate::model::{Difficulty, TestItem};
use crate::report::SessionResult;
use crate::scoring::{score_answer, score_session, AnswerRecord, ScoringConfig};

/// Something that answers test items: a person at a terminal, a script, ...
pub trait Respondent {
    /// Show the item's stimulus before the answer clock starts.
    ///
    /// Time spent here is not part of the recorded `response_ms`.
    fn present(&mut self, _item: &TestItem) -> Result<()> {
        Ok(())
    }

    /// Answer one item. `Ok(None)` means the item was skipped or timed out.
    fn respond(&mut self, item: &TestItem) -> Result<Option<String>>;
}

/// Answers from a prepared script.
///
/// Answers keyed by item id take precedence; items without a keyed answer
/// consume the ordered answers front to back.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRespondent {
    by_id: HashMap<String, String>,
    ordered: VecDeque<String>,
}

impl ScriptedRespondent {
    pub fn by_id(answers: HashMap<String, String>) -> Self {
        Self {
            by_id: answers,
            ordered: VecDeque::new(),
        }
    }

    pub fn in_order<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            by_id: HashMap::new(),
            ordered: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl Respondent for ScriptedRespondent {
    fn respond(&mut self, item: &TestItem) -> Result<Option<String>> {
        if let Some(answer) = self.by_id.remove(&item.id) {
            return Ok(Some(answer));
        }
        Ok(self.ordered.pop_front())
    }
}

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_item_start(&self, index: usize, total: usize, item: &TestItem);
    fn on_item_scored(&self, record: &AnswerRecord);
    fn on_session_complete(&self, result: &SessionResult, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_item_start(&self, _: usize, _: usize, _: &TestItem) {}
    fn on_item_scored(&self, _: &AnswerRecord) {}
    fn on_session_complete(&self, _: &SessionResult, _: Duration) {}
}

/// Runs a list of items through a respondent and scores the session.
#[derive(Debug, Clone, Default)]
pub struct SessionRunner {
    config: ScoringConfig,
    source: Option<String>,
}

impl SessionRunner {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// Tag results with the item set they came from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn run(
        &self,
        items: &[TestItem],
        difficulty: Difficulty,
        respondent: &mut dyn Respondent,
        progress: &dyn ProgressReporter,
    ) -> SessionResult {
        let start = Instant::now();
        let mut answers = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            progress.on_item_start(index, items.len(), item);

            if let Err(e) = respondent.present(item) {
                tracing::error!("respondent failed to present item {}: {e:#}", item.id);
            }
            let asked = Instant::now();
            let answer = match respondent.respond(item) {
                Ok(answer) => answer,
                Err(e) => {
                    tracing::error!("respondent failed on item {}: {e:#}", item.id);
                    None
                }
            };
            let response_ms = asked.elapsed().as_millis() as u64;

            let record = score_answer(item, answer.as_deref(), Some(response_ms));
            tracing::debug!(item = %record.item_id, correct = record.correct, response_ms, "item scored");
            progress.on_item_scored(&record);
            answers.push(record);
        }

        let (category_scores, overall) = score_session(items, &answers, &self.config);
        let elapsed = start.elapsed();

        let result = SessionResult {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            difficulty,
            category_scores,
            overall,
            elapsed_ms: elapsed.as_millis() as u64,
            answers,
            source: self.source.clone(),
        };
        tracing::info!(id = %result.id, overall = result.overall, "session complete");
        progress.on_session_complete(&result, elapsed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Expected, ItemKind};
    use std::cell::RefCell;

    fn item(id: &str, category: Category, answer: &str) -> TestItem {
        TestItem {
            id: id.into(),
            category,
            kind: ItemKind::Custom,
            prompt: "?".into(),
            stimulus: vec![],
            options: vec![],
            expected: Expected::Exact(answer.into()),
            difficulty: Difficulty::Easy,
            time_limit_secs: 5,
        }
    }

    struct FailingRespondent;

    impl Respondent for FailingRespondent {
        fn respond(&mut self, _: &TestItem) -> Result<Option<String>> {
            anyhow::bail!("stdin closed")
        }
    }

    /// Takes its time memorizing, then answers instantly.
    struct SlowReader;

    impl Respondent for SlowReader {
        fn present(&mut self, _: &TestItem) -> Result<()> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        }
        fn respond(&mut self, _: &TestItem) -> Result<Option<String>> {
            Ok(Some("x".into()))
        }
    }

    #[derive(Default)]
    struct CountingReporter {
        started: RefCell<usize>,
        scored: RefCell<usize>,
        completed: RefCell<bool>,
    }

    impl ProgressReporter for CountingReporter {
        fn on_item_start(&self, _: usize, _: usize, _: &TestItem) {
            *self.started.borrow_mut() += 1;
        }
        fn on_item_scored(&self, _: &AnswerRecord) {
            *self.scored.borrow_mut() += 1;
        }
        fn on_session_complete(&self, _: &SessionResult, _: Duration) {
            *self.completed.borrow_mut() = true;
        }
    }

    #[test]
    fn scripted_in_order_session() {
        let items = vec![
            item("a", Category::Attention, "x"),
            item("b", Category::Attention, "y"),
            item("c", Category::VisualMemory, "z"),
        ];
        let mut respondent = ScriptedRespondent::in_order(["x", "wrong", "z"]);
        let reporter = CountingReporter::default();

        let result = SessionRunner::default().run(&items, Difficulty::Easy, &mut respondent, &reporter);

        assert_eq!(result.answers.len(), 3);
        assert_eq!(result.category_percentage(Category::Attention), Some(50.0));
        assert_eq!(result.category_percentage(Category::VisualMemory), Some(100.0));
        assert_eq!(result.overall, 75.0);
        assert_eq!(*reporter.started.borrow(), 3);
        assert_eq!(*reporter.scored.borrow(), 3);
        assert!(*reporter.completed.borrow());
    }

    #[test]
    fn keyed_answers_take_precedence() {
        let items = vec![item("a", Category::Attention, "x"), item("b", Category::Attention, "y")];
        let mut keyed = HashMap::new();
        keyed.insert("b".to_string(), "y".to_string());
        let mut respondent = ScriptedRespondent::by_id(keyed);

        let result = SessionRunner::default().run(&items, Difficulty::Easy, &mut respondent, &NoopReporter);
        assert!(!result.answers[0].correct);
        assert_eq!(result.answers[0].answer, None);
        assert!(result.answers[1].correct);
    }

    #[test]
    fn respondent_errors_score_as_incorrect() {
        let items = vec![item("a", Category::Attention, "x")];
        let result = SessionRunner::new(ScoringConfig::default())
            .with_source("basics")
            .run(&items, Difficulty::Hard, &mut FailingRespondent, &NoopReporter);

        assert_eq!(result.overall, 0.0);
        assert!(!result.answers[0].correct);
        assert_eq!(result.source.as_deref(), Some("basics"));
        assert_eq!(result.difficulty, Difficulty::Hard);
    }

    #[test]
    fn presentation_time_is_not_response_time() {
        let items = vec![item("a", Category::Attention, "x")];
        let result = SessionRunner::default().run(&items, Difficulty::Easy, &mut SlowReader, &NoopReporter);

        assert!(result.answers[0].correct);
        assert!(result.answers[0].response_ms.unwrap() < 300);
        assert!(result.elapsed_ms >= 300);
    }
}
