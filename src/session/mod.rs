//! Practice session engine
//!
//! Draws a shuffled, fixed-length run of questions from the repository, walks
//! the learner through them one at a time and writes every submitted answer
//! through to the progress store. Calls that make no sense in the current
//! state are ignored rather than reported; the presentation layer reads the
//! guard flags to decide which actions to offer.

pub mod summary;

use std::time::Instant;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bank::{MAX_HINT_TIER, Question, Repository};
use crate::progress::{FeedbackLog, FeedbackReport, ProgressStore, StoreState};
pub use summary::{TopicSummary, summarize, summarize_all, weakness_score};

/// Number of questions drawn per session unless configured otherwise
pub const DEFAULT_SESSION_SIZE: usize = 10;

/// Where the engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No repository yet, or no session started
    Loading,
    /// Questions remain
    InProgress,
    /// Cursor has reached the session length
    Finished,
}

/// Transient state for the question on screen
#[derive(Debug, Clone)]
struct Interaction {
    selection: Option<char>,
    submitted: bool,
    correct: bool,
    hint_tier: u8,
    shown_at: Instant,
}

impl Default for Interaction {
    fn default() -> Self {
        Self { selection: None, submitted: false, correct: false, hint_tier: 0, shown_at: Instant::now() }
    }
}

/// Drives one practice session at a time
#[derive(Debug)]
pub struct SessionEngine {
    repository: Option<Repository>,
    store: ProgressStore,
    feedback: FeedbackLog,
    progress: StoreState,
    session: Vec<String>,
    started: bool,
    index: usize,
    interaction: Interaction,
    session_size: usize,
    rng: StdRng,
}

impl SessionEngine {
    /// Create an engine backed by the given durable stores
    pub fn new(store: ProgressStore, feedback: FeedbackLog) -> Self {
        let progress = store.load();
        Self {
            repository: None,
            store,
            feedback,
            progress,
            session: Vec::new(),
            started: false,
            index: 0,
            interaction: Interaction::default(),
            session_size: DEFAULT_SESSION_SIZE,
            rng: StdRng::from_entropy(),
        }
    }

    /// Override the number of questions per session
    pub fn with_session_size(mut self, size: usize) -> Self {
        self.session_size = size;
        self
    }

    /// Use a specific random source (seeded in tests)
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Make a loaded repository available for sessions
    pub fn attach_repository(&mut self, repository: Repository) {
        self.repository = Some(repository);
    }

    pub fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.repository.is_none() || !self.started {
            Phase::Loading
        } else if self.index >= self.session.len() {
            Phase::Finished
        } else {
            Phase::InProgress
        }
    }

    /// Draw a new shuffled session, discarding the previous one
    pub fn start_session(&mut self) {
        let Some(repository) = &self.repository else {
            tracing::warn!("Cannot start a session before questions are loaded");
            return;
        };

        let mut ids = repository.ids();
        shuffle(&mut ids, &mut self.rng);
        ids.truncate(self.session_size.min(ids.len()));

        tracing::info!("Starting session with {} questions", ids.len());
        self.session = ids;
        self.index = 0;
        self.started = true;
        self.interaction = Interaction::default();
    }

    /// Question currently on screen, if any
    pub fn current_question(&self) -> Option<&Question> {
        let id = self.session.get(self.index)?;
        self.repository.as_ref()?.get(id)
    }

    /// Zero-based cursor into the session
    pub fn position(&self) -> usize {
        self.index
    }

    /// Number of questions in the session
    pub fn len(&self) -> usize {
        self.session.len()
    }

    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    pub fn session_ids(&self) -> &[String] {
        &self.session
    }

    pub fn selection(&self) -> Option<char> {
        self.interaction.selection
    }

    pub fn is_submitted(&self) -> bool {
        self.interaction.submitted
    }

    /// Whether the submitted answer was right (false before submission)
    pub fn is_correct(&self) -> bool {
        self.interaction.correct
    }

    pub fn hint_tier(&self) -> u8 {
        self.interaction.hint_tier
    }

    /// Latest snapshot of the progress store
    pub fn progress(&self) -> &StoreState {
        &self.progress
    }

    /// Ranked topic report for the current session's questions
    pub fn summary(&self) -> Vec<TopicSummary> {
        summarize(&self.progress, &self.session)
    }

    /// Choose an option for the current question
    pub fn select_option(&mut self, letter: char) {
        if self.interaction.submitted || self.current_question().is_none() {
            return;
        }
        self.interaction.selection = Some(letter);
    }

    /// Score the selection and record the attempt
    pub fn submit(&mut self) {
        if self.interaction.submitted {
            return;
        }
        let Some(letter) = self.interaction.selection else {
            return;
        };
        let Some(question) = self.current_question().cloned() else {
            return;
        };

        let correct = question.is_correct(letter);
        let elapsed = self.interaction.shown_at.elapsed().as_secs().max(1);
        let hints_used = u32::from(self.interaction.hint_tier);

        self.interaction.submitted = true;
        self.interaction.correct = correct;

        match self.store.record_attempt(&question, correct, hints_used, elapsed) {
            Ok(state) => self.progress = state,
            Err(e) => tracing::error!("Failed to record attempt for {}: {}", question.id, e),
        }
    }

    /// Reveal the next hint tier, up to the maximum
    pub fn request_hint(&mut self) {
        if self.current_question().is_none() {
            return;
        }
        if self.interaction.hint_tier < MAX_HINT_TIER {
            self.interaction.hint_tier += 1;
        }
    }

    /// Move to the next question, or finish the session after the last one
    pub fn next_question(&mut self) {
        if self.index + 1 < self.session.len() {
            self.index += 1;
        } else {
            self.index = self.session.len();
        }
        self.interaction = Interaction::default();
    }

    /// Delete all attempt history
    pub fn reset_progress(&mut self) {
        match self.store.reset() {
            Ok(state) => self.progress = state,
            Err(e) => tracing::error!("Failed to reset progress: {}", e),
        }
    }

    /// File a free-text report against the current question.
    ///
    /// Returns whether a report was written.
    pub fn report_issue(&self, note: &str) -> bool {
        let note = note.trim();
        if note.is_empty() {
            return false;
        }
        let Some(question) = self.current_question() else {
            return false;
        };

        let report = FeedbackReport {
            timestamp: Utc::now(),
            question_id: question.id.clone(),
            unit: question.unit.clone(),
            topic: question.topic.clone(),
            note: note.to_string(),
        };

        match self.feedback.append(report) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to save feedback: {}", e);
                false
            }
        }
    }
}

/// Fisher-Yates: walk down from the last index, swapping with a uniform pick in `[0, i]`
fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Answer, Bank, LoadError, Prompt};
    use proptest::prelude::*;
    use serde_json::{Value, json};
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn record(id: usize, topic: &str) -> Value {
        serde_json::to_value(Question {
            id: format!("q{id}"),
            unit: "U1".into(),
            topic: topic.into(),
            prompt: Prompt {
                stem: format!("Question {id}"),
                options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
                ..Default::default()
            },
            answer: Answer { mcq_key: "B".into() },
            ..Default::default()
        })
        .unwrap()
    }

    fn repository(size: usize) -> Repository {
        let records = (0..size).map(|i| record(i, "Forces")).collect();
        Repository::from_banks(vec![Bank { source: PathBuf::from("bank.json"), records }]).unwrap()
    }

    fn engine(dir: &TempDir, pool: usize) -> SessionEngine {
        let mut engine =
            SessionEngine::new(ProgressStore::new(dir.path()), FeedbackLog::new(dir.path()))
                .with_rng(StdRng::seed_from_u64(7));
        engine.attach_repository(repository(pool));
        engine
    }

    fn answer(engine: &mut SessionEngine, letter: char) {
        engine.select_option(letter);
        engine.submit();
    }

    #[test]
    fn engine_is_loading_until_session_starts() {
        let dir = TempDir::new().unwrap();
        let mut engine =
            SessionEngine::new(ProgressStore::new(dir.path()), FeedbackLog::new(dir.path()));
        assert_eq!(engine.phase(), Phase::Loading);

        engine.start_session();
        assert_eq!(engine.phase(), Phase::Loading);
        assert!(engine.current_question().is_none());

        engine.attach_repository(repository(3));
        assert_eq!(engine.phase(), Phase::Loading);
        engine.start_session();
        assert_eq!(engine.phase(), Phase::InProgress);
    }

    #[test]
    fn session_is_capped_at_ten() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 25);
        engine.start_session();

        assert_eq!(engine.len(), 10);
        let unique: HashSet<&String> = engine.session_ids().iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn session_size_is_configurable() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 25).with_session_size(4);
        engine.start_session();
        assert_eq!(engine.len(), 4);
    }

    #[test]
    fn zero_size_session_is_immediately_finished() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 3).with_session_size(0);
        engine.start_session();
        assert_eq!(engine.phase(), Phase::Finished);
        assert!(engine.current_question().is_none());
    }

    #[test]
    fn scenario_small_pool_runs_to_finish() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 3);
        engine.start_session();
        assert_eq!(engine.len(), 3);

        for _ in 0..3 {
            assert_eq!(engine.phase(), Phase::InProgress);
            answer(&mut engine, 'B');
            engine.next_question();
        }

        assert_eq!(engine.phase(), Phase::Finished);
        assert_eq!(engine.position(), 3);

        // Advancing again stays at the end
        engine.next_question();
        assert_eq!(engine.position(), 3);
    }

    #[test]
    fn scenario_wrong_answer_then_right_answer() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 1);
        engine.start_session();
        let id = engine.session_ids()[0].clone();

        engine.request_hint();
        engine.request_hint();
        answer(&mut engine, 'A');
        assert!(engine.is_submitted());
        assert!(!engine.is_correct());

        let record = engine.progress().get(&id).unwrap().clone();
        assert_eq!(record.times, 1);
        assert_eq!(record.correct_count, 0);
        assert_eq!(record.hints_total, 2);
        assert!(!record.last_was_correct);
        assert_eq!(record.last_hints_used, 2);
        assert_eq!(weakness_score(&record), 2);

        engine.start_session();
        answer(&mut engine, 'B');
        assert!(engine.is_correct());

        let record = engine.progress().get(&id).unwrap().clone();
        assert_eq!(record.times, 2);
        assert_eq!(record.correct_count, 1);
        assert_eq!(record.hints_total, 2);
        assert!(record.last_was_correct);
        assert_eq!(record.last_hints_used, 0);

        let summary = engine.summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].weakness_sum, 0);
    }

    #[test]
    fn scenario_reset_empties_summary() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 3);
        engine.start_session();
        answer(&mut engine, 'A');
        assert_eq!(engine.summary().len(), 1);

        engine.reset_progress();
        assert!(engine.progress().is_empty());
        assert!(engine.summary().is_empty());
        assert!(ProgressStore::new(dir.path()).load().is_empty());
    }

    #[tokio::test]
    async fn scenario_missing_bank_blocks_sessions() {
        let dir = TempDir::new().unwrap();
        let index = dir.path().join("index.json");
        std::fs::write(&index, json!({"files": ["banks/unit1.json"]}).to_string()).unwrap();

        let err = Repository::load(&index).await.unwrap_err();
        assert!(matches!(err, LoadError::BankRead { .. }));
        assert!(err.to_string().contains("banks/unit1.json"));

        let mut engine =
            SessionEngine::new(ProgressStore::new(dir.path()), FeedbackLog::new(dir.path()));
        engine.start_session();
        assert_eq!(engine.phase(), Phase::Loading);
        assert!(engine.current_question().is_none());
    }

    #[test]
    fn submit_twice_records_once() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 2);
        engine.start_session();
        let id = engine.session_ids()[0].clone();

        answer(&mut engine, 'B');
        engine.submit();
        engine.select_option('A');
        engine.submit();

        assert_eq!(engine.selection(), Some('B'));
        assert_eq!(engine.progress().get(&id).unwrap().times, 1);
    }

    #[test]
    fn submit_without_selection_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 2);
        engine.start_session();

        engine.submit();
        assert!(!engine.is_submitted());
        assert!(engine.progress().is_empty());
    }

    #[test]
    fn elapsed_time_is_at_least_one_second() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 2);
        engine.start_session();
        let first = engine.session_ids()[0].clone();

        answer(&mut engine, 'B');
        assert!(engine.progress().get(&first).unwrap().time_total_sec >= 1);

        engine.next_question();
        let second = engine.session_ids()[1].clone();
        engine.interaction.shown_at =
            Instant::now().checked_sub(Duration::from_secs(5)).unwrap();
        answer(&mut engine, 'B');
        assert!(engine.progress().get(&second).unwrap().time_total_sec >= 5);
    }

    #[test]
    fn hints_cap_at_three_and_reset_on_next() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 2);
        engine.start_session();

        for _ in 0..10 {
            engine.request_hint();
        }
        assert_eq!(engine.hint_tier(), 3);

        engine.next_question();
        assert_eq!(engine.hint_tier(), 0);
        assert_eq!(engine.selection(), None);
        assert!(!engine.is_submitted());
    }

    #[test]
    fn hint_count_is_recorded_with_attempt() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 1);
        engine.start_session();
        let id = engine.session_ids()[0].clone();

        engine.request_hint();
        answer(&mut engine, 'B');

        let record = engine.progress().get(&id).unwrap();
        assert_eq!(record.last_hints_used, 1);
        assert_eq!(weakness_score(record), 1);
    }

    #[test]
    fn report_issue_tags_current_question() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 2);
        engine.start_session();
        let id = engine.session_ids()[0].clone();

        assert!(!engine.report_issue("   "));
        assert!(engine.report_issue("Option C is duplicated"));

        let raw = std::fs::read_to_string(dir.path().join("feedback.json")).unwrap();
        let reports: Vec<FeedbackReport> = serde_json::from_str(&raw).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].question_id, id);
        assert_eq!(reports[0].topic, "Forces");
    }

    #[test]
    fn progress_survives_new_engine() {
        let dir = TempDir::new().unwrap();
        let mut engine = engine(&dir, 1);
        engine.start_session();
        answer(&mut engine, 'B');

        let reopened = engine_with_existing(&dir);
        assert_eq!(reopened.progress().len(), 1);
    }

    fn engine_with_existing(dir: &TempDir) -> SessionEngine {
        SessionEngine::new(ProgressStore::new(dir.path()), FeedbackLog::new(dir.path()))
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut StdRng::seed_from_u64(1));
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn sessions_are_bounded_and_unique(pool in 1usize..30, seed in any::<u64>()) {
            let dir = TempDir::new().unwrap();
            let mut engine =
                SessionEngine::new(ProgressStore::new(dir.path()), FeedbackLog::new(dir.path()))
                    .with_rng(StdRng::seed_from_u64(seed));
            let repo = repository(pool);
            let known: HashSet<String> = repo.ids().into_iter().collect();
            engine.attach_repository(repo);
            engine.start_session();

            prop_assert_eq!(engine.len(), pool.min(DEFAULT_SESSION_SIZE));
            let unique: HashSet<&String> = engine.session_ids().iter().collect();
            prop_assert_eq!(unique.len(), engine.len());
            prop_assert!(engine.session_ids().iter().all(|id| known.contains(id)));
        }

        #[test]
        fn hint_tier_never_exceeds_cap(requests in 0usize..20) {
            let dir = TempDir::new().unwrap();
            let mut engine = engine(&dir, 2);
            engine.start_session();
            for _ in 0..requests {
                engine.request_hint();
            }
            prop_assert_eq!(usize::from(engine.hint_tier()), requests.min(3));
        }
    }
}
