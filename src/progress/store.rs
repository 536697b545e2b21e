//! Attempt history persistence
//!
//! The whole store lives in one JSON document (`progress.json`) and every write
//! is a full load, mutate, save cycle returning the new snapshot.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::bank::Question;

/// File name of the progress document inside the data directory
pub const PROGRESS_FILE: &str = "progress.json";

/// Cumulative and last-attempt statistics for one question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttemptRecord {
    /// Attempts so far
    pub times: u32,
    pub correct_count: u32,
    pub hints_total: u32,
    pub time_total_sec: u64,

    pub last_was_correct: bool,
    pub last_hints_used: u32,
    pub last_attempt_iso: Option<DateTime<Utc>>,

    /// Copied from the question at the time of the latest attempt
    pub unit: String,
    pub topic: String,
}

/// Snapshot of all attempt records, keyed by question id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreState {
    pub records: BTreeMap<String, AttemptRecord>,
}

impl StoreState {
    pub fn get(&self, question_id: &str) -> Option<&AttemptRecord> {
        self.records.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fold one attempt into the record for `question`
    pub fn apply_attempt(
        &mut self,
        question: &Question,
        correct: bool,
        hints_used: u32,
        time_spent_sec: u64,
        at: DateTime<Utc>,
    ) {
        let record = self.records.entry(question.id.clone()).or_default();

        record.times += 1;
        if correct {
            record.correct_count += 1;
        }
        record.hints_total += hints_used;
        record.time_total_sec += time_spent_sec;

        record.last_was_correct = correct;
        record.last_hints_used = hints_used;
        record.last_attempt_iso = Some(at);

        record.unit = question.unit.clone();
        record.topic = question.topic.clone();
    }
}

/// Durable progress storage rooted in a data directory
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Store whose document lives at `<dir>/progress.json`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(PROGRESS_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored state; missing or unreadable data yields an empty store
    pub fn load(&self) -> StoreState {
        if !self.path.exists() {
            return StoreState::default();
        }

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read progress from {:?}: {}", self.path, e);
                return StoreState::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring corrupt progress in {:?}: {}", self.path, e);
            StoreState::default()
        })
    }

    /// Overwrite the stored document with `state`
    pub fn save(&self, state: &StoreState) -> Result<(), StoreError> {
        write_json(&self.path, state)
    }

    /// Record one attempt and return the updated snapshot
    pub fn record_attempt(
        &self,
        question: &Question,
        correct: bool,
        hints_used: u32,
        time_spent_sec: u64,
    ) -> Result<StoreState, StoreError> {
        let mut state = self.load();
        state.apply_attempt(question, correct, hints_used, time_spent_sec, Utc::now());
        self.save(&state)?;

        tracing::debug!(
            "Recorded attempt for {} (correct: {}, hints: {}, {}s)",
            question.id,
            correct,
            hints_used,
            time_spent_sec
        );
        Ok(state)
    }

    /// Delete all stored progress
    pub fn reset(&self) -> Result<StoreState, StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
        }

        tracing::info!("Progress reset");
        Ok(StoreState::default())
    }
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
    }

    let contents = serde_json::to_string_pretty(value)?;

    std::fs::write(path, contents).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })
}
