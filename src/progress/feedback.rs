//! Append-only issue reports
//!
//! Learners can flag a question as wrong or confusing. Reports are only ever
//! written here; nothing in the trainer reads them back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;
use super::store::write_json;

/// File name of the feedback document inside the data directory
pub const FEEDBACK_FILE: &str = "feedback.json";

/// A single free-text report about a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackReport {
    pub timestamp: DateTime<Utc>,
    pub question_id: String,
    pub unit: String,
    pub topic: String,
    pub note: String,
}

/// Durable feedback log rooted in a data directory
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(FEEDBACK_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a report, starting a fresh log if the existing one is unreadable
    pub fn append(&self, report: FeedbackReport) -> Result<(), StoreError> {
        let mut reports = self.read_existing();
        reports.push(report);
        write_json(&self.path, &reports)
    }

    fn read_existing(&self) -> Vec<FeedbackReport> {
        let Ok(contents) = std::fs::read_to_string(&self.path) else {
            return Vec::new();
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Discarding corrupt feedback log {:?}: {}", self.path, e);
            Vec::new()
        })
    }
}
