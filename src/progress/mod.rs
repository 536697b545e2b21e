//! Durable learner state: attempt history and issue reports

pub mod feedback;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use feedback::{FeedbackLog, FeedbackReport};
pub use store::{AttemptRecord, ProgressStore, StoreState};

/// Errors writing durable state
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State could not be serialized
    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}
