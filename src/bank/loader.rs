//! Question bank loading
//!
//! Reads the bank index, then every bank it lists, strictly in order, and merges
//! them into one deduplicated [`Repository`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::model::Question;

/// Errors that abort a repository load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read bank index {path:?}: {source}")]
    IndexRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse bank index {path:?}: {source}")]
    IndexParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bank index {path:?} lists no files")]
    EmptyIndex { path: PathBuf },

    #[error("Failed to read question bank {path:?}: {source}")]
    BankRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse question bank {path:?}: {source}")]
    BankParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Question bank {path:?} contains no questions")]
    EmptyBank { path: PathBuf },

    #[error("No usable questions after merging all banks")]
    NoQuestions,
}

/// Bank index document: `{ "files": ["a.json", ...] }`
#[derive(Debug, Deserialize)]
struct BankIndex {
    #[serde(default)]
    files: Vec<String>,
}

/// A bank is either a bare array or an object wrapping one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BankDocument {
    List(Vec<Value>),
    Wrapped {
        #[serde(default)]
        questions: Vec<Value>,
    },
}

impl BankDocument {
    fn into_records(self) -> Vec<Value> {
        match self {
            BankDocument::List(records) => records,
            BankDocument::Wrapped { questions } => questions,
        }
    }
}

/// A named source of raw question records
#[derive(Debug, Clone)]
pub struct Bank {
    pub source: PathBuf,
    pub records: Vec<Value>,
}

/// Merged, deduplicated question collection
#[derive(Debug, Clone, Default)]
pub struct Repository {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
}

impl Repository {
    /// Load every bank listed in the index at `index_path`
    pub async fn load(index_path: &Path) -> Result<Self, LoadError> {
        let contents = tokio::fs::read_to_string(index_path)
            .await
            .map_err(|source| LoadError::IndexRead { path: index_path.to_path_buf(), source })?;
        let index: BankIndex = serde_json::from_str(&contents)
            .map_err(|source| LoadError::IndexParse { path: index_path.to_path_buf(), source })?;

        if index.files.is_empty() {
            return Err(LoadError::EmptyIndex { path: index_path.to_path_buf() });
        }

        let base_dir = index_path.parent().unwrap_or_else(|| Path::new(""));
        let mut banks = Vec::with_capacity(index.files.len());

        for file in &index.files {
            let path = base_dir.join(file);
            banks.push(read_bank(&path).await?);
        }

        let repo = Self::from_banks(banks)?;
        tracing::info!("Loaded {} questions from {:?}", repo.len(), index_path);
        Ok(repo)
    }

    /// Merge banks in order; the first occurrence of an id wins
    pub fn from_banks(banks: Vec<Bank>) -> Result<Self, LoadError> {
        let mut repo = Self::default();

        for bank in banks {
            for record in bank.records {
                let Some(question) = decode_record(record, &bank.source) else {
                    continue;
                };

                if repo.by_id.contains_key(&question.id) {
                    tracing::debug!("Skipping duplicate question {} in {:?}", question.id, bank.source);
                    continue;
                }

                repo.by_id.insert(question.id.clone(), repo.questions.len());
                repo.questions.push(question);
            }
        }

        if repo.questions.is_empty() {
            return Err(LoadError::NoQuestions);
        }

        Ok(repo)
    }

    /// Number of questions in the pool
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&i| &self.questions[i])
    }

    /// All ids, in first-seen order
    pub fn ids(&self) -> Vec<String> {
        self.questions.iter().map(|q| q.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

/// Read and validate one bank file
async fn read_bank(path: &Path) -> Result<Bank, LoadError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::BankRead { path: path.to_path_buf(), source })?;
    let document: BankDocument = serde_json::from_str(&contents)
        .map_err(|source| LoadError::BankParse { path: path.to_path_buf(), source })?;

    let records = document.into_records();
    if records.is_empty() {
        return Err(LoadError::EmptyBank { path: path.to_path_buf() });
    }

    Ok(Bank { source: path.to_path_buf(), records })
}

/// Decode one raw record, dropping it if it has no usable id or an unreadable shape
fn decode_record(record: Value, source: &Path) -> Option<Question> {
    let has_id = record.get("id").and_then(Value::as_str).is_some_and(|id| !id.is_empty());
    if !has_id {
        tracing::warn!("Dropping question without an id in {:?}", source);
        return None;
    }

    match serde_json::from_value::<Question>(record) {
        Ok(question) => Some(question),
        Err(e) => {
            tracing::warn!("Dropping malformed question in {:?}: {}", source, e);
            None
        }
    }
}
