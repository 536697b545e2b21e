//! quizdrill - a terminal multiple-choice quiz trainer
//!
//! Loads question banks from JSON, runs shuffled fixed-length practice
//! sessions, keeps a per-question attempt history and ranks topics by how much
//! work they still need.

pub mod app;
pub mod bank;
pub mod config;
pub mod progress;
pub mod session;
pub mod text;
pub mod theme;
pub mod ui;

pub use app::App;
pub use bank::{LoadError, Question, Repository};
pub use config::Config;
pub use progress::{ProgressStore, StoreState};
pub use session::{Phase, SessionEngine, TopicSummary};
pub use theme::Theme;
