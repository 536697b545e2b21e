//! Question banks: model and loading

pub mod loader;
pub mod model;

pub use loader::{Bank, LoadError, Repository};
pub use model::{Answer, HintLine, MAX_HINT_TIER, Prompt, Question, SocraticHints, WorkedStep};
