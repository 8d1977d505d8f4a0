//! Error types for loading and normalizing questions.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a question set. The session never starts when this occurs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question provider unreachable: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("question provider returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question provider rejected the request (response code {0})")]
    Provider(u8),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed question payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no usable questions available")]
    Empty,
}

/// A single raw record that cannot become a playable question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Absent or blank.
    #[error("record has no correct answer")]
    MissingCorrectAnswer,
    #[error("record has {found} incorrect answers, exactly 3 are required")]
    IncorrectCount { found: usize },
    #[error("record has a blank incorrect answer")]
    BlankAnswer,
    /// Compared after decoding.
    #[error("answer {0:?} appears more than once")]
    DuplicateAnswer(String),
}
