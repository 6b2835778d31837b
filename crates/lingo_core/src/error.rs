//! Error types for the game engine and the word source.

use derive_more::Display;
use tracing::instrument;

/// Rejection of an engine operation.
///
/// These are client input errors: the session is left untouched when one is
/// returned. Game-rule failures (invalid word, repeated guess, exhausted
/// attempts, timeout) are not errors; they are reported as outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineError {
    /// The guess was missing, not a string, or blank after trimming.
    #[display("Invalid guess payload")]
    InvalidGuessPayload,

    /// Passing requires at least one recorded guess on the active word.
    #[display("Pass not allowed: make at least one guess on this word first")]
    PassNotAllowed,

    /// The operation only exists in final mode.
    #[display("Operation is only available in final mode")]
    NotInFinalMode,

    /// The classic word queue is exhausted.
    #[display("Round is finished, no more words in the classic queue")]
    RoundFinished,

    /// The final game was already won or ran out of time.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for EngineError {}

/// A word length outside the supported 4–7 letter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Unsupported word length: {}", _0)]
pub struct UnsupportedLength(pub usize);

impl std::error::Error for UnsupportedLength {}

/// Dictionary loading error with location tracking.
#[derive(Debug, Clone, Display, derive_more::Error)]
#[display("Dictionary error: {} at {}:{}", message, file, line)]
pub struct DictionaryError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DictionaryError {
    /// Creates a new dictionary error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for DictionaryError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for DictionaryError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}
