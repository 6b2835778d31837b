//! Server error types and their HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use derive_more::{Display, From};
use lingo_core::{DictionaryError, EngineError};
use serde::Serialize;
use tracing::{instrument, warn};

/// Configuration error.
#[derive(Debug, Clone, Display, derive_more::Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
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

/// Session store error.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StoreError {
    /// No session with the given id is stored.
    #[display("Session not found: {}", _0)]
    SessionNotFound(String),
}

impl std::error::Error for StoreError {}

/// Error returned by HTTP handlers.
#[derive(Debug, Display, From)]
pub enum ApiError {
    /// Unknown or expired session.
    #[display("{}", _0)]
    Store(StoreError),

    /// Engine rejected the operation.
    #[display("{}", _0)]
    Engine(EngineError),

    /// Malformed request.
    #[display("{}", _0)]
    #[from(skip)]
    BadRequest(String),

    /// Resource does not exist.
    #[display("{}", _0)]
    #[from(skip)]
    NotFound(String),
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Store(StoreError::SessionNotFound(_)) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND")
            }
            Self::Engine(EngineError::InvalidGuessPayload) => {
                (StatusCode::BAD_REQUEST, "INVALID_GUESS_PAYLOAD")
            }
            Self::Engine(EngineError::PassNotAllowed) => {
                (StatusCode::BAD_REQUEST, "PASS_NOT_ALLOWED")
            }
            Self::Engine(EngineError::NotInFinalMode) => {
                (StatusCode::BAD_REQUEST, "NOT_IN_FINAL_MODE")
            }
            Self::Engine(EngineError::RoundFinished) => (StatusCode::CONFLICT, "ROUND_FINISHED"),
            Self::Engine(EngineError::GameOver) => (StatusCode::CONFLICT, "GAME_OVER"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        warn!(status = %status, code, error = %self, "Request rejected");

        let body = ErrorResponse {
            error: self.to_string(),
            code,
        };
        (status, Json(body)).into_response()
    }
}

/// Startup error: an unusable dictionary or listener.
#[derive(Debug, Display, From)]
pub enum ServerError {
    /// Dictionary could not be loaded.
    #[display("{}", _0)]
    Dictionary(DictionaryError),

    /// Listener could not be bound or served.
    #[display("Server I/O error: {}", _0)]
    Io(std::io::Error),
}

impl std::error::Error for ServerError {}
