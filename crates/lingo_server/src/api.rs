//! REST routes.

use crate::error::ApiError;
use crate::service::GameService;
use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::Request,
    response::Response,
    routing::{get, post},
};
use lingo_core::{
    EngineError, GuessOutcome, PassOutcome, SessionSnapshot, StartFinalResponse, StartResponse,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument};

/// Body of every session-scoped request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Target session.
    #[serde(default)]
    pub session_id: String,
}

/// Body of a guess request. `guess` is kept raw so that a missing or
/// non-string guess can be rejected with a precise error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessRequest {
    /// Target session.
    #[serde(default)]
    pub session_id: String,
    /// The guessed word.
    #[serde(default)]
    pub guess: Option<serde_json::Value>,
}

/// Query of `GET /api/word`.
#[derive(Debug, Deserialize)]
pub struct WordQuery {
    /// Requested number of letters.
    pub len: usize,
}

/// Response of `GET /api/word`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordResponse {
    /// A random dictionary word.
    pub word: String,
}

/// Body of `POST /api/check`.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Word to look up.
    #[serde(default)]
    pub word: Option<String>,
}

/// Response of `POST /api/check`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    /// Whether the word is in the dictionary.
    pub is_valid: bool,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Builds the application router with request logging and permissive CORS.
pub fn router(service: GameService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/game/start", post(start))
        .route("/api/game/guess", post(guess))
        .route("/api/game/timeout", post(timeout))
        .route("/api/game/start-final", post(start_final))
        .route("/api/game/pass", post(pass))
        .route("/api/game/{session_id}", get(snapshot))
        .route("/api/word", get(random_word))
        .route("/api/check", post(check_word))
        .with_state(service)
        .layer(
            ServiceBuilder::new()
                .map_request(|req: Request<Body>| {
                    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                    req
                })
                .map_response(|res: Response| {
                    debug!(status = %res.status(), "Response sent");
                    res
                })
                .layer(cors),
        )
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(service))]
async fn start(State(service): State<GameService>) -> Json<StartResponse> {
    Json(service.start())
}

#[instrument(skip(service, payload))]
async fn guess(
    State(service): State<GameService>,
    payload: Result<Json<GuessRequest>, JsonRejection>,
) -> Result<Json<GuessOutcome>, ApiError> {
    let request = body(payload)?;
    let Some(serde_json::Value::String(guess)) = request.guess else {
        return Err(EngineError::InvalidGuessPayload.into());
    };
    Ok(Json(service.submit_guess(&request.session_id, &guess)?))
}

#[instrument(skip(service, payload))]
async fn timeout(
    State(service): State<GameService>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<GuessOutcome>, ApiError> {
    let request = body(payload)?;
    Ok(Json(service.timeout(&request.session_id)?))
}

#[instrument(skip(service, payload))]
async fn start_final(
    State(service): State<GameService>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<StartFinalResponse>, ApiError> {
    let request = body(payload)?;
    Ok(Json(service.start_final(&request.session_id)?))
}

#[instrument(skip(service, payload))]
async fn pass(
    State(service): State<GameService>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Json<PassOutcome>, ApiError> {
    let request = body(payload)?;
    Ok(Json(service.pass(&request.session_id)?))
}

#[instrument(skip(service))]
async fn snapshot(
    State(service): State<GameService>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    Ok(Json(service.snapshot(&session_id)?))
}

#[instrument(skip(service))]
async fn random_word(
    State(service): State<GameService>,
    Query(query): Query<WordQuery>,
) -> Result<Json<WordResponse>, ApiError> {
    let word = service.random_word(query.len)?;
    Ok(Json(WordResponse {
        word: word.to_string(),
    }))
}

#[instrument(skip(service, payload))]
async fn check_word(
    State(service): State<GameService>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<CheckResponse>, ApiError> {
    let request = body(payload)?;
    let word = request
        .word
        .ok_or_else(|| ApiError::BadRequest("Missing word".to_string()))?;
    Ok(Json(CheckResponse {
        is_valid: service.check_word(&word),
    }))
}
