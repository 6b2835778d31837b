//! Game service: resolves sessions and runs engine operations under their lock.

use crate::error::{ApiError, StoreError};
use crate::store::SessionStore;
use chrono::Utc;
use lingo_core::{
    Engine, GuessOutcome, PassOutcome, SessionId, SessionSnapshot, StartFinalResponse,
    StartResponse, Word, WordLength, WordSource, normalize_guess,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Shared word source handle.
pub type SharedWords = Arc<dyn WordSource + Send + Sync>;

/// Entry point for every game operation.
#[derive(Clone)]
pub struct GameService {
    store: SessionStore,
    words: SharedWords,
    engine: Engine,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("store", &self.store)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Unparseable ids are reported the same way as unknown ones.
fn parse_id(raw: &str) -> Result<SessionId, StoreError> {
    raw.parse()
        .map_err(|_| StoreError::SessionNotFound(raw.to_string()))
}

impl GameService {
    /// Creates a service with an empty session store.
    #[instrument(skip(words))]
    pub fn new(words: SharedWords, engine: Engine) -> Self {
        Self::with_store(SessionStore::new(), words, engine)
    }

    /// Creates a service over an existing store.
    #[instrument(skip(store, words))]
    pub fn with_store(store: SessionStore, words: SharedWords, engine: Engine) -> Self {
        info!(rules = ?engine.rules(), "Creating game service");
        Self {
            store,
            words,
            engine,
        }
    }

    /// Returns the session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Starts a classic game in a new session.
    #[instrument(skip(self))]
    pub fn start(&self) -> StartResponse {
        let now = Utc::now();
        let (session, response) = self
            .engine
            .start(SessionId::random(), self.words.as_ref(), now);
        self.store.create(session, now);
        info!(session_id = %response.session_id, "Game started");
        response
    }

    /// Submits a guess.
    ///
    /// # Errors
    ///
    /// Unknown session, or any [`lingo_core::EngineError`].
    #[instrument(skip(self, guess))]
    pub fn submit_guess(&self, session_id: &str, guess: &str) -> Result<GuessOutcome, ApiError> {
        let id = parse_id(session_id)?;
        let words = self.words.as_ref();
        let outcome = self.store.with_lock(&id, Utc::now(), |session| {
            self.engine.submit_guess(session, words, guess)
        })??;
        Ok(outcome)
    }

    /// Reports that the client's timer ran out.
    ///
    /// # Errors
    ///
    /// Unknown session, or a finished round or game.
    #[instrument(skip(self))]
    pub fn timeout(&self, session_id: &str) -> Result<GuessOutcome, ApiError> {
        let id = parse_id(session_id)?;
        let outcome = self
            .store
            .with_lock(&id, Utc::now(), |session| self.engine.timeout(session))??;
        Ok(outcome)
    }

    /// Switches a session into final mode.
    ///
    /// # Errors
    ///
    /// Unknown session.
    #[instrument(skip(self))]
    pub fn start_final(&self, session_id: &str) -> Result<StartFinalResponse, ApiError> {
        let id = parse_id(session_id)?;
        let now = Utc::now();
        let words = self.words.as_ref();
        let response = self.store.with_lock(&id, now, |session| {
            self.engine.start_final(session, words, now)
        })?;
        Ok(response)
    }

    /// Skips the active final-mode word.
    ///
    /// # Errors
    ///
    /// Unknown session, or any pass precondition failure.
    #[instrument(skip(self))]
    pub fn pass(&self, session_id: &str) -> Result<PassOutcome, ApiError> {
        let id = parse_id(session_id)?;
        let words = self.words.as_ref();
        let outcome = self
            .store
            .with_lock(&id, Utc::now(), |session| self.engine.pass(session, words))??;
        Ok(outcome)
    }

    /// Returns a read-only view of a session.
    ///
    /// # Errors
    ///
    /// Unknown session.
    #[instrument(skip(self))]
    pub fn snapshot(&self, session_id: &str) -> Result<SessionSnapshot, ApiError> {
        let id = parse_id(session_id)?;
        let session = self.store.get(&id, Utc::now())?;
        Ok(SessionSnapshot::from(&session))
    }

    /// Draws a random word of `letters` letters.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotFound`] for lengths outside 4–7.
    #[instrument(skip(self))]
    pub fn random_word(&self, letters: usize) -> Result<Word, ApiError> {
        let length = WordLength::try_from(letters).map_err(|e| ApiError::NotFound(e.to_string()))?;
        Ok(self.words.random_word(length))
    }

    /// Returns true if `raw` is a dictionary word once normalized.
    #[instrument(skip(self, raw))]
    pub fn check_word(&self, raw: &str) -> bool {
        let Some(word) = normalize_guess(raw) else {
            return false;
        };
        let is_valid = WordLength::try_from(word.chars().count())
            .is_ok_and(|length| self.words.is_valid_word(length, &word));
        debug!(word = %word, is_valid, "Checked word");
        is_valid
    }
}
