//! Per-player session state and its lifecycle transitions.

use crate::length::WordLength;
use crate::scoring::Scoring;
use crate::words::{Word, WordSource};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Words per classic round.
pub const ROUND_SIZE: usize = 6;

/// Classic queue composition: round 1 is 3×4 + 3×5 letters,
/// round 2 is 3×5 + 3×6 letters.
pub const CLASSIC_LAYOUT: [(WordLength, usize); 4] = [
    (WordLength::Four, 3),
    (WordLength::Five, 3),
    (WordLength::Five, 3),
    (WordLength::Six, 3),
];

/// Opaque session identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct SessionId(uuid::Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    /// Two rounds over a fixed twelve-word queue.
    Classic,
    /// Timed deathmatch climbing from 4 to 7 letters.
    Final,
}

/// Metadata about the next active word, sent to the client as a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextWord {
    /// Letters in the word.
    pub word_length: WordLength,
    /// Revealed first letter.
    pub first_letter: char,
    /// Classic round the word belongs to.
    pub round: u8,
}

/// Result of moving the classic queue pointer forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A new word is active.
    Next(NextWord),
    /// The queue is exhausted; the classic game is over.
    Exhausted,
}

impl Advance {
    /// Returns the next word, if any.
    pub fn next_word(self) -> Option<NextWord> {
        match self {
            Self::Next(next) => Some(next),
            Self::Exhausted => None,
        }
    }
}

/// State of one player's game.
///
/// Owned by the session store and only mutated through the engine.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// Session identifier.
    id: SessionId,
    /// Current phase.
    mode: Mode,
    /// Banked score. Never decremented.
    vault: u64,
    /// Score still obtainable for the active word.
    current_word_potential: u64,
    /// Classic: the fixed queue. Final: a single slot rewritten in place.
    word_queue: Vec<Word>,
    /// Index of the active word in `word_queue`.
    current_word_index: usize,
    /// Normalized guesses made on the active word.
    guess_history: Vec<String>,
    /// Final-mode ladder rung.
    final_stage: WordLength,
    /// When the current phase started. Advisory only.
    started_at: DateTime<Utc>,
    /// Classic queue has been played through.
    round_finished: bool,
    /// Final game was won or ran out of time.
    game_over: bool,
}

impl Session {
    /// Creates a classic-mode session over a freshly drawn twelve-word queue.
    #[instrument(skip(words))]
    pub fn start_classic<W>(id: SessionId, words: &W, now: DateTime<Utc>) -> Self
    where
        W: WordSource + ?Sized,
    {
        let word_queue: Vec<Word> = CLASSIC_LAYOUT
            .iter()
            .flat_map(|&(length, count)| std::iter::repeat_n(length, count))
            .map(|length| words.random_word(length))
            .collect();

        let current_word_potential = Scoring::for_length(word_queue[0].length()).base;
        info!(session_id = %id, total_words = word_queue.len(), "Created classic session");

        Self {
            id,
            mode: Mode::Classic,
            vault: 0,
            current_word_potential,
            word_queue,
            current_word_index: 0,
            guess_history: Vec::new(),
            final_stage: WordLength::Four,
            started_at: now,
            round_finished: false,
            game_over: false,
        }
    }

    /// Returns the word currently being guessed.
    pub fn active_word(&self) -> &Word {
        &self.word_queue[self.current_word_index]
    }

    /// Classic round of the active word: 1 for the first six words, 2 after.
    pub fn round(&self) -> u8 {
        round_for_index(self.current_word_index)
    }

    /// Number of guesses recorded on the active word.
    pub fn attempts(&self) -> usize {
        self.guess_history.len()
    }

    /// Whether `guess` was already tried on the active word.
    pub fn has_guessed(&self, guess: &str) -> bool {
        self.guess_history.iter().any(|g| g == guess)
    }

    pub(crate) fn record_guess(&mut self, guess: String) {
        self.guess_history.push(guess);
    }

    /// Deducts `penalty` from the active word's potential, stopping at zero.
    pub(crate) fn apply_penalty(&mut self, penalty: u64) {
        self.current_word_potential = self.current_word_potential.saturating_sub(penalty);
    }

    /// Zeroes the active word's potential.
    pub(crate) fn forfeit_potential(&mut self) {
        self.current_word_potential = 0;
    }

    /// Adds the remaining potential to the vault and returns the amount banked.
    pub(crate) fn bank_potential(&mut self) -> u64 {
        let banked = self.current_word_potential;
        self.vault = self.vault.saturating_add(banked);
        self.current_word_potential = 0;
        banked
    }

    /// Moves the classic queue to the next word.
    ///
    /// At the last word the pointer stays put, the round is marked finished and
    /// [`Advance::Exhausted`] is returned.
    #[instrument(skip(self), fields(session_id = %self.id, index = self.current_word_index))]
    pub fn advance_to_next_word(&mut self) -> Advance {
        if self.current_word_index + 1 >= self.word_queue.len() {
            self.round_finished = true;
            info!("Classic queue exhausted");
            return Advance::Exhausted;
        }

        self.current_word_index += 1;
        self.guess_history.clear();
        let word = &self.word_queue[self.current_word_index];
        self.current_word_potential = Scoring::for_length(word.length()).base;

        let next = NextWord {
            word_length: word.length(),
            first_letter: word.first_letter(),
            round: round_for_index(self.current_word_index),
        };
        debug!(index = self.current_word_index, round = next.round, "Advanced to next word");
        Advance::Next(next)
    }

    /// Switches to final mode with `first_word` as the only slot.
    ///
    /// The vault carries over; everything else is reset.
    #[instrument(skip(self, first_word), fields(session_id = %self.id, vault = self.vault))]
    pub(crate) fn enter_final(&mut self, first_word: Word, now: DateTime<Utc>) {
        self.mode = Mode::Final;
        self.final_stage = first_word.length();
        self.word_queue = vec![first_word];
        self.current_word_index = 0;
        self.guess_history.clear();
        self.current_word_potential = 0;
        self.started_at = now;
        self.game_over = false;
        info!("Entered final mode");
    }

    /// Replaces the final-mode word in place and clears the guesses.
    pub(crate) fn replace_active_word(&mut self, word: Word) {
        self.final_stage = word.length();
        self.word_queue = vec![word];
        self.current_word_index = 0;
        self.guess_history.clear();
    }

    pub(crate) fn finish_game(&mut self) {
        self.game_over = true;
    }
}

fn round_for_index(index: usize) -> u8 {
    if index < ROUND_SIZE { 1 } else { 2 }
}
