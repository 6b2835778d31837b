//! Typed results of engine operations, shaped for the wire.
//!
//! Each `status` the client understands is its own variant carrying exactly
//! the fields that status needs.

use crate::evaluator::Verdict;
use crate::length::WordLength;
use crate::session::{Mode, NextWord, Session, SessionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a word was burned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnReason {
    /// The guess repeated an earlier guess on the same word.
    DuplicateGuess,
    /// The guess is not a dictionary word of the target length.
    InvalidWord,
    /// All attempts were used without solving the word.
    AttemptsExhausted,
    /// The client's per-word timer ran out.
    Timeout,
}

impl BurnReason {
    /// Player-facing headline for this burn.
    pub fn headline(self) -> &'static str {
        match self {
            Self::DuplicateGuess => "Repeated guess!",
            Self::InvalidWord => "Invalid word!",
            Self::AttemptsExhausted => "Out of attempts!",
            Self::Timeout => "Time is up!",
        }
    }
}

/// Response to starting a classic game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    /// New session identifier.
    pub session_id: SessionId,
    /// Always classic.
    pub mode: Mode,
    /// Always 1.
    pub round: u8,
    /// Letters in the first word.
    pub current_word_length: WordLength,
    /// Revealed first letter of the first word.
    pub first_letter: char,
    /// Size of the classic queue.
    pub total_words: usize,
    /// Always 0.
    pub total_score: u64,
}

/// Response to entering final mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartFinalResponse {
    /// Always final.
    pub mode: Mode,
    /// Overall time budget in seconds, enforced by the client.
    pub duration: u64,
    /// Revealed first letter.
    pub first_letter: char,
    /// Letters in the word (the first stage).
    pub word_length: WordLength,
    /// Vault carried over from classic mode.
    pub total_score: u64,
}

/// Outcome of a guess or a timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum GuessOutcome {
    /// Classic word solved; its potential was banked.
    Correct {
        /// Per-letter verdicts.
        result: Vec<Verdict>,
        /// Vault after banking.
        score: u64,
        /// Points banked for this word.
        earned: u64,
        /// The classic queue is exhausted.
        is_round_finished: bool,
        /// Hint for the next word, absent when the round is finished.
        #[serde(skip_serializing_if = "Option::is_none")]
        next_word: Option<NextWord>,
        /// Milliseconds the client waits before showing the next word.
        next_delay: u64,
    },
    /// Classic guess was wrong; the same word stays active.
    Wrong {
        /// Per-letter verdicts.
        result: Vec<Verdict>,
        /// Unchanged vault.
        score: u64,
        /// Potential left on this word.
        potential: u64,
        /// Guesses left before the word burns.
        attempts_left: usize,
    },
    /// Classic word burned; the queue moved on.
    Fail {
        /// Verdicts of the final attempt, when the burn followed an evaluation.
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<Vec<Verdict>>,
        /// Why the word burned.
        reason: BurnReason,
        /// Unchanged vault.
        score: u64,
        /// Player-facing explanation.
        message: String,
        /// The burned word.
        correct_word: String,
        /// The classic queue is exhausted.
        is_round_finished: bool,
        /// Hint for the next word, absent when the round is finished.
        #[serde(skip_serializing_if = "Option::is_none")]
        next_word: Option<NextWord>,
        /// Milliseconds the client waits before showing the next word.
        next_delay: u64,
    },
    /// Final stage 4–6 solved; the ladder climbs one rung.
    FinalCorrect {
        /// Per-letter verdicts.
        result: Vec<Verdict>,
        /// Reward earned at the solved stage.
        reward: u64,
        /// Player-facing reward description.
        message: String,
        /// New stage.
        next_stage: WordLength,
        /// Revealed first letter of the new word.
        first_letter: char,
        /// Letters in the new word.
        word_length: WordLength,
    },
    /// Final guess was wrong; the same word stays active.
    FinalContinue {
        /// Per-letter verdicts.
        result: Vec<Verdict>,
        /// Guesses left before the word is replaced.
        attempts_left: usize,
    },
    /// Final word burned. On a wrong guess, an invalid word or a repeat the
    /// word is replaced with another of the same stage. On a timeout the game
    /// ends and no replacement is drawn.
    FinalFail {
        /// Verdicts of the final attempt, when the burn followed an evaluation.
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<Vec<Verdict>>,
        /// Why the word burned.
        reason: BurnReason,
        /// Player-facing explanation.
        message: String,
        /// The burned word.
        correct_word: String,
        /// Revealed first letter of the replacement.
        #[serde(skip_serializing_if = "Option::is_none")]
        new_first_letter: Option<char>,
        /// Letters in the replacement.
        #[serde(skip_serializing_if = "Option::is_none")]
        new_word_length: Option<WordLength>,
        /// Set when the final time budget ran out and the game ended.
        game_over: bool,
    },
    /// Stage 7 solved. The game is won and over.
    GameWon {
        /// Per-letter verdicts.
        result: Vec<Verdict>,
        /// Reward earned at stage 7, excluding the grand prize.
        reward: u64,
        /// Grand prize paid on top of the reward.
        bonus: u64,
        /// Player-facing reward description.
        message: String,
        /// Vault carried into the final.
        total_score: u64,
    },
}

impl GuessOutcome {
    /// Wire name of the status.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Correct { .. } => "correct",
            Self::Wrong { .. } => "wrong",
            Self::Fail { .. } => "fail",
            Self::FinalCorrect { .. } => "final_correct",
            Self::FinalContinue { .. } => "final_continue",
            Self::FinalFail { .. } => "final_fail",
            Self::GameWon { .. } => "game_won",
        }
    }
}

/// Outcome of passing on a final-mode word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PassOutcome {
    /// A same-stage word replaced the skipped one.
    Passed {
        /// Player-facing explanation.
        message: String,
        /// The word that was skipped.
        skipped_word: String,
        /// Revealed first letter of the replacement.
        new_first_letter: char,
        /// Letters in the replacement.
        new_word_length: WordLength,
    },
}

/// Read-only view of a session. Never includes the target word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Session identifier.
    pub session_id: SessionId,
    /// Current phase.
    pub mode: Mode,
    /// Classic round, absent in final mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u8>,
    /// Final stage, absent in classic mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_stage: Option<WordLength>,
    /// Vault.
    pub total_score: u64,
    /// Potential left on the active word.
    pub potential: u64,
    /// Position in the classic queue.
    pub word_index: usize,
    /// Size of the word queue.
    pub total_words: usize,
    /// Letters in the active word.
    pub word_length: WordLength,
    /// Revealed first letter of the active word.
    pub first_letter: char,
    /// Guesses made on the active word.
    pub guesses: Vec<String>,
    /// Classic queue played through.
    pub round_finished: bool,
    /// Final game won or timed out.
    pub game_over: bool,
    /// When the current phase started.
    pub started_at: DateTime<Utc>,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        let word = session.active_word();
        let is_final = *session.mode() == Mode::Final;
        Self {
            session_id: *session.id(),
            mode: *session.mode(),
            round: (!is_final).then(|| session.round()),
            final_stage: is_final.then(|| *session.final_stage()),
            total_score: *session.vault(),
            potential: *session.current_word_potential(),
            word_index: *session.current_word_index(),
            total_words: session.word_queue().len(),
            word_length: word.length(),
            first_letter: word.first_letter(),
            guesses: session.guess_history().clone(),
            round_finished: *session.round_finished(),
            game_over: *session.game_over(),
            started_at: *session.started_at(),
        }
    }
}
