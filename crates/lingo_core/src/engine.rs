//! The session engine: every game rule as a state transition.
//!
//! Each operation takes the session by `&mut` and returns a typed outcome.
//! Errors leave the session untouched; burns and other game-rule failures
//! are successful transitions. The engine keeps no clock of its own: timers
//! live on the client and arrive here as explicit `timeout` calls.

use crate::error::EngineError;
use crate::evaluator::{Verdict, evaluate, is_solved};
use crate::invariants::{MAX_ATTEMPTS, assert_invariants};
use crate::length::WordLength;
use crate::outcome::{BurnReason, GuessOutcome, PassOutcome, StartFinalResponse, StartResponse};
use crate::scoring::{Scoring, final_reward};
use crate::session::{Advance, Mode, Session, SessionId, ROUND_SIZE};
use crate::text::{normalize_guess, to_uppercase_tr};
use crate::words::WordSource;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Tunable timing and prize values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct Rules {
    /// Client pause after a classic word ends, in milliseconds.
    standard_delay_ms: u64,
    /// Client pause when crossing from round 1 into round 2, in milliseconds.
    round_break_delay_ms: u64,
    /// Final-mode time budget in seconds.
    final_duration_secs: u64,
    /// Grand prize for solving the stage 7 word.
    grand_prize: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            standard_delay_ms: 5_000,
            round_break_delay_ms: 10_000,
            final_duration_secs: 120,
            grand_prize: 200_000,
        }
    }
}

/// Applies game rules to sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    rules: Rules,
}

impl Engine {
    /// Creates an engine with the given rules.
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    /// Returns the rules in force.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Starts a classic game and returns the new session with its response.
    #[instrument(skip(self, words))]
    pub fn start<W>(&self, id: SessionId, words: &W, now: DateTime<Utc>) -> (Session, StartResponse)
    where
        W: WordSource + ?Sized,
    {
        let session = Session::start_classic(id, words, now);
        let first = session.active_word();
        let response = StartResponse {
            session_id: id,
            mode: Mode::Classic,
            round: 1,
            current_word_length: first.length(),
            first_letter: first.first_letter(),
            total_words: session.word_queue().len(),
            total_score: 0,
        };
        assert_invariants(&session);
        (session, response)
    }

    /// Submits a guess for the active word.
    ///
    /// The guess is trimmed and lowercased, then screened: a repeat of an
    /// earlier guess on this word burns it, as does a word missing from the
    /// dictionary. Only screened guesses count as attempts.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidGuessPayload`] for a blank guess
    /// - [`EngineError::RoundFinished`] once the classic queue is exhausted
    /// - [`EngineError::GameOver`] once the final game has ended
    #[instrument(skip(self, session, words, raw_guess), fields(session_id = %session.id(), mode = %session.mode()))]
    pub fn submit_guess<W>(
        &self,
        session: &mut Session,
        words: &W,
        raw_guess: &str,
    ) -> Result<GuessOutcome, EngineError>
    where
        W: WordSource + ?Sized,
    {
        let guess = normalize_guess(raw_guess).ok_or_else(|| {
            warn!("Rejected blank guess");
            EngineError::InvalidGuessPayload
        })?;
        ensure_playable(session)?;
        debug!(guess = %guess, attempts = session.attempts(), "Processing guess");

        let outcome = match session.mode() {
            Mode::Classic => self.classic_guess(session, words, guess),
            Mode::Final => self.final_guess(session, words, guess),
        };

        info!(status = outcome.status(), vault = *session.vault(), "Guess resolved");
        assert_invariants(session);
        Ok(outcome)
    }

    /// Handles the client's timer running out.
    ///
    /// In classic mode the active word burns. In final mode the whole game
    /// ends.
    ///
    /// # Errors
    ///
    /// [`EngineError::RoundFinished`] or [`EngineError::GameOver`] when there
    /// is nothing left to time out.
    #[instrument(skip(self, session), fields(session_id = %session.id(), mode = %session.mode()))]
    pub fn timeout(&self, session: &mut Session) -> Result<GuessOutcome, EngineError> {
        ensure_playable(session)?;

        let outcome = match session.mode() {
            Mode::Classic => self.classic_burn(session, BurnReason::Timeout, None),
            Mode::Final => {
                let correct_word = session.active_word().to_string();
                session.finish_game();
                info!(stage = %session.final_stage(), "Final time budget exhausted");
                GuessOutcome::FinalFail {
                    result: None,
                    reason: BurnReason::Timeout,
                    message: format!(
                        "{} Correct answer: {}. The game is over.",
                        BurnReason::Timeout.headline(),
                        to_uppercase_tr(&correct_word)
                    ),
                    correct_word,
                    new_first_letter: None,
                    new_word_length: None,
                    game_over: true,
                }
            }
        };

        assert_invariants(session);
        Ok(outcome)
    }

    /// Enters final mode. The vault carries over; the ladder starts at four
    /// letters with a fresh word.
    #[instrument(skip(self, session, words), fields(session_id = %session.id()))]
    pub fn start_final<W>(
        &self,
        session: &mut Session,
        words: &W,
        now: DateTime<Utc>,
    ) -> StartFinalResponse
    where
        W: WordSource + ?Sized,
    {
        let first = words.random_word(WordLength::Four);
        let response = StartFinalResponse {
            mode: Mode::Final,
            duration: self.rules.final_duration_secs,
            first_letter: first.first_letter(),
            word_length: first.length(),
            total_score: *session.vault(),
        };
        session.enter_final(first, now);
        assert_invariants(session);
        response
    }

    /// Skips the active final-mode word for another of the same stage.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotInFinalMode`] in classic mode
    /// - [`EngineError::GameOver`] once the final game has ended
    /// - [`EngineError::PassNotAllowed`] before any guess on this word
    #[instrument(skip(self, session, words), fields(session_id = %session.id()))]
    pub fn pass<W>(&self, session: &mut Session, words: &W) -> Result<PassOutcome, EngineError>
    where
        W: WordSource + ?Sized,
    {
        if *session.mode() != Mode::Final {
            warn!("Pass attempted outside final mode");
            return Err(EngineError::NotInFinalMode);
        }
        ensure_playable(session)?;
        if session.guess_history().is_empty() {
            warn!("Pass attempted before any guess");
            return Err(EngineError::PassNotAllowed);
        }

        let skipped_word = session.active_word().to_string();
        let replacement = words.random_word(*session.final_stage());
        let outcome = PassOutcome::Passed {
            message: "Passed! Here comes a new word.".to_string(),
            skipped_word,
            new_first_letter: replacement.first_letter(),
            new_word_length: replacement.length(),
        };
        session.replace_active_word(replacement);
        info!(stage = %session.final_stage(), "Word passed");

        assert_invariants(session);
        Ok(outcome)
    }

    // ─────────────────────────────────────────────────────────────
    //  Classic mode
    // ─────────────────────────────────────────────────────────────

    fn classic_guess<W>(&self, session: &mut Session, words: &W, guess: String) -> GuessOutcome
    where
        W: WordSource + ?Sized,
    {
        if let Some(reason) = screen(session, words, &guess) {
            return self.classic_burn(session, reason, None);
        }

        let target = session.active_word().clone();
        let result = evaluate(target.as_str(), &guess);
        session.record_guess(guess);

        if is_solved(&result) {
            let earned = session.bank_potential();
            let advance = session.advance_to_next_word();
            info!(earned, vault = *session.vault(), "Classic word solved");
            return GuessOutcome::Correct {
                result,
                score: *session.vault(),
                earned,
                is_round_finished: advance == Advance::Exhausted,
                next_word: advance.next_word(),
                next_delay: self.transition_delay(session, advance),
            };
        }

        session.apply_penalty(Scoring::for_length(target.length()).penalty);
        if session.attempts() >= MAX_ATTEMPTS {
            return self.classic_burn(session, BurnReason::AttemptsExhausted, Some(result));
        }

        GuessOutcome::Wrong {
            result,
            score: *session.vault(),
            potential: *session.current_word_potential(),
            attempts_left: MAX_ATTEMPTS - session.attempts(),
        }
    }

    /// Forfeits the active classic word, reveals it and moves the queue on.
    fn classic_burn(
        &self,
        session: &mut Session,
        reason: BurnReason,
        result: Option<Vec<Verdict>>,
    ) -> GuessOutcome {
        let correct_word = session.active_word().to_string();
        session.forfeit_potential();
        let advance = session.advance_to_next_word();
        info!(reason = ?reason, index = *session.current_word_index(), "Classic word burned");

        GuessOutcome::Fail {
            result,
            reason,
            score: *session.vault(),
            message: format!("{} Correct answer: {}", reason.headline(), to_uppercase_tr(&correct_word)),
            correct_word,
            is_round_finished: advance == Advance::Exhausted,
            next_word: advance.next_word(),
            next_delay: self.transition_delay(session, advance),
        }
    }

    /// Longer pause when the queue has just crossed into round 2.
    fn transition_delay(&self, session: &Session, advance: Advance) -> u64 {
        match advance {
            Advance::Next(_) if *session.current_word_index() == ROUND_SIZE => {
                self.rules.round_break_delay_ms
            }
            _ => self.rules.standard_delay_ms,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Final mode
    // ─────────────────────────────────────────────────────────────

    fn final_guess<W>(&self, session: &mut Session, words: &W, guess: String) -> GuessOutcome
    where
        W: WordSource + ?Sized,
    {
        if let Some(reason) = screen(session, words, &guess) {
            return final_burn(session, words, reason, None);
        }

        let target = session.active_word().clone();
        let result = evaluate(target.as_str(), &guess);
        session.record_guess(guess);

        if is_solved(&result) {
            let stage = *session.final_stage();
            let vault = *session.vault();
            let reward = final_reward(stage, vault);

            return match stage.next() {
                Some(next_stage) => {
                    let word = words.random_word(next_stage);
                    let first_letter = word.first_letter();
                    session.replace_active_word(word);
                    info!(stage = %stage, next_stage = %next_stage, reward, "Final stage cleared");
                    GuessOutcome::FinalCorrect {
                        result,
                        reward,
                        message: reward_message(stage, reward),
                        next_stage,
                        first_letter,
                        word_length: next_stage,
                    }
                }
                None => {
                    session.finish_game();
                    info!(reward, bonus = self.rules.grand_prize, "Final game won");
                    GuessOutcome::GameWon {
                        result,
                        reward,
                        bonus: self.rules.grand_prize,
                        message: format!("{} points + {} grand prize!", reward, self.rules.grand_prize),
                        total_score: vault,
                    }
                }
            };
        }

        if session.attempts() >= MAX_ATTEMPTS {
            return final_burn(session, words, BurnReason::AttemptsExhausted, Some(result));
        }

        GuessOutcome::FinalContinue {
            result,
            attempts_left: MAX_ATTEMPTS - session.attempts(),
        }
    }
}

/// Replaces the active final-mode word with a same-stage word. No score is lost.
fn final_burn<W>(
    session: &mut Session,
    words: &W,
    reason: BurnReason,
    result: Option<Vec<Verdict>>,
) -> GuessOutcome
where
    W: WordSource + ?Sized,
{
    let correct_word = session.active_word().to_string();
    let replacement = words.random_word(*session.final_stage());
    let new_first_letter = replacement.first_letter();
    let new_word_length = replacement.length();
    session.replace_active_word(replacement);
    info!(reason = ?reason, stage = %new_word_length, "Final word burned");

    GuessOutcome::FinalFail {
        result,
        reason,
        message: format!(
            "{} Correct answer: {}. Here comes a new word.",
            reason.headline(),
            to_uppercase_tr(&correct_word)
        ),
        correct_word,
        new_first_letter: Some(new_first_letter),
        new_word_length: Some(new_word_length),
        game_over: false,
    }
}

/// Repeats are checked before dictionary membership.
fn screen<W>(session: &Session, words: &W, guess: &str) -> Option<BurnReason>
where
    W: WordSource + ?Sized,
{
    if session.has_guessed(guess) {
        warn!("Repeated guess burns the word");
        return Some(BurnReason::DuplicateGuess);
    }
    if !words.is_valid_word(session.active_word().length(), guess) {
        warn!("Unknown word burns the word");
        return Some(BurnReason::InvalidWord);
    }
    None
}

fn ensure_playable(session: &Session) -> Result<(), EngineError> {
    if *session.game_over() {
        warn!("Operation on a finished game");
        return Err(EngineError::GameOver);
    }
    if *session.mode() == Mode::Classic && *session.round_finished() {
        warn!("Operation on an exhausted classic queue");
        return Err(EngineError::RoundFinished);
    }
    Ok(())
}

fn reward_message(stage: WordLength, reward: u64) -> String {
    let share = match stage {
        WordLength::Four => "50% of vault",
        WordLength::Five => "100% of vault",
        WordLength::Six | WordLength::Seven => "vault x2",
    };
    format!("{} points ({})", reward, share)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::words::Word;

    /// Every length always yields the same target word.
    struct Fixed;

    impl WordSource for Fixed {
        fn random_word(&self, length: WordLength) -> Word {
            let text = match length {
                WordLength::Four => "kaza",
                WordLength::Five => "armut",
                WordLength::Six => "karpuz",
                WordLength::Seven => "patates",
            };
            Word::parse(text).expect("fixture word")
        }

        fn is_valid_word(&self, _length: WordLength, word: &str) -> bool {
            ["kaza", "masa", "elma", "kale", "armut", "kalem", "karpuz", "patates"].contains(&word)
        }
    }

    fn started() -> (Engine, Session) {
        let engine = Engine::default();
        let (session, _) = engine.start(SessionId::random(), &Fixed, Utc::now());
        (engine, session)
    }

    #[test]
    fn test_start_reports_first_word() {
        let engine = Engine::default();
        let (session, response) = engine.start(SessionId::random(), &Fixed, Utc::now());
        assert_eq!(response.session_id, *session.id());
        assert_eq!(response.round, 1);
        assert_eq!(response.total_words, 12);
        assert_eq!(response.current_word_length, WordLength::Four);
        assert_eq!(response.first_letter, 'k');
        assert_eq!(response.total_score, 0);
    }

    #[test]
    fn test_first_try_banks_full_potential() {
        let (engine, mut session) = started();
        let outcome = engine.submit_guess(&mut session, &Fixed, "  KAZA ").expect("guess");
        match outcome {
            GuessOutcome::Correct {
                score,
                earned,
                is_round_finished,
                next_word,
                next_delay,
                ..
            } => {
                assert_eq!(score, 1000);
                assert_eq!(earned, 1000);
                assert!(!is_round_finished);
                let next = next_word.expect("more words");
                assert_eq!(next.word_length, WordLength::Four);
                assert_eq!(next.round, 1);
                assert_eq!(next_delay, 5000);
            }
            other => panic!("expected correct, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_guess_costs_potential_not_vault() {
        let (engine, mut session) = started();
        let outcome = engine.submit_guess(&mut session, &Fixed, "masa").expect("guess");
        assert_eq!(
            outcome,
            GuessOutcome::Wrong {
                result: vec![Verdict::Gray, Verdict::Green, Verdict::Gray, Verdict::Green],
                score: 0,
                potential: 900,
                attempts_left: 4,
            }
        );
        assert_eq!(session.guess_history(), &vec!["masa".to_string()]);
    }

    #[test]
    fn test_repeated_guess_burns_without_evaluation() {
        let (engine, mut session) = started();
        engine.submit_guess(&mut session, &Fixed, "masa").expect("first");
        let outcome = engine.submit_guess(&mut session, &Fixed, "MASA").expect("repeat");
        match outcome {
            GuessOutcome::Fail {
                result,
                reason,
                correct_word,
                message,
                ..
            } => {
                assert_eq!(result, None);
                assert_eq!(reason, BurnReason::DuplicateGuess);
                assert_eq!(correct_word, "kaza");
                assert!(message.contains("KAZA"));
            }
            other => panic!("expected fail, got {:?}", other),
        }
        assert_eq!(*session.current_word_index(), 1);
        assert!(session.guess_history().is_empty());
    }

    #[test]
    fn test_unknown_word_burns() {
        let (engine, mut session) = started();
        let outcome = engine.submit_guess(&mut session, &Fixed, "qqqq").expect("guess");
        assert!(matches!(
            outcome,
            GuessOutcome::Fail {
                reason: BurnReason::InvalidWord,
                score: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_blank_guess_leaves_session_untouched() {
        let (engine, mut session) = started();
        let err = engine.submit_guess(&mut session, &Fixed, "   ").expect_err("blank");
        assert_eq!(err, EngineError::InvalidGuessPayload);
        assert!(session.guess_history().is_empty());
        assert_eq!(*session.current_word_potential(), 1000);
    }

    #[test]
    fn test_crossing_into_round_two_uses_long_delay() {
        let (engine, mut session) = started();
        for _ in 0..5 {
            session.advance_to_next_word();
        }
        let outcome = engine.submit_guess(&mut session, &Fixed, "armut").expect("guess");
        match outcome {
            GuessOutcome::Correct {
                next_word,
                next_delay,
                ..
            } => {
                assert_eq!(next_word.expect("round two").round, 2);
                assert_eq!(next_delay, 10_000);
            }
            other => panic!("expected correct, got {:?}", other),
        }
    }

    #[test]
    fn test_classic_timeout_burns_and_exhausts() {
        let (engine, mut session) = started();
        for _ in 0..11 {
            session.advance_to_next_word();
        }
        let outcome = engine.timeout(&mut session).expect("timeout");
        match outcome {
            GuessOutcome::Fail {
                reason,
                is_round_finished,
                next_word,
                next_delay,
                ..
            } => {
                assert_eq!(reason, BurnReason::Timeout);
                assert!(is_round_finished);
                assert_eq!(next_word, None);
                assert_eq!(next_delay, 5000);
            }
            other => panic!("expected fail, got {:?}", other),
        }
        assert_eq!(engine.timeout(&mut session), Err(EngineError::RoundFinished));
        assert_eq!(
            engine.submit_guess(&mut session, &Fixed, "karpuz"),
            Err(EngineError::RoundFinished)
        );
    }

    #[test]
    fn test_pass_rules() {
        let (engine, mut session) = started();
        assert_eq!(engine.pass(&mut session, &Fixed), Err(EngineError::NotInFinalMode));

        engine.start_final(&mut session, &Fixed, Utc::now());
        assert_eq!(engine.pass(&mut session, &Fixed), Err(EngineError::PassNotAllowed));

        engine.submit_guess(&mut session, &Fixed, "masa").expect("guess");
        let PassOutcome::Passed {
            skipped_word,
            new_word_length,
            ..
        } = engine.pass(&mut session, &Fixed).expect("pass");
        assert_eq!(skipped_word, "kaza");
        assert_eq!(new_word_length, WordLength::Four);
        assert!(session.guess_history().is_empty());
    }

    #[test]
    fn test_final_ladder_to_grand_prize() {
        let (engine, mut session) = started();
        engine.submit_guess(&mut session, &Fixed, "kaza").expect("bank");
        assert_eq!(*session.vault(), 1000);

        let response = engine.start_final(&mut session, &Fixed, Utc::now());
        assert_eq!(response.duration, 120);
        assert_eq!(response.total_score, 1000);
        assert_eq!(response.word_length, WordLength::Four);

        let mut rewards = Vec::new();
        for word in ["kaza", "armut", "karpuz"] {
            match engine.submit_guess(&mut session, &Fixed, word).expect("guess") {
                GuessOutcome::FinalCorrect { reward, .. } => rewards.push(reward),
                other => panic!("expected final_correct, got {:?}", other),
            }
        }
        assert_eq!(rewards, vec![500, 1000, 2000]);
        assert_eq!(*session.final_stage(), WordLength::Seven);

        match engine.submit_guess(&mut session, &Fixed, "patates").expect("guess") {
            GuessOutcome::GameWon {
                reward,
                bonus,
                total_score,
                ..
            } => {
                assert_eq!(reward, 2000);
                assert_eq!(bonus, 200_000);
                assert_eq!(total_score, 1000);
            }
            other => panic!("expected game_won, got {:?}", other),
        }
        assert!(*session.game_over());
        assert_eq!(*session.vault(), 1000);
        assert_eq!(
            engine.submit_guess(&mut session, &Fixed, "patates"),
            Err(EngineError::GameOver)
        );
    }

    #[test]
    fn test_final_wrong_guesses_cost_nothing() {
        let (engine, mut session) = started();
        engine.start_final(&mut session, &Fixed, Utc::now());
        for (i, guess) in ["masa", "elma", "kale"].iter().enumerate() {
            let outcome = engine.submit_guess(&mut session, &Fixed, guess).expect("guess");
            assert!(matches!(
                outcome,
                GuessOutcome::FinalContinue { attempts_left, .. } if attempts_left == MAX_ATTEMPTS - i - 1
            ));
        }
        assert_eq!(*session.current_word_potential(), 0);
        assert_eq!(*session.vault(), 0);
    }

    #[test]
    fn test_final_timeout_ends_game() {
        let (engine, mut session) = started();
        engine.start_final(&mut session, &Fixed, Utc::now());
        let outcome = engine.timeout(&mut session).expect("timeout");
        assert_eq!(outcome.status(), "final_fail");
        assert!(matches!(
            outcome,
            GuessOutcome::FinalFail {
                result: None,
                reason: BurnReason::Timeout,
                new_word_length: None,
                game_over: true,
                ..
            }
        ));
        assert!(*session.game_over());
        assert_eq!(*session.final_stage(), WordLength::Four);
        assert_eq!(engine.timeout(&mut session), Err(EngineError::GameOver));
        assert_eq!(engine.pass(&mut session, &Fixed), Err(EngineError::GameOver));
    }

    #[test]
    fn test_rules_deserialize_with_defaults() {
        let rules: Rules = serde_json::from_str(r#"{"grand_prize": 5}"#).expect("rules");
        assert_eq!(*rules.grand_prize(), 5);
        assert_eq!(*rules.standard_delay_ms(), 5000);
        assert_eq!(*rules.final_duration_secs(), 120);
    }
}
