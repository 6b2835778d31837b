//! First-class invariants for game sessions.
//!
//! Invariants are logical properties that must hold after every engine
//! operation. They are checked in debug builds and testable on their own.

use crate::scoring::Scoring;
use crate::session::{Mode, Session};
use tracing::warn;

/// Maximum guesses on a single word.
pub const MAX_ATTEMPTS: usize = 5;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2) as InvariantSet<S>>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// At most [`MAX_ATTEMPTS`] guesses are ever recorded on one word.
pub struct AttemptCapInvariant;

impl Invariant<Session> for AttemptCapInvariant {
    fn holds(session: &Session) -> bool {
        session.guess_history().len() <= MAX_ATTEMPTS
    }

    fn description() -> &'static str {
        "Guess history never exceeds the attempt cap"
    }
}

/// Exactly one word is active: classic points inside its queue, final keeps a
/// single slot at index 0 whose length is the current stage.
pub struct ActiveWordInvariant;

impl Invariant<Session> for ActiveWordInvariant {
    fn holds(session: &Session) -> bool {
        let queue = session.word_queue();
        let index = *session.current_word_index();
        match session.mode() {
            Mode::Classic => index < queue.len(),
            Mode::Final => {
                queue.len() == 1
                    && index == 0
                    && queue[0].length() == *session.final_stage()
            }
        }
    }

    fn description() -> &'static str {
        "Exactly one word is active"
    }
}

/// The active word's potential never exceeds its base score.
pub struct PotentialBoundInvariant;

impl Invariant<Session> for PotentialBoundInvariant {
    fn holds(session: &Session) -> bool {
        let base = Scoring::for_length(session.active_word().length()).base;
        *session.current_word_potential() <= base
    }

    fn description() -> &'static str {
        "Word potential never exceeds the word's base score"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (
    AttemptCapInvariant,
    ActiveWordInvariant,
    PotentialBoundInvariant,
);

/// Asserts that all session invariants hold (panics on violation in debug builds).
pub fn assert_invariants(session: &Session) {
    if let Err(violations) = SessionInvariants::check_all(session) {
        for violation in &violations {
            warn!(session_id = %session.id(), invariant = %violation.description, "Invariant violated");
        }
        debug_assert!(violations.is_empty(), "Session invariants violated: {:?}", violations);
    }
}
