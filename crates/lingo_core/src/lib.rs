//! Lingo game engine - session state and rules for a Turkish word game
//!
//! Players guess hidden 4–7 letter words revealed by their first letter.
//! Every guess is scored letter by letter and the session banks points.
//!
//! # Architecture
//!
//! - **Words**: length-bucketed [`Dictionary`] behind the [`WordSource`] seam
//! - **Evaluator**: per-letter green/yellow/gray verdicts
//! - **Session**: per-player state for classic and final modes
//! - **Engine**: every rule as a transition over a session
//!
//! # Example
//!
//! ```no_run
//! use lingo_core::{Dictionary, Engine, SessionId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dictionary = Dictionary::load("words.json")?;
//! let engine = Engine::default();
//!
//! let (mut session, start) = engine.start(SessionId::random(), &dictionary, chrono::Utc::now());
//! println!("First word starts with {}", start.first_letter);
//!
//! let outcome = engine.submit_guess(&mut session, &dictionary, "elma")?;
//! println!("{}", outcome.status());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod engine;
mod error;
mod evaluator;
mod invariants;
mod length;
mod outcome;
mod scoring;
mod session;
mod text;
mod words;

// Crate-level exports - Engine
pub use engine::{Engine, Rules};

// Crate-level exports - Errors
pub use error::{DictionaryError, EngineError, UnsupportedLength};

// Crate-level exports - Evaluation and scoring
pub use evaluator::{Verdict, evaluate, is_solved};
pub use scoring::{Scoring, final_reward};

// Crate-level exports - Session state
pub use length::WordLength;
pub use session::{Advance, CLASSIC_LAYOUT, Mode, NextWord, ROUND_SIZE, Session, SessionId};

// Crate-level exports - Outcomes
pub use outcome::{
    BurnReason, GuessOutcome, PassOutcome, SessionSnapshot, StartFinalResponse, StartResponse,
};

// Crate-level exports - Invariants
pub use invariants::{
    ActiveWordInvariant, AttemptCapInvariant, Invariant, InvariantSet, InvariantViolation,
    MAX_ATTEMPTS, PotentialBoundInvariant, SessionInvariants, assert_invariants,
};

// Crate-level exports - Text handling
pub use text::{ALPHABET, normalize_entry, normalize_guess, to_lowercase_tr, to_uppercase_tr};

// Crate-level exports - Words
pub use words::{Dictionary, Word, WordSource};
