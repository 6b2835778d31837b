//! Tests for classic mode play through the engine.

mod common;

use chrono::Utc;
use common::ScriptedWords;
use lingo_core::{
    BurnReason, Engine, EngineError, GuessOutcome, SessionId, SessionSnapshot, Verdict,
    WordLength,
};

fn words() -> ScriptedWords {
    ScriptedWords::new()
        .script(&["kaza", "masa"])
        .with_accepted(&["kale", "kart", "kask", "kalp", "kamp", "azak", "ışık"])
}

#[test]
fn test_five_wrong_guesses_burn_the_word() {
    let engine = Engine::default();
    let words = words();
    let (mut session, _) = engine.start(SessionId::random(), &words, Utc::now());

    let mut potentials = Vec::new();
    for guess in ["kale", "kart", "kask", "kalp"] {
        match engine.submit_guess(&mut session, &words, guess).expect("guess") {
            GuessOutcome::Wrong {
                potential,
                attempts_left,
                score,
                ..
            } => {
                assert_eq!(score, 0);
                assert_eq!(attempts_left, 5 - (potentials.len() + 1));
                potentials.push(potential);
            }
            other => panic!("Expected wrong, got {:?}", other),
        }
    }
    assert_eq!(potentials, vec![900, 800, 700, 600]);

    match engine.submit_guess(&mut session, &words, "kamp").expect("guess") {
        GuessOutcome::Fail {
            result,
            reason,
            correct_word,
            is_round_finished,
            next_word,
            next_delay,
            score,
            ..
        } => {
            assert_eq!(reason, BurnReason::AttemptsExhausted);
            assert_eq!(
                result,
                Some(vec![Verdict::Green, Verdict::Green, Verdict::Gray, Verdict::Gray])
            );
            assert_eq!(correct_word, "kaza");
            assert!(!is_round_finished);
            assert_eq!(next_word.expect("next word").first_letter, 'm');
            assert_eq!(next_delay, 5000);
            assert_eq!(score, 0);
        }
        other => panic!("Expected fail, got {:?}", other),
    }

    assert_eq!(*session.current_word_index(), 1);
    assert_eq!(*session.current_word_potential(), 1000);
    assert!(session.guess_history().is_empty());
}

#[test]
fn test_late_correct_guess_banks_reduced_potential() {
    let engine = Engine::default();
    let words = words();
    let (mut session, _) = engine.start(SessionId::random(), &words, Utc::now());

    engine.submit_guess(&mut session, &words, "kale").expect("wrong");
    engine.submit_guess(&mut session, &words, "azak").expect("wrong");
    match engine.submit_guess(&mut session, &words, "Kaza").expect("correct") {
        GuessOutcome::Correct { earned, score, .. } => {
            assert_eq!(earned, 800);
            assert_eq!(score, 800);
        }
        other => panic!("Expected correct, got {:?}", other),
    }
}

#[test]
fn test_duplicate_guess_burns_before_dictionary_check() {
    let engine = Engine::default();
    let words = words();
    let (mut session, _) = engine.start(SessionId::random(), &words, Utc::now());

    engine.submit_guess(&mut session, &words, "kale").expect("wrong");
    let outcome = engine.submit_guess(&mut session, &words, " KALE").expect("duplicate");
    assert!(matches!(
        outcome,
        GuessOutcome::Fail {
            reason: BurnReason::DuplicateGuess,
            result: None,
            ..
        }
    ));
    assert_eq!(*session.current_word_index(), 1);
}

#[test]
fn test_wrong_length_guess_is_an_invalid_word() {
    let engine = Engine::default();
    let words = words();
    let (mut session, _) = engine.start(SessionId::random(), &words, Utc::now());

    let outcome = engine.submit_guess(&mut session, &words, "armut").expect("guess");
    match outcome {
        GuessOutcome::Fail { reason, message, .. } => {
            assert_eq!(reason, BurnReason::InvalidWord);
            assert!(message.contains("KAZA"), "Message was {}", message);
        }
        other => panic!("Expected fail, got {:?}", other),
    }
}

#[test]
fn test_playing_through_the_queue_finishes_the_round() {
    let engine = Engine::default();
    let words = words();
    let (mut session, start) = engine.start(SessionId::random(), &words, Utc::now());
    assert_eq!(start.total_words, 12);

    let mut delays = Vec::new();
    let mut lengths = Vec::new();
    loop {
        lengths.push(session.active_word().length());
        let target = session.active_word().to_string();
        match engine.submit_guess(&mut session, &words, &target).expect("guess") {
            GuessOutcome::Correct {
                is_round_finished,
                next_delay,
                ..
            } => {
                delays.push(next_delay);
                if is_round_finished {
                    break;
                }
            }
            other => panic!("Expected correct, got {:?}", other),
        }
    }

    assert_eq!(lengths.len(), 12);
    assert_eq!(lengths[..3], [WordLength::Four; 3]);
    assert_eq!(lengths[9..], [WordLength::Six; 3]);
    assert_eq!(delays[5], 10_000);
    assert!(delays.iter().enumerate().all(|(i, d)| i == 5 || *d == 5000));
    assert_eq!(*session.vault(), 3 * 1000 + 9 * 2000);

    let snapshot = SessionSnapshot::from(&session);
    assert!(snapshot.round_finished);
    assert_eq!(snapshot.round, Some(2));

    assert_eq!(engine.timeout(&mut session), Err(EngineError::RoundFinished));
}

#[test]
fn test_turkish_letters_are_case_folded() {
    let engine = Engine::default();
    let words = ScriptedWords::new().script(&["ışık"]);
    let (mut session, start) = engine.start(SessionId::random(), &words, Utc::now());
    assert_eq!(start.first_letter, 'ı');

    let outcome = engine.submit_guess(&mut session, &words, "IŞIK").expect("guess");
    assert!(matches!(outcome, GuessOutcome::Correct { earned: 1000, .. }));
}
