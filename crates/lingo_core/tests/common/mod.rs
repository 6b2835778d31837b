//! Shared fixtures for engine integration tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use lingo_core::{Word, WordLength, WordSource};

/// Word source that hands out scripted targets in order.
///
/// Once a length's script runs dry it falls back to a fixed word. Only words
/// registered through [`ScriptedWords::accept`] (plus every scripted and
/// fallback word) pass dictionary validation.
pub struct ScriptedWords {
    scripts: Mutex<HashMap<WordLength, VecDeque<&'static str>>>,
    accepted: HashSet<String>,
}

impl ScriptedWords {
    pub fn new() -> Self {
        let mut words = Self {
            scripts: Mutex::new(HashMap::new()),
            accepted: HashSet::new(),
        };
        words.accept(&["elma", "armut", "karpuz", "patates"]);
        words
    }

    /// Queues `targets` to be drawn, in order, for their length.
    pub fn script(mut self, targets: &[&'static str]) -> Self {
        self.accept(targets);
        {
            let mut scripts = self.scripts.lock().expect("script lock");
            for target in targets {
                let length = Word::parse(*target).expect("scripted word").length();
                scripts.entry(length).or_default().push_back(*target);
            }
        }
        self
    }

    /// Registers extra valid guesses.
    pub fn accept(&mut self, words: &[&str]) {
        self.accepted.extend(words.iter().map(|w| w.to_string()));
    }

    pub fn with_accepted(mut self, words: &[&str]) -> Self {
        self.accept(words);
        self
    }
}

fn fallback(length: WordLength) -> &'static str {
    match length {
        WordLength::Four => "elma",
        WordLength::Five => "armut",
        WordLength::Six => "karpuz",
        WordLength::Seven => "patates",
    }
}

impl WordSource for ScriptedWords {
    fn random_word(&self, length: WordLength) -> Word {
        let next = self
            .scripts
            .lock()
            .expect("script lock")
            .get_mut(&length)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| fallback(length));
        Word::parse(next).expect("fixture word")
    }

    fn is_valid_word(&self, length: WordLength, word: &str) -> bool {
        word.chars().count() == length.letters() && self.accepted.contains(word)
    }
}
