//! Words, the word source seam, and the length-bucketed dictionary.

use crate::error::{DictionaryError, UnsupportedLength};
use crate::length::WordLength;
use crate::text::normalize_entry;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// A lowercase playable word of a supported length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    length: WordLength,
    first_letter: char,
}

impl Word {
    /// Wraps an already-normalized lowercase word.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedLength`] unless the word has 4–7 letters.
    pub fn parse(text: impl Into<String>) -> Result<Self, UnsupportedLength> {
        let text = text.into();
        let length = WordLength::try_from(text.chars().count())?;
        let Some(first_letter) = text.chars().next() else {
            return Err(UnsupportedLength(0));
        };
        Ok(Self {
            text,
            length,
            first_letter,
        })
    }

    /// Returns the word text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the word length.
    pub fn length(&self) -> WordLength {
        self.length
    }

    /// Returns the first letter, revealed to the player as a hint.
    pub fn first_letter(&self) -> char {
        self.first_letter
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Supplies target words and validates guesses.
///
/// Implementations must be able to produce a word for every [`WordLength`];
/// a missing length is a startup error, never a runtime one.
pub trait WordSource {
    /// Returns a random word of the given length.
    fn random_word(&self, length: WordLength) -> Word;

    /// Returns true if `word` (already lowercase) is a known word of `length`.
    fn is_valid_word(&self, length: WordLength, word: &str) -> bool;
}

impl<T: WordSource + ?Sized> WordSource for std::sync::Arc<T> {
    fn random_word(&self, length: WordLength) -> Word {
        (**self).random_word(length)
    }

    fn is_valid_word(&self, length: WordLength, word: &str) -> bool {
        (**self).is_valid_word(length, word)
    }
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    words: Vec<Word>,
    index: HashSet<String>,
}

impl Bucket {
    fn insert(&mut self, word: Word) -> bool {
        if self.index.insert(word.as_str().to_string()) {
            self.words.push(word);
            true
        } else {
            false
        }
    }
}

/// In-memory dictionary bucketed by word length.
///
/// Every bucket is guaranteed non-empty once constructed.
#[derive(Debug, Clone)]
pub struct Dictionary {
    buckets: HashMap<WordLength, Bucket>,
}

impl Dictionary {
    /// Builds a dictionary from raw entries.
    ///
    /// Entries are trimmed, lowercased with Turkish rules and have circumflexes
    /// folded. Entries with non-letters or unsupported lengths are dropped, as
    /// are duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if any supported length ends up empty.
    #[instrument(skip(entries))]
    pub fn from_words<I, S>(entries: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buckets: HashMap<WordLength, Bucket> = HashMap::new();
        let mut skipped = 0usize;

        for entry in entries {
            let Some(normalized) = normalize_entry(entry.as_ref()) else {
                skipped += 1;
                continue;
            };
            match Word::parse(normalized) {
                Ok(word) => {
                    buckets.entry(word.length()).or_default().insert(word);
                }
                Err(_) => skipped += 1,
            }
        }

        let missing: Vec<String> = WordLength::iter()
            .filter(|length| buckets.get(length).is_none_or(|b| b.words.is_empty()))
            .map(|length| length.to_string())
            .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, "Dictionary has empty length buckets");
            return Err(DictionaryError::new(format!(
                "No words for length(s) {}",
                missing.join(", ")
            )));
        }

        debug!(skipped, "Dropped unusable dictionary entries");
        Ok(Self { buckets })
    }

    /// Parses a JSON object of length-keyed word arrays,
    /// e.g. `{"4": ["elma"], "5": ["armut"], ...}`.
    ///
    /// Words are re-bucketed by their actual letter count, so keys are only
    /// informational.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] on malformed JSON or empty buckets.
    #[instrument(skip(json))]
    pub fn from_json_str(json: &str) -> Result<Self, DictionaryError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_words(raw.into_values().flatten())
    }

    /// Parses a newline-separated word list.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if any supported length ends up empty.
    #[instrument(skip(list))]
    pub fn from_word_list(list: &str) -> Result<Self, DictionaryError> {
        Self::from_words(list.lines())
    }

    /// Loads a dictionary file. `.json` files are parsed as length-keyed
    /// objects, anything else as a newline-separated list.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError`] if the file cannot be read or parsed, or if
    /// any supported length ends up empty.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DictionaryError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let dictionary = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_word_list(&content)?
        };

        info!(
            total = dictionary.total(),
            four = dictionary.count(WordLength::Four),
            five = dictionary.count(WordLength::Five),
            six = dictionary.count(WordLength::Six),
            seven = dictionary.count(WordLength::Seven),
            "Dictionary loaded"
        );
        Ok(dictionary)
    }

    /// Number of words of `length`.
    pub fn count(&self, length: WordLength) -> usize {
        self.buckets.get(&length).map_or(0, |b| b.words.len())
    }

    /// Total number of words.
    pub fn total(&self) -> usize {
        self.buckets.values().map(|b| b.words.len()).sum()
    }
}

impl WordSource for Dictionary {
    fn random_word(&self, length: WordLength) -> Word {
        let words = &self.buckets[&length].words;
        let pick = rand::rng().random_range(0..words.len());
        words[pick].clone()
    }

    fn is_valid_word(&self, length: WordLength, word: &str) -> bool {
        self.buckets
            .get(&length)
            .is_some_and(|b| b.index.contains(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &[&str] = &["elma", "masa", "armut", "kalem", "karpuz", "patates"];

    #[test]
    fn test_word_parse_counts_letters_not_bytes() {
        let word = Word::parse("ışık").expect("valid word");
        assert_eq!(word.length(), WordLength::Four);
        assert_eq!(word.first_letter(), 'ı');
        assert_eq!(Word::parse("ev"), Err(UnsupportedLength(2)));
        assert_eq!(Word::parse(""), Err(UnsupportedLength(0)));
    }

    #[test]
    fn test_from_words_buckets_and_normalizes() {
        let dict = Dictionary::from_words(SAMPLE.iter().copied().chain(["ELMA", " Kâse ", "ev", "a-b-c-d"]))
            .expect("dictionary");
        assert_eq!(dict.count(WordLength::Four), 3);
        assert_eq!(dict.count(WordLength::Five), 2);
        assert!(dict.is_valid_word(WordLength::Four, "kase"));
        assert!(dict.is_valid_word(WordLength::Four, "elma"));
        assert!(!dict.is_valid_word(WordLength::Five, "elma"));
        assert!(!dict.is_valid_word(WordLength::Four, "ev"));
    }

    #[test]
    fn test_empty_bucket_is_an_error() {
        let result = Dictionary::from_words(["elma", "armut", "karpuz"]);
        let err = result.expect_err("seven-letter bucket is empty");
        assert!(err.message.contains('7'), "message was {}", err.message);
    }

    #[test]
    fn test_random_word_has_requested_length() {
        let dict = Dictionary::from_words(SAMPLE).expect("dictionary");
        for length in WordLength::iter() {
            let word = dict.random_word(length);
            assert_eq!(word.length(), length);
            assert!(dict.is_valid_word(length, word.as_str()));
        }
    }

    #[test]
    fn test_json_keys_are_informational() {
        let json = r#"{"4": ["elma", "armut"], "6": ["karpuz"], "7": ["patates"]}"#;
        let dict = Dictionary::from_json_str(json).expect("dictionary");
        assert!(dict.is_valid_word(WordLength::Five, "armut"));
        assert_eq!(dict.count(WordLength::Four), 1);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Dictionary::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_load_json_and_list_files() {
        let mut json = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(json, r#"{{"4":["elma"],"5":["armut"],"6":["karpuz"],"7":["patates"]}}"#)
            .expect("write");
        let dict = Dictionary::load(json.path()).expect("json dictionary");
        assert_eq!(dict.total(), 4);

        let mut list = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(list, "elma\nARMUT\nkarpuz\npatates\nkarpuz").expect("write");
        let dict = Dictionary::load(list.path()).expect("list dictionary");
        assert_eq!(dict.total(), 4);
        assert!(dict.is_valid_word(WordLength::Five, "armut"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Dictionary::load("/definitely/not/here/words.json").is_err());
    }
}
