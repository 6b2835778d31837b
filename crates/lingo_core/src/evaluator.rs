//! Per-letter guess evaluation.

use serde::{Deserialize, Serialize};

/// Outcome for one letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Verdict {
    /// Right letter, right position.
    Green,
    /// Letter occurs elsewhere in the target.
    Yellow,
    /// Letter does not occur (or every occurrence is already matched).
    Gray,
}

/// Compares `guess` against `target` letter by letter.
///
/// Exact matches are settled first and consume their target letter. Each
/// remaining guess letter then takes the leftmost unconsumed equal letter of
/// the target, so a target letter backs at most one green or yellow.
///
/// Lengths are counted in letters. The caller guarantees both words have the
/// same length; surplus guess letters are ignored.
pub fn evaluate(target: &str, guess: &str) -> Vec<Verdict> {
    let target: Vec<char> = target.chars().collect();
    let guess: Vec<char> = guess.chars().take(target.len()).collect();

    let mut verdicts = vec![Verdict::Gray; target.len()];
    let mut unmatched: Vec<Option<char>> = target.iter().copied().map(Some).collect();

    for (i, (g, t)) in guess.iter().zip(&target).enumerate() {
        if g == t {
            verdicts[i] = Verdict::Green;
            unmatched[i] = None;
        }
    }

    for (i, g) in guess.iter().enumerate() {
        if verdicts[i] == Verdict::Green {
            continue;
        }
        if let Some(slot) = unmatched.iter_mut().find(|slot| **slot == Some(*g)) {
            *slot = None;
            verdicts[i] = Verdict::Yellow;
        }
    }

    verdicts
}

/// Returns true when every letter is green.
pub fn is_solved(verdicts: &[Verdict]) -> bool {
    !verdicts.is_empty() && verdicts.iter().all(|v| *v == Verdict::Green)
}
