//! Turkish-locale text handling.
//!
//! Rust's default case mapping is locale-independent, which maps `I` to `i`
//! and `İ` to `i̇`. Turkish needs the dotted/dotless pairs `İ/i` and `I/ı`.

/// Letters accepted in dictionary words and guesses.
pub const ALPHABET: &str = "abcçdefgğhıijklmnoöprsştuüvyzqwx";

/// Lowercases `input` using Turkish case rules.
pub fn to_lowercase_tr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}

/// Uppercases `input` using Turkish case rules.
pub fn to_uppercase_tr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            other => out.extend(other.to_uppercase()),
        }
    }
    out
}

/// Trims and lowercases a raw guess. Returns `None` when nothing is left.
pub fn normalize_guess(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(to_lowercase_tr(trimmed))
    }
}

/// Folds circumflexed vowels to their plain forms (`kâğıt` → `kağıt`).
pub fn fold_circumflex(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'â' => 'a',
            'î' => 'i',
            'û' => 'u',
            other => other,
        })
        .collect()
}

/// Normalizes a dictionary entry. Returns `None` if it contains anything
/// besides alphabet letters after folding.
pub fn normalize_entry(raw: &str) -> Option<String> {
    let word = fold_circumflex(&to_lowercase_tr(raw.trim()));
    if !word.is_empty() && word.chars().all(|c| ALPHABET.contains(c)) {
        Some(word)
    } else {
        None
    }
}
