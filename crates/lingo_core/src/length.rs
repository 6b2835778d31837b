//! Supported word lengths.

use crate::error::UnsupportedLength;
use serde::{Deserialize, Serialize};

/// Length of a playable word, in letters.
///
/// Only 4–7 letter words exist in the game. Final mode also uses this as its
/// stage ladder, climbing from [`WordLength::Four`] to [`WordLength::Seven`].
/// Serialized as the plain letter count.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(into = "usize", try_from = "usize")]
pub enum WordLength {
    /// Four letters.
    #[display("4")]
    Four,
    /// Five letters.
    #[display("5")]
    Five,
    /// Six letters.
    #[display("6")]
    Six,
    /// Seven letters.
    #[display("7")]
    Seven,
}

impl WordLength {
    /// Returns the number of letters.
    pub fn letters(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
        }
    }

    /// Returns the next rung of the final-mode ladder, or `None` after seven.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Four => Some(Self::Five),
            Self::Five => Some(Self::Six),
            Self::Six => Some(Self::Seven),
            Self::Seven => None,
        }
    }
}

impl TryFrom<usize> for WordLength {
    type Error = UnsupportedLength;

    fn try_from(letters: usize) -> Result<Self, Self::Error> {
        match letters {
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            6 => Ok(Self::Six),
            7 => Ok(Self::Seven),
            other => Err(UnsupportedLength(other)),
        }
    }
}

impl From<WordLength> for usize {
    fn from(length: WordLength) -> Self {
        length.letters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_round_trips_through_usize() {
        for length in WordLength::iter() {
            assert_eq!(WordLength::try_from(length.letters()), Ok(length));
        }
        assert_eq!(WordLength::try_from(3), Err(UnsupportedLength(3)));
        assert_eq!(WordLength::try_from(8), Err(UnsupportedLength(8)));
    }

    #[test]
    fn test_ladder_ends_at_seven() {
        assert_eq!(WordLength::Four.next(), Some(WordLength::Five));
        assert_eq!(WordLength::Six.next(), Some(WordLength::Seven));
        assert_eq!(WordLength::Seven.next(), None);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&WordLength::Six).expect("serialize");
        assert_eq!(json, "6");
        let back: WordLength = serde_json::from_str("5").expect("deserialize");
        assert_eq!(back, WordLength::Five);
        assert!(serde_json::from_str::<WordLength>("9").is_err());
    }
}
