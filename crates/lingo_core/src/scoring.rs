//! Scoring rules for classic words and final-mode rewards.

use crate::length::WordLength;
use derive_new::new;
use serde::Serialize;

/// Points available for a word and the cost of each wrong guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, new)]
pub struct Scoring {
    /// Potential score when the word becomes active.
    pub base: u64,
    /// Deducted from the potential on every wrong guess.
    pub penalty: u64,
}

impl Scoring {
    /// Returns the scoring for a word of the given length.
    pub fn for_length(length: WordLength) -> Self {
        match length {
            WordLength::Four => Self::new(1000, 100),
            WordLength::Five | WordLength::Six | WordLength::Seven => Self::new(2000, 200),
        }
    }
}

/// Reward for solving the final-mode word at `stage` with `vault` banked.
///
/// Stage 4 pays half the vault, stage 5 the vault, stages 6 and 7 double it.
/// The stage 7 grand prize is paid on top and is not part of this amount.
pub fn final_reward(stage: WordLength, vault: u64) -> u64 {
    match stage {
        WordLength::Four => vault / 2,
        WordLength::Five => vault,
        WordLength::Six | WordLength::Seven => vault.saturating_mul(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_by_length() {
        assert_eq!(Scoring::for_length(WordLength::Four), Scoring::new(1000, 100));
        for length in [WordLength::Five, WordLength::Six, WordLength::Seven] {
            assert_eq!(Scoring::for_length(length), Scoring::new(2000, 200));
        }
    }

    #[test]
    fn test_final_reward_ladder() {
        assert_eq!(final_reward(WordLength::Four, 1000), 500);
        assert_eq!(final_reward(WordLength::Five, 1000), 1000);
        assert_eq!(final_reward(WordLength::Six, 1000), 2000);
        assert_eq!(final_reward(WordLength::Seven, 1000), 2000);
    }

    #[test]
    fn test_half_vault_rounds_down() {
        assert_eq!(final_reward(WordLength::Four, 1101), 550);
        assert_eq!(final_reward(WordLength::Four, 0), 0);
    }
}
