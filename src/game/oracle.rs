//! Match oracle collaborator interface.

use super::constants::SELECTION_LIMIT;
use super::entities::CardId;

/// The combinatorial "is this a valid match / does any match exist"
/// predicate. The core treats it as a pure, already-implemented oracle; the
/// actual attribute rule lives with the embedder.
pub trait MatchOracle: Send + Sync {
    /// Whether the three cards form a valid match.
    fn is_match(&self, cards: [CardId; SELECTION_LIMIT]) -> bool;

    /// Whether any valid match can be formed from `cards`. Drives the
    /// session-ending exhaustion check over deck ∪ grid.
    fn exists_match(&self, cards: &[CardId]) -> bool;
}

/// Simple pluggable rule for demos and tests: a triple matches when the sum
/// of its identifiers is divisible by `modulus`. With `modulus == 1` every
/// triple matches.
pub struct ModuloOracle {
    modulus: usize,
}

impl ModuloOracle {
    pub fn new(modulus: usize) -> Self {
        assert!(modulus > 0, "modulus must be positive");
        Self { modulus }
    }
}

impl MatchOracle for ModuloOracle {
    fn is_match(&self, cards: [CardId; SELECTION_LIMIT]) -> bool {
        cards.iter().sum::<usize>() % self.modulus == 0
    }

    fn exists_match(&self, cards: &[CardId]) -> bool {
        let n = cards.len();
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    if self.is_match([cards[i], cards[j], cards[k]]) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulo_rule_accepts_and_rejects() {
        let oracle = ModuloOracle::new(3);
        assert!(oracle.is_match([0, 1, 2]));
        assert!(!oracle.is_match([0, 1, 3]));
    }

    #[test]
    fn exists_match_scans_triples() {
        let oracle = ModuloOracle::new(100);
        assert!(!oracle.exists_match(&[1, 2, 3]));
        assert!(oracle.exists_match(&[10, 40, 50, 7]));
        assert!(!oracle.exists_match(&[1, 2]));
    }
}
