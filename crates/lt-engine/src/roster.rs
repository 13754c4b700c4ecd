//! The roster: the pool of names eligible for random selection.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// An ordered pool of selectable participant names.
///
/// Duplicates are permitted and act as independent equally-likely slots, so a
/// name listed twice is twice as likely to win a random draw.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Create a roster from a list of names.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Parse a roster from newline-separated text.
    ///
    /// Surrounding whitespace is stripped and blank lines are discarded.
    pub fn parse(text: &str) -> Self {
        Self {
            names: parse_name_list(text),
        }
    }

    /// All names in the pool, in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of slots in the pool (duplicates count separately).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the pool has no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Draw a uniform-random name from the pool, or `None` if empty.
    pub fn sample(&self, rng: &mut StdRng) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        Some(&self.names[rng.random_range(0..self.names.len())])
    }
}

/// Split newline-separated text into trimmed, non-blank entries.
pub(crate) fn parse_name_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn parse_strips_and_drops_blanks() {
        let r = Roster::parse("  Anna \n\nBen\n   \nClara\n");
        assert_eq!(r.names(), ["Anna", "Ben", "Clara"]);
    }

    #[test]
    fn parse_empty_text() {
        let r = Roster::parse("\n  \n");
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn duplicates_are_kept() {
        let r = Roster::parse("Anna\nAnna\nBen");
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn sample_from_pool() {
        let r = Roster::parse("Anna\nBen\nClara");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let name = r.sample(&mut rng).unwrap();
            assert!(r.names().iter().any(|n| n == name));
        }
    }

    #[test]
    fn sample_empty_is_none() {
        let r = Roster::default();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(r.sample(&mut rng).is_none());
    }

    #[test]
    fn sample_single_name() {
        let r = Roster::parse("Anna");
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(r.sample(&mut rng), Some("Anna"));
    }
}
