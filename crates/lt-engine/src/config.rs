//! Configuration for a selection session.

use crate::ledger::DEFAULT_UNDO_CAPACITY;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible draws. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Capacity of the undo buffer.
    pub undo_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            undo_capacity: DEFAULT_UNDO_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Set a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the undo buffer capacity (minimum 1).
    pub fn with_undo_capacity(mut self, capacity: usize) -> Self {
        self.undo_capacity = capacity.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.undo_capacity, DEFAULT_UNDO_CAPACITY);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default().with_seed(7).with_undo_capacity(3);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.undo_capacity, 3);
    }

    #[test]
    fn capacity_floor_is_one() {
        let cfg = SessionConfig::default().with_undo_capacity(0);
        assert_eq!(cfg.undo_capacity, 1);
    }
}
