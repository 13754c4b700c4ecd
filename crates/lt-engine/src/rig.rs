//! The rig queue: an ordered override sequence consumed before random draws.
//!
//! While the queue has unconsumed entries, every settled roll dispenses the
//! next entry in order. Once the cursor reaches the end, selection falls back
//! to uniform-random draws from the roster. The cursor only ever moves
//! forward; it is reset to zero solely by replacing the configuration.

use serde::{Deserialize, Serialize};

use crate::roster::parse_name_list;

/// An ordered, consumable sequence of predetermined winners.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RigQueue {
    names: Vec<String>,
    cursor: usize,
}

impl RigQueue {
    /// Create a rig queue from a list of names, cursor at zero.
    pub fn new(names: Vec<String>) -> Self {
        Self { names, cursor: 0 }
    }

    /// Parse a rig queue from newline-separated text.
    ///
    /// Same cleanup rules as the roster: trim, drop blanks.
    pub fn parse(text: &str) -> Self {
        Self::new(parse_name_list(text))
    }

    /// Consume and return the next unconsumed entry, advancing the cursor.
    ///
    /// Returns `None` once every entry has been dispensed. Consumption is
    /// permanent; the cursor never moves backward.
    pub fn consume_next(&mut self) -> Option<String> {
        let name = self.names.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(name)
    }

    /// All entries, consumed or not, in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The next-unconsumed index. Always within `[0, len]`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of entries, consumed or not.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the queue has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of entries not yet dispensed.
    pub fn remaining(&self) -> usize {
        self.names.len() - self.cursor
    }

    /// Whether every entry has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumed_in_order_exactly_once() {
        let mut rig = RigQueue::parse("Ben\nClara");
        assert_eq!(rig.consume_next().as_deref(), Some("Ben"));
        assert_eq!(rig.cursor(), 1);
        assert_eq!(rig.consume_next().as_deref(), Some("Clara"));
        assert_eq!(rig.cursor(), 2);
        assert_eq!(rig.consume_next(), None);
        assert_eq!(rig.cursor(), 2);
    }

    #[test]
    fn empty_queue_is_exhausted() {
        let mut rig = RigQueue::default();
        assert!(rig.is_exhausted());
        assert_eq!(rig.consume_next(), None);
        assert_eq!(rig.cursor(), 0);
    }

    #[test]
    fn remaining_counts_down() {
        let mut rig = RigQueue::new(vec!["A".into(), "B".into(), "C".into()]);
        assert_eq!(rig.remaining(), 3);
        rig.consume_next();
        assert_eq!(rig.remaining(), 2);
        assert!(!rig.is_exhausted());
    }

    #[test]
    fn cursor_never_exceeds_len() {
        let mut rig = RigQueue::new(vec!["A".into()]);
        for _ in 0..5 {
            rig.consume_next();
        }
        assert_eq!(rig.cursor(), 1);
        assert_eq!(rig.cursor(), rig.len());
    }

    #[test]
    fn parse_cleans_input() {
        let rig = RigQueue::parse(" Ben \n\n Clara ");
        assert_eq!(rig.len(), 2);
        assert_eq!(rig.cursor(), 0);
    }
}
