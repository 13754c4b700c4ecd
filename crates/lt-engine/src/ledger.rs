//! The score ledger: a transaction-fold of point awards with bounded undo.
//!
//! Balances are the fold of the full (unbounded) award history. Only the
//! most recent transactions are kept in the undo buffer; once a transaction
//! ages out it can never be undone, but its effect stays folded into the
//! totals.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default capacity of the undo buffer.
pub const DEFAULT_UNDO_CAPACITY: usize = 10;

/// One signed point-delta event attributed to a participant. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTransaction {
    /// The participant receiving the delta.
    pub name: String,
    /// Signed point delta. Any integer is valid.
    pub delta: i64,
    /// When the award was made.
    pub timestamp: DateTime<Utc>,
}

/// A participant's running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Participant name.
    pub name: String,
    /// Current total.
    pub points: i64,
}

/// Mapping of participant to total score, plus the bounded undo buffer.
///
/// Entries keep first-appearance order so ranked exports break ties by
/// insertion order without any extra bookkeeping.
#[derive(Debug, Clone)]
pub struct ScoreLedger {
    balances: Vec<BalanceEntry>,
    buffer: VecDeque<ScoreTransaction>,
    capacity: usize,
}

impl Default for ScoreLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreLedger {
    /// Create an empty ledger with the default undo capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_UNDO_CAPACITY)
    }

    /// Create an empty ledger with a custom undo capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            balances: Vec::new(),
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a ledger from previously persisted balances and buffer.
    ///
    /// The buffer is trimmed to capacity from the front (oldest discarded)
    /// in case the stored payload predates a capacity change.
    pub fn from_parts(
        balances: Vec<BalanceEntry>,
        mut buffer: Vec<ScoreTransaction>,
        capacity: usize,
    ) -> Self {
        if buffer.len() > capacity {
            buffer.drain(..buffer.len() - capacity);
        }
        Self {
            balances,
            buffer: buffer.into(),
            capacity,
        }
    }

    /// Apply a transaction: record it, evict the oldest if over capacity,
    /// and adjust the participant's balance. Returns the new balance.
    pub fn apply(&mut self, tx: ScoreTransaction) -> i64 {
        let balance = self.adjust(&tx.name, tx.delta);
        self.buffer.push_back(tx);
        if self.buffer.len() > self.capacity {
            self.buffer.pop_front();
        }
        balance
    }

    /// Undo the most recent transaction, exactly reversing its effect.
    ///
    /// The participant is removed from the mapping entirely if the reversal
    /// leaves them at or below zero. Returns the popped transaction and the
    /// participant's resulting balance, or `None` on an empty buffer.
    pub fn undo_last(&mut self) -> Option<(ScoreTransaction, i64)> {
        let tx = self.buffer.pop_back()?;
        let balance = self.adjust(&tx.name, -tx.delta);
        if balance <= 0 {
            self.balances.retain(|e| e.name != tx.name);
        }
        Some((tx, balance))
    }

    fn adjust(&mut self, name: &str, delta: i64) -> i64 {
        if let Some(entry) = self.balances.iter_mut().find(|e| e.name == name) {
            entry.points += delta;
            entry.points
        } else {
            self.balances.push(BalanceEntry {
                name: name.to_string(),
                points: delta,
            });
            delta
        }
    }

    /// Current balance for a participant, if any.
    pub fn balance_of(&self, name: &str) -> Option<i64> {
        self.balances
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.points)
    }

    /// Balances in first-appearance order.
    pub fn balances(&self) -> &[BalanceEntry] {
        &self.balances
    }

    /// Transactions still eligible for undo, oldest first.
    pub fn buffer(&self) -> impl Iterator<Item = &ScoreTransaction> {
        self.buffer.iter()
    }

    /// Number of transactions still eligible for undo.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Undo buffer capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether both the balances and the undo buffer are empty.
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty() && self.buffer.is_empty()
    }

    /// Empty the balances and the undo buffer.
    pub fn clear(&mut self) {
        self.balances.clear();
        self.buffer.clear();
    }

    /// Balances ranked by descending score, ties in first-appearance order.
    pub fn ranked(&self) -> Vec<&BalanceEntry> {
        let mut ranked: Vec<&BalanceEntry> = self.balances.iter().collect();
        // Stable sort preserves insertion order among equal scores.
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked
    }

    /// Render a ranked plain-text export with a generation timestamp header.
    ///
    /// Pure; performs no mutation.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Score Export\n============\n");
        out.push_str(&format!(
            "Generated: {}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if self.balances.is_empty() {
            out.push_str("No scores recorded.\n");
            return out;
        }
        for (i, entry) in self.ranked().iter().enumerate() {
            out.push_str(&format!("{:>3}. {} [{}]\n", i + 1, entry.name, entry.points));
        }
        out
    }
}
