//! The selection log: an append-only record of past settled draws.
//!
//! This is a plain display log. Insertion order is its only invariant; it is
//! unbounded and cleared either by the operator or by replacing the
//! roster/rig configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::selector::Selection;

/// The result of one completed draw. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionEvent {
    /// The settled winner (a name, or the unresolved sentinel).
    pub winner: Selection,
    /// Whether the winner was dispensed from the rig queue.
    pub rigged: bool,
    /// When the draw settled.
    pub timestamp: DateTime<Utc>,
}

/// A chronological log of selection events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionLog {
    events: Vec<SelectionEvent>,
}

impl SelectionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a settled selection.
    pub fn append(&mut self, event: SelectionEvent) {
        self.events.push(event);
    }

    /// All events, oldest first.
    pub fn events(&self) -> &[SelectionEvent] {
        &self.events
    }

    /// Events ordered newest first, the way the operator views them.
    pub fn iter_recent(&self) -> impl Iterator<Item = &SelectionEvent> {
        self.events.iter().rev()
    }

    /// Number of recorded selections.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether anything has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discard every recorded selection.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Render the log as plain text, newest first with position numbers.
    pub fn render_text(&self) -> String {
        if self.events.is_empty() {
            return "No selections recorded.".to_string();
        }
        let mut out = format!("Selections ({}):\n", self.events.len());
        for (i, event) in self.iter_recent().enumerate() {
            out.push_str(&format!(
                "  {}. {}  ({})\n",
                self.events.len() - i,
                event.winner,
                event.timestamp.format("%H:%M:%S"),
            ));
        }
        out.trim_end().to_string()
    }
}
