//! The selector state machine: Idle, Rolling, Settled.
//!
//! The one correctness-critical rule lives in [`Selector::stop`]: if the rig
//! queue has an unconsumed entry, it wins and the cursor advances; otherwise
//! the winner is a fresh uniform draw from the roster. The names cycled while
//! rolling are display churn only and never influence the outcome.

use chrono::Utc;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::history::SelectionEvent;
use crate::rig::RigQueue;
use crate::roster::Roster;

/// The phase of the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No roll in progress and no winner awaiting scoring.
    Idle,
    /// Actively cycling candidate names for visual effect.
    Rolling,
    /// A winner has been finalized and is eligible for scoring.
    Settled,
}

/// The current selection shown to the operator.
///
/// The two sentinel variants are never eligible for scoring; only a settled
/// [`Selection::Name`] can receive points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing has been drawn yet.
    NotStarted,
    /// A draw settled while the roster was empty.
    Unresolved,
    /// A participant name.
    Name(String),
}

impl Selection {
    /// The participant name, if this is a real selection.
    pub fn name(&self) -> Option<&str> {
        match self {
            Selection::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::NotStarted => write!(f, "(not started)"),
            Selection::Unresolved => write!(f, "???"),
            Selection::Name(name) => write!(f, "{name}"),
        }
    }
}

/// The selection state machine.
#[derive(Debug, Clone)]
pub struct Selector {
    phase: Phase,
    selection: Selection,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new()
    }
}

impl Selector {
    /// Create a selector in the not-started state.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            selection: Selection::NotStarted,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current selection (mid-roll churn, settled winner, or a sentinel).
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether a winner is settled and eligible for scoring.
    pub fn can_score(&self) -> bool {
        self.phase == Phase::Settled && matches!(self.selection, Selection::Name(_))
    }

    /// Begin rolling. Fails on an empty roster with no state change.
    ///
    /// Starting while already rolling is a no-op.
    pub fn start(&mut self, roster: &Roster) -> EngineResult<()> {
        if roster.is_empty() {
            return Err(EngineError::EmptyRoster);
        }
        self.phase = Phase::Rolling;
        Ok(())
    }

    /// Sample a roster name for display churn while rolling.
    ///
    /// Has no effect on the eventual winner and is not logged. Returns `None`
    /// when not rolling.
    pub fn tick(&mut self, roster: &Roster, rng: &mut StdRng) -> Option<String> {
        if self.phase != Phase::Rolling {
            return None;
        }
        let name = roster.sample(rng)?.to_string();
        self.selection = Selection::Name(name.clone());
        Some(name)
    }

    /// Finalize the winner and settle.
    ///
    /// Rig queue first, else a fresh uniform draw (independent of whatever
    /// was last shown mid-roll). Returns the emitted event, or `None` when
    /// not rolling (stopping while idle or settled is a no-op).
    pub fn stop(&mut self, roster: &Roster, rig: &mut RigQueue, rng: &mut StdRng) -> Option<SelectionEvent> {
        if self.phase != Phase::Rolling {
            return None;
        }

        let (winner, rigged) = match rig.consume_next() {
            Some(name) => (Selection::Name(name), true),
            None => match roster.sample(rng) {
                Some(name) => (Selection::Name(name.to_string()), false),
                None => (Selection::Unresolved, false),
            },
        };

        self.phase = Phase::Settled;
        self.selection = winner.clone();

        Some(SelectionEvent {
            winner,
            rigged,
            timestamp: Utc::now(),
        })
    }

    /// Return to the not-started state. Used when the configuration is
    /// replaced.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.selection = Selection::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn roster() -> Roster {
        Roster::parse("Anna\nBen\nClara")
    }

    #[test]
    fn starts_not_started() {
        let s = Selector::new();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(*s.selection(), Selection::NotStarted);
        assert!(!s.can_score());
    }

    #[test]
    fn start_empty_roster_fails_without_state_change() {
        let mut s = Selector::new();
        let err = s.start(&Roster::default()).unwrap_err();
        assert_eq!(err, EngineError::EmptyRoster);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn stop_while_idle_is_noop() {
        let mut s = Selector::new();
        let mut rig = RigQueue::default();
        assert!(s.stop(&roster(), &mut rig, &mut rng()).is_none());
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn rigged_entry_wins_first() {
        let mut s = Selector::new();
        let mut rig = RigQueue::parse("Ben");
        let roster = roster();
        let mut rng = rng();

        s.start(&roster).unwrap();
        let event = s.stop(&roster, &mut rig, &mut rng).unwrap();
        assert_eq!(event.winner, Selection::Name("Ben".to_string()));
        assert!(event.rigged);
        assert_eq!(rig.cursor(), 1);
        assert!(s.can_score());
    }

    #[test]
    fn rig_wins_even_if_not_in_roster() {
        let mut s = Selector::new();
        let mut rig = RigQueue::parse("Zoe");
        let roster = roster();
        s.start(&roster).unwrap();
        let event = s.stop(&roster, &mut rig, &mut rng()).unwrap();
        assert_eq!(event.winner, Selection::Name("Zoe".to_string()));
    }

    #[test]
    fn exhausted_rig_falls_back_to_random() {
        let mut s = Selector::new();
        let mut rig = RigQueue::parse("Ben");
        let roster = roster();
        let mut rng = rng();

        s.start(&roster).unwrap();
        s.stop(&roster, &mut rig, &mut rng).unwrap();

        s.start(&roster).unwrap();
        let event = s.stop(&roster, &mut rig, &mut rng).unwrap();
        assert!(!event.rigged);
        let name = event.winner.name().unwrap();
        assert!(roster.names().iter().any(|n| n == name));
        assert_eq!(rig.cursor(), 1);
    }

    #[test]
    fn empty_roster_at_stop_is_unresolved() {
        let mut s = Selector::new();
        let roster = roster();
        s.start(&roster).unwrap();
        // Roster cleared mid-roll.
        let empty = Roster::default();
        let mut rig = RigQueue::default();
        let event = s.stop(&empty, &mut rig, &mut rng()).unwrap();
        assert_eq!(event.winner, Selection::Unresolved);
        assert_eq!(s.phase(), Phase::Settled);
        assert!(!s.can_score());
    }

    #[test]
    fn tick_only_while_rolling() {
        let mut s = Selector::new();
        let roster = roster();
        let mut rng = rng();
        assert!(s.tick(&roster, &mut rng).is_none());

        s.start(&roster).unwrap();
        let name = s.tick(&roster, &mut rng).unwrap();
        assert!(roster.names().iter().any(|n| *n == name));
        assert!(!s.can_score());
    }

    #[test]
    fn winner_independent_of_last_tick() {
        // With a rigged entry the winner is fixed regardless of churn.
        let mut s = Selector::new();
        let mut rig = RigQueue::parse("Clara");
        let roster = roster();
        let mut rng = rng();
        s.start(&roster).unwrap();
        for _ in 0..10 {
            s.tick(&roster, &mut rng);
        }
        let event = s.stop(&roster, &mut rig, &mut rng).unwrap();
        assert_eq!(event.winner, Selection::Name("Clara".to_string()));
    }

    #[test]
    fn reset_returns_to_not_started() {
        let mut s = Selector::new();
        let roster = roster();
        let mut rig = RigQueue::default();
        s.start(&roster).unwrap();
        s.stop(&roster, &mut rig, &mut rng());
        s.reset();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(*s.selection(), Selection::NotStarted);
    }

    #[test]
    fn selection_display() {
        assert_eq!(Selection::NotStarted.to_string(), "(not started)");
        assert_eq!(Selection::Unresolved.to_string(), "???");
        assert_eq!(Selection::Name("Anna".into()).to_string(), "Anna");
    }
}
