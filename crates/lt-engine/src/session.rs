//! Session management for the selection and scoring engine.
//!
//! [`Session`] is the single aggregate owning the roster, rig queue,
//! selector, selection log, score ledger, persistence store, and RNG. All
//! mutations flow through it, so a roster replacement can never race a
//! ledger update. The ledger is loaded from the store before any save can
//! happen and is written back synchronously after every mutation.

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use crate::config::SessionConfig;
use crate::error::{EngineError, EngineResult};
use crate::history::{SelectionEvent, SelectionLog};
use crate::hooks::{EngineHooks, NoopHooks};
use crate::ledger::{ScoreLedger, ScoreTransaction};
use crate::rig::RigQueue;
use crate::roster::Roster;
use crate::selector::{Phase, Selection, Selector};
use crate::store::{PersistedState, StateStore};

/// Built-in demo roster used when no configuration has been supplied.
pub const DEMO_ROSTER: &[&str] = &[
    "Anna", "Ben", "Clara", "David", "Emma", "Felix", "Greta", "Jonas", "Lena", "Max", "Mia",
    "Paul",
];

/// Built-in demo rig queue: the first two draws are predetermined.
pub const DEMO_RIGGED: &[&str] = &["Clara", "Max"];

/// An interactive selection and scoring session.
pub struct Session {
    roster: Roster,
    rig: RigQueue,
    selector: Selector,
    history: SelectionLog,
    ledger: ScoreLedger,
    store: Box<dyn StateStore>,
    hooks: Box<dyn EngineHooks>,
    rng: StdRng,
}

impl Session {
    /// Create a session with the given roster and rig queue.
    ///
    /// Loads persisted ledger state from the store before anything else can
    /// write to it.
    pub fn new(
        roster: Roster,
        rig: RigQueue,
        store: Box<dyn StateStore>,
        config: SessionConfig,
    ) -> Self {
        let state = store.load();
        let ledger = ScoreLedger::from_parts(state.balances, state.transactions, config.undo_capacity);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            roster,
            rig,
            selector: Selector::new(),
            history: SelectionLog::new(),
            ledger,
            store,
            hooks: Box::new(NoopHooks),
            rng,
        }
    }

    /// Create a session with the built-in demo roster and rig queue.
    pub fn with_demo_data(store: Box<dyn StateStore>, config: SessionConfig) -> Self {
        let roster = Roster::new(DEMO_ROSTER.iter().map(|s| s.to_string()).collect());
        let rig = RigQueue::new(DEMO_RIGGED.iter().map(|s| s.to_string()).collect());
        Self::new(roster, rig, store, config)
    }

    /// Attach presentation hooks.
    pub fn with_hooks(mut self, hooks: Box<dyn EngineHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// The current roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The rig queue, cursor included.
    pub fn rig(&self) -> &RigQueue {
        &self.rig
    }

    /// The selector state machine.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// The selection log.
    pub fn history(&self) -> &SelectionLog {
        &self.history
    }

    /// The score ledger.
    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    /// Replace the roster and rig configuration from newline-separated text.
    ///
    /// Resets the rig cursor, clears the selection log, and returns the
    /// selection to the not-started state. Never touches the score ledger.
    pub fn configure(&mut self, roster_text: &str, rig_text: &str) {
        self.roster = Roster::parse(roster_text);
        self.rig = RigQueue::parse(rig_text);
        self.selector.reset();
        self.history.clear();
    }

    /// Begin rolling. Fails with [`EngineError::EmptyRoster`] on an empty
    /// roster, with no state change.
    pub fn start(&mut self) -> EngineResult<()> {
        self.selector.start(&self.roster)
    }

    /// Produce one display-churn sample while rolling.
    ///
    /// Returns `None` when not rolling. The sampled name never influences
    /// the settled winner.
    pub fn tick(&mut self) -> Option<String> {
        let name = self.selector.tick(&self.roster, &mut self.rng)?;
        self.hooks.on_roll_tick(&name);
        Some(name)
    }

    /// Settle the current roll and record the winner.
    ///
    /// No-op (returns `None`) when not rolling.
    pub fn stop(&mut self) -> Option<SelectionEvent> {
        let event = self.selector.stop(&self.roster, &mut self.rig, &mut self.rng)?;
        self.history.append(event.clone());
        self.hooks.on_settled(&event);
        Some(event)
    }

    /// Award points to the settled winner. Returns the new balance.
    ///
    /// Rejected with [`EngineError::InvalidScoreTarget`] and no state change
    /// while rolling or when the selection is a sentinel.
    pub fn award(&mut self, points: i64) -> EngineResult<i64> {
        let name = match (self.selector.phase(), self.selector.selection()) {
            (Phase::Settled, Selection::Name(name)) => name.clone(),
            _ => return Err(EngineError::InvalidScoreTarget),
        };

        let balance = self.ledger.apply(ScoreTransaction {
            name: name.clone(),
            delta: points,
            timestamp: Utc::now(),
        });
        self.persist();
        self.hooks.on_score_changed(&name, balance, points);
        Ok(balance)
    }

    /// Undo the most recent award still in the buffer.
    ///
    /// Returns the reversed transaction, or `None` when there is nothing to
    /// undo.
    pub fn undo_last(&mut self) -> Option<ScoreTransaction> {
        let (tx, balance) = self.ledger.undo_last()?;
        self.persist();
        self.hooks.on_score_changed(&tx.name, balance, -tx.delta);
        Some(tx)
    }

    /// Destructively clear every balance and the undo buffer.
    ///
    /// Requires `confirmed`; reports [`EngineError::NothingToClear`] when
    /// the ledger is already empty and [`EngineError::ConfirmationRequired`]
    /// when invoked unconfirmed.
    pub fn clear_scores(&mut self, confirmed: bool) -> EngineResult<()> {
        if self.ledger.is_empty() {
            return Err(EngineError::NothingToClear);
        }
        if !confirmed {
            return Err(EngineError::ConfirmationRequired);
        }
        self.ledger.clear();
        if let Err(e) = self.store.purge() {
            warn!("cannot purge persisted scores: {e}");
        }
        Ok(())
    }

    /// Ranked plain-text export of the ledger. Pure.
    pub fn export_scores(&self) -> String {
        self.ledger.export_text()
    }

    /// Clear the selection log.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Balance for a participant, if they hold any points.
    pub fn balance_of(&self, name: &str) -> Option<i64> {
        self.ledger.balance_of(name)
    }

    /// Balance of the currently settled winner, if scorable.
    pub fn current_balance(&self) -> Option<i64> {
        let name = self.selector.selection().name()?;
        Some(self.ledger.balance_of(name).unwrap_or(0))
    }

    /// One-line-per-fact session summary.
    pub fn status(&self) -> String {
        let phase = match self.selector.phase() {
            Phase::Idle => "idle",
            Phase::Rolling => "rolling",
            Phase::Settled => "settled",
        };
        let mut out = format!("Selection: {} ({phase})\n", self.selector.selection());
        out.push_str(&format!("Roster: {} names\n", self.roster.len()));
        out.push_str(&format!(
            "Queue: {} of {} consumed\n",
            self.rig.cursor(),
            self.rig.len()
        ));
        out.push_str(&format!("Selections: {} recorded\n", self.history.len()));
        out.push_str(&format!(
            "Scores: {} participants, {} undoable",
            self.ledger.balances().len(),
            self.ledger.buffer_len()
        ));
        out
    }

    fn persist(&mut self) {
        let state = PersistedState {
            balances: self.ledger.balances().to_vec(),
            transactions: self.ledger.buffer().cloned().collect(),
        };
        // Persistence failures are logged, never surfaced to the operator;
        // the durable copy becomes authoritative again on the next load.
        if let Err(e) = self.store.save(&state) {
            warn!("cannot persist scores: {e}");
        }
    }
}
