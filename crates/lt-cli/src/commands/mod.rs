pub mod board;
pub mod export;
pub mod play;
pub mod reset;

use std::path::Path;

use lt_engine::ledger::DEFAULT_UNDO_CAPACITY;
use lt_engine::{JsonFileStore, ScoreLedger, StateStore};

/// Load the persisted ledger for read-only commands (board, export).
fn load_ledger(dir: &Path) -> ScoreLedger {
    let state = JsonFileStore::new(dir).load();
    ScoreLedger::from_parts(state.balances, state.transactions, DEFAULT_UNDO_CAPACITY)
}
