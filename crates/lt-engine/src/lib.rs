//! Selection and scoring engine for Lostrommel.
//!
//! Picks a winner from a roster of names, silently honoring a hidden
//! "rigged" queue of predetermined winners before falling back to random
//! draws, and keeps a persistent per-participant point ledger with bounded
//! undo and ranked export. Presentation (animation, layout) is left to the
//! frontend via [`hooks::EngineHooks`].

pub mod config;
pub mod error;
pub mod history;
pub mod hooks;
pub mod ledger;
pub mod rig;
pub mod roster;
pub mod selector;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use error::{EngineError, EngineResult};
pub use history::{SelectionEvent, SelectionLog};
pub use hooks::{EngineHooks, NoopHooks};
pub use ledger::{BalanceEntry, ScoreLedger, ScoreTransaction};
pub use rig::RigQueue;
pub use roster::Roster;
pub use selector::{Phase, Selection, Selector};
pub use session::Session;
pub use store::{JsonFileStore, MemoryStore, PersistedState, StateStore};
