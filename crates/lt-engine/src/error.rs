//! Error types for the selection and scoring engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while running a session.
///
/// None of these are fatal. The worst outcome of any engine operation is an
/// operator-visible rejection message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A roll was started with no names in the roster.
    #[error("the roster is empty, add names before rolling")]
    EmptyRoster,

    /// Points were awarded with no settled winner to receive them.
    #[error("no settled winner to award points to")]
    InvalidScoreTarget,

    /// A destructive clear was requested without confirmation.
    #[error("clearing all scores requires confirmation")]
    ConfirmationRequired,

    /// A clear was requested but the ledger is already empty.
    #[error("nothing to clear, the ledger is empty")]
    NothingToClear,
}
