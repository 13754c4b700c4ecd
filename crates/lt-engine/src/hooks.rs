//! The presentation seam: events the engine raises for a view layer.
//!
//! Animation timing, confetti, and layout are collaborators outside the
//! engine; these callbacks are the only hooks exposed outward. All methods
//! default to no-ops so frontends implement only what they render.

use crate::history::SelectionEvent;

/// Callbacks consumed by a presentation layer.
pub trait EngineHooks {
    /// A display-churn tick produced while rolling. Purely visual.
    fn on_roll_tick(&mut self, name: &str) {
        let _ = name;
    }

    /// A winner was finalized.
    fn on_settled(&mut self, event: &SelectionEvent) {
        let _ = event;
    }

    /// A participant's balance changed by `delta` (award or undo).
    fn on_score_changed(&mut self, name: &str, new_balance: i64, delta: i64) {
        let _ = (name, new_balance, delta);
    }
}

/// Hooks that ignore every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl EngineHooks for NoopHooks {}
