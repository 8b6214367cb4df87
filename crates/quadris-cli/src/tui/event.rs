use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by the runtime.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// A frame boundary, carrying the time since the previous one.
    Frame(Duration),
    /// Render timing; emitted after anything changed.
    Render,
    /// Terminal events such as key input and resize.
    Crossterm(CrosstermEvent),
}
