//! UI event types.
//!
//! All external inputs (terminal input, the tick clock) are converted to
//! `UiEvent` before being processed by the reducer.

use std::time::Instant;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick driving the breathing schedule and animations.
    ///
    /// Carries the observation instant so the reducer stays deterministic
    /// under test.
    Tick(Instant),

    /// Raw terminal input (keys, resize), stamped with its observation
    /// instant so session toggles anchor deterministically too.
    Terminal(CrosstermEvent, Instant),
}
