//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! This keeps the reducer pure: it only mutates state and returns effects,
//! never performs I/O directly.

use respira_core::session::Phase;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Play the cue for a phase that was just entered.
    ///
    /// Only emitted when sound is on at the trigger instant; the audio
    /// backend treats it as fire-and-forget.
    PlayCue(Phase),
}
