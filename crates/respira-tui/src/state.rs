//! Application state.
//!
//! One controller owns the three pieces of mutable state the screen needs:
//! the session engine (phase + active), the sound preference, and the quit
//! flag. Everything the renderer shows derives from these.

use respira_core::config::Config;
use respira_core::session::BreathingSession;

/// TUI application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Breathing session engine (phase, active, timing anchor).
    pub session: BreathingSession,
    /// Whether cues are audible. In-memory only; never persisted.
    pub sound_on: bool,
    /// Loaded configuration (volume, cue files).
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            session: BreathingSession::new(),
            sound_on: config.sound_on_start,
            config,
        }
    }
}
