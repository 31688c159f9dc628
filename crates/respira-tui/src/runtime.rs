//! TUI runtime: owns the terminal and the main event loop.
//!
//! The loop is tick-driven: one `event::poll` deadline per iteration doubles
//! as the frame clock. A single Tick advances the session engine, which
//! reports every phase boundary crossed since the last tick, so there are no
//! per-phase timers to cancel — stopping the session simply drops its anchor.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use respira_core::config::Config;
use tracing::{debug, warn};

use crate::audio::CuePlayer;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while a session is running (animations are live).
pub const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Poll cadence while idle, to save CPU.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(200);

/// The main TUI runtime.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: AppState,
    audio: Option<CuePlayer>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Sets up the terminal and audio backend.
    ///
    /// Audio failures are not fatal: the screen runs silent and logs a
    /// warning. With `disable_audio` set, the device is never opened.
    pub fn new(config: Config) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let audio = if config.disable_audio {
            debug!("audio disabled by configuration");
            None
        } else {
            match CuePlayer::new(&config) {
                Ok(player) => Some(player),
                Err(error) => {
                    warn!("audio unavailable, running silent: {error:#}");
                    None
                }
            }
        };

        Ok(Self {
            terminal,
            state: AppState::new(config),
            audio,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Both ticks and input mark dirty: ticks drive the animation,
                // and toggles would feel sluggish waiting for the idle tick.
                dirty = true;

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Waits for terminal input or the next tick, whichever comes first.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast ticks only while the session animates; idle screens are
        // static apart from input.
        let tick_interval = if self.state.session.is_active() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        let poll_duration = tick_interval.saturating_sub(self.last_tick.elapsed());

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?, Instant::now()));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?, Instant::now()));
            }
        }

        // Emit Tick after poll - we've now waited until the tick interval
        // elapsed (or woke early due to terminal input).
        if self.last_tick.elapsed() >= tick_interval {
            let now = Instant::now();
            events.push(UiEvent::Tick(now));
            self.last_tick = now;
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::PlayCue(phase) => {
                debug!(?phase, "phase cue");
                if let Some(audio) = &self.audio {
                    audio.play(phase);
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
