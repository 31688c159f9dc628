//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use respira_core::session::Phase;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick(now) => {
            let mut effects = Vec::new();
            for phase in state.session.advance(now) {
                // Audibility is decided here, at the trigger instant, so
                // toggling sound mid-cycle never touches the schedule.
                if state.sound_on {
                    effects.push(UiEffect::PlayCue(phase));
                }
            }
            effects
        }
        UiEvent::Terminal(term_event, now) => handle_terminal_event(state, term_event, now),
    }
}

fn handle_terminal_event(state: &mut AppState, event: Event, now: Instant) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(state, key, now),
        // Resize is handled by re-rendering from current state.
        _ => Vec::new(),
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) -> Vec<UiEffect> {
    if key.kind == KeyEventKind::Release {
        return Vec::new();
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            vec![UiEffect::Quit]
        }
        KeyCode::Char(' ') | KeyCode::Enter => toggle_session(state, now),
        KeyCode::Char('s') => {
            state.sound_on = !state.sound_on;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Starts or stops the session per the session-toggle control.
///
/// Starting fires the Inspire cue immediately (when audible); stopping
/// cancels everything and fires nothing.
fn toggle_session(state: &mut AppState, now: Instant) -> Vec<UiEffect> {
    if state.session.is_active() {
        state.session.stop();
        return Vec::new();
    }

    let started = state.session.start(now);
    if started && state.sound_on {
        vec![UiEffect::PlayCue(Phase::Inspire)]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use respira_core::config::Config;

    use super::*;

    fn press_at(code: KeyCode, now: Instant) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), now)
    }

    fn press(code: KeyCode) -> UiEvent {
        press_at(code, Instant::now())
    }

    fn state() -> AppState {
        AppState::new(Config::default())
    }

    #[test]
    fn space_starts_then_stops_session() {
        let mut state = state();

        let effects = update(&mut state, press(KeyCode::Char(' ')));
        assert!(state.session.is_active());
        assert_eq!(state.session.phase(), Phase::Inspire);
        // Sound is off by default: starting stays silent.
        assert!(effects.is_empty());

        let effects = update(&mut state, press(KeyCode::Char(' ')));
        assert!(!state.session.is_active());
        assert_eq!(state.session.phase(), Phase::Inspire);
        assert!(effects.is_empty());
    }

    #[test]
    fn starting_with_sound_on_fires_inspire_cue() {
        let mut state = state();
        state.sound_on = true;

        let effects = toggle_session(&mut state, Instant::now());
        assert_eq!(effects, vec![UiEffect::PlayCue(Phase::Inspire)]);
    }

    #[test]
    fn tick_transition_fires_cue_only_when_sound_on() {
        let mut state = state();
        state.sound_on = true;
        let t0 = Instant::now();
        toggle_session(&mut state, t0);

        let effects = update(&mut state, UiEvent::Tick(t0 + Duration::from_secs(4)));
        assert_eq!(effects, vec![UiEffect::PlayCue(Phase::Hold)]);

        // Toggle sound off mid-cycle: the next trigger stays silent but the
        // visual transition still happens on schedule.
        state.sound_on = false;
        let effects = update(&mut state, UiEvent::Tick(t0 + Duration::from_secs(7)));
        assert!(effects.is_empty());
        assert_eq!(state.session.phase(), Phase::Expire);
    }

    #[test]
    fn sound_toggle_while_inactive_has_no_effect_until_start() {
        let mut state = state();

        let effects = update(&mut state, press(KeyCode::Char('s')));
        assert!(effects.is_empty());
        assert!(state.sound_on);
        assert!(!state.session.is_active());
        assert_eq!(state.session.phase(), Phase::Inspire);

        // Ticks while inactive do nothing regardless of the preference.
        let effects = update(&mut state, UiEvent::Tick(Instant::now()));
        assert!(effects.is_empty());
    }

    #[test]
    fn stop_prevents_later_scheduled_triggers() {
        let mut state = state();
        state.sound_on = true;
        let t0 = Instant::now();
        toggle_session(&mut state, t0);
        update(&mut state, UiEvent::Tick(t0 + Duration::from_secs(12)));

        state.session.stop();
        // Second cycle's hold point (t=16) is gone with the session.
        let effects = update(&mut state, UiEvent::Tick(t0 + Duration::from_secs(16)));
        assert!(effects.is_empty());
        assert_eq!(state.session.phase(), Phase::Inspire);
    }

    #[test]
    fn quit_keys() {
        let mut state = state();
        assert_eq!(update(&mut state, press(KeyCode::Char('q'))), vec![
            UiEffect::Quit
        ]);
        assert_eq!(update(&mut state, press(KeyCode::Esc)), vec![UiEffect::Quit]);

        let ctrl_c = UiEvent::Terminal(
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Instant::now(),
        );
        assert_eq!(update(&mut state, ctrl_c), vec![UiEffect::Quit]);
    }

    #[test]
    fn key_events_anchor_the_session_to_their_instant() {
        let mut state = state();
        state.sound_on = true;
        let t0 = Instant::now();

        let effects = update(&mut state, press_at(KeyCode::Char(' '), t0));
        assert_eq!(effects, vec![UiEffect::PlayCue(Phase::Inspire)]);

        // The schedule runs from the key's observation instant, not from the
        // wall clock at dispatch time.
        let effects = update(&mut state, UiEvent::Tick(t0 + Duration::from_secs(4)));
        assert_eq!(effects, vec![UiEffect::PlayCue(Phase::Hold)]);
    }
}
