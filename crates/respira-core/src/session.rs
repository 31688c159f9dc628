//! Breathing session engine.
//!
//! One 12-second cycle split into three phases: inspire [0s, 4s), hold
//! [4s, 7s), expire [7s, 12s). The engine is driven by a single repeating
//! tick (`advance`) rather than chained one-shot timers, so stopping a
//! session cancels everything atomically: once the anchor is dropped no
//! stale transition can fire.

use std::time::{Duration, Instant};

/// Offset within a cycle at which the hold phase begins.
pub const HOLD_AT: Duration = Duration::from_secs(4);

/// Offset within a cycle at which the expire phase begins.
pub const EXPIRE_AT: Duration = Duration::from_secs(7);

/// Length of one full inspire/hold/expire cycle.
pub const CYCLE: Duration = Duration::from_secs(12);

/// The instructed breathing action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Inspire,
    Hold,
    Expire,
}

impl Phase {
    /// Next phase in cycle order (wraps Expire back to Inspire).
    pub fn next(self) -> Phase {
        match self {
            Phase::Inspire => Phase::Hold,
            Phase::Hold => Phase::Expire,
            Phase::Expire => Phase::Inspire,
        }
    }

    /// Previous phase in cycle order. The phase a transition animates from.
    pub fn previous(self) -> Phase {
        match self {
            Phase::Inspire => Phase::Expire,
            Phase::Hold => Phase::Inspire,
            Phase::Expire => Phase::Hold,
        }
    }

    /// Offset from cycle start at which this phase is entered.
    pub fn starts_at(self) -> Duration {
        match self {
            Phase::Inspire => Duration::ZERO,
            Phase::Hold => HOLD_AT,
            Phase::Expire => EXPIRE_AT,
        }
    }
}

/// Returns the scheduled phase for an offset within one cycle.
///
/// `offset` must already be reduced mod [`CYCLE`].
pub fn phase_at(offset: Duration) -> Phase {
    if offset < HOLD_AT {
        Phase::Inspire
    } else if offset < EXPIRE_AT {
        Phase::Hold
    } else {
        Phase::Expire
    }
}

/// Guided-breathing session state machine.
///
/// Inactive until [`start`](Self::start); while active, [`advance`](Self::advance)
/// walks the phase forward on each tick and reports every phase entered so the
/// caller can fire cues. [`stop`](Self::stop) is idempotent and resets the
/// phase to Inspire.
#[derive(Debug, Default)]
pub struct BreathingSession {
    started_at: Option<Instant>,
    phase: Phase,
    phase_entered_at: Option<Instant>,
}

impl BreathingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Starts a session at `now`, entering Inspire immediately.
    ///
    /// Returns true on a real Inactive→Active transition (the caller fires
    /// the Inspire cue); false when already active.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_active() {
            return false;
        }
        self.started_at = Some(now);
        self.phase = Phase::Inspire;
        self.phase_entered_at = Some(now);
        true
    }

    /// Stops the session and resets the phase to Inspire. No cue fires.
    ///
    /// Idempotent: stopping an inactive session is a no-op.
    pub fn stop(&mut self) {
        self.started_at = None;
        self.phase = Phase::Inspire;
        self.phase_entered_at = None;
    }

    /// Drives the state machine forward to `now`.
    ///
    /// Returns every phase entered since the last call, in cycle order. On a
    /// normal tick cadence this is empty or a single phase; after a stall the
    /// skipped phases are reported in order so cue ordering holds. Re-entering
    /// Inspire at the cycle boundary counts as the next period's t=0 trigger.
    pub fn advance(&mut self, now: Instant) -> Vec<Phase> {
        let (Some(started_at), Some(prev_entered)) = (self.started_at, self.phase_entered_at)
        else {
            return Vec::new();
        };

        let elapsed = now.saturating_duration_since(started_at);
        let cycles = elapsed.as_nanos() / CYCLE.as_nanos();
        let offset = Duration::from_nanos((elapsed.as_nanos() % CYCLE.as_nanos()) as u64);
        let target = phase_at(offset);
        let target_entered = started_at + CYCLE * (cycles as u32) + target.starts_at();

        // Entry instants, not phases, detect the boundary: after a stall
        // longer than a full cycle the target phase can equal the current one
        // while a whole round of transitions happened in between.
        if target_entered <= prev_entered {
            return Vec::new();
        }

        let mut entered = Vec::new();
        loop {
            self.phase = self.phase.next();
            entered.push(self.phase);
            if self.phase == target {
                break;
            }
        }
        // Anchor the final phase to its scheduled entry, not the tick that
        // observed it, so animations never accumulate tick jitter.
        self.phase_entered_at = Some(target_entered);
        entered
    }

    /// Phase the current phase is transitioning from, for rendering.
    ///
    /// None during the first Inspire of a session: nothing precedes it, so
    /// the visuals show their steady state instead of blending from Expire.
    /// After the first transition this is the previous phase in cycle order,
    /// including Expire at each wraparound.
    pub fn animates_from(&self) -> Option<Phase> {
        (self.is_active() && self.phase_entered_at != self.started_at)
            .then(|| self.phase.previous())
    }

    /// Time spent in the current phase as of `now`. Zero when inactive.
    pub fn elapsed_in_phase(&self, now: Instant) -> Duration {
        self.phase_entered_at
            .map(|entered| now.saturating_duration_since(entered))
            .unwrap_or(Duration::ZERO)
    }
}
