//! Visual theme and animation sampling.
//!
//! Pure functions of `(is_active, phase, from, elapsed_in_phase)` — the
//! renderer samples these each frame and never keeps animation state of its
//! own. Transitions animate over [`ANIM`] from the `from` phase's values,
//! ease-in-ease-out; entering Hold the circle snaps to size instead. With no
//! `from` phase (the first Inspire of a session) everything shows its steady
//! state, so starting a session does not repaint the screen.

use std::time::Duration;

use respira_core::session::Phase;

/// Duration of the visual transitions (background, circle color/scale/glow).
pub const ANIM: Duration = Duration::from_secs(4);

/// Circle scale while instructed to breathe in or hold.
pub const SCALE_FULL: f32 = 1.2;

/// Circle scale while instructed to breathe out.
pub const SCALE_SMALL: f32 = 0.9;

/// sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend toward `other` by `t` in [0, 1].
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 { (f32::from(a) + (f32::from(b) - f32::from(a)) * t) as u8 };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

// Product palette.
pub const CHERRY_PINK: Rgb = Rgb::new(0xF2, 0xAE, 0xBC);
pub const SILVER_BLUE: Rgb = Rgb::new(0x5A, 0x86, 0xCB);
pub const BURGUNDY: Rgb = Rgb::new(0x6C, 0x08, 0x20);
pub const LAPIS_BLUE: Rgb = Rgb::new(0x26, 0x42, 0x8B);

/// Radial gradient: `center` at the middle of the screen, `edge` at the rim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub center: Rgb,
    pub edge: Rgb,
}

impl Gradient {
    /// Color at normalized distance `d` in [0, 1] from the center.
    pub fn sample(self, d: f32) -> Rgb {
        self.center.lerp(self.edge, d)
    }

    fn lerp(self, other: Gradient, t: f32) -> Gradient {
        Gradient {
            center: self.center.lerp(other.center, t),
            edge: self.edge.lerp(other.edge, t),
        }
    }
}

/// Pink gradient shown while idle and during Inspire.
pub const GRADIENT_PINK: Gradient = Gradient {
    center: Rgb::new(0xF2, 0xDC, 0xDB),
    edge: CHERRY_PINK,
};

/// Blue gradient shown during Hold.
pub const GRADIENT_BLUE: Gradient = Gradient {
    center: Rgb::new(0xE2, 0xEC, 0xF8),
    edge: SILVER_BLUE,
};

/// Dark-red gradient shown during Expire.
pub const GRADIENT_WINE: Gradient = Gradient {
    center: Rgb::new(0xF9, 0xE3, 0xE0),
    edge: BURGUNDY,
};

/// Ease-in-ease-out curve on [0, 1] (smoothstep).
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Eased transition progress for `elapsed` within a phase.
fn progress(elapsed: Duration) -> f32 {
    ease_in_out(elapsed.as_secs_f32() / ANIM.as_secs_f32())
}

fn gradient_for(phase: Phase) -> Gradient {
    match phase {
        Phase::Inspire => GRADIENT_PINK,
        Phase::Hold => GRADIENT_BLUE,
        Phase::Expire => GRADIENT_WINE,
    }
}

/// Background gradient for the current frame.
///
/// Idle shows the pink gradient; while active the gradient eases from the
/// `from` phase's over [`ANIM`]. No `from` phase means no transition: the
/// opening Inspire keeps the idle pink.
pub fn background(
    is_active: bool,
    phase: Phase,
    from: Option<Phase>,
    elapsed: Duration,
) -> Gradient {
    if !is_active {
        return GRADIENT_PINK;
    }
    match from {
        Some(prev) => gradient_for(prev).lerp(gradient_for(phase), progress(elapsed)),
        None => gradient_for(phase),
    }
}

fn steady_scale(phase: Phase) -> f32 {
    match phase {
        Phase::Inspire | Phase::Hold => SCALE_FULL,
        Phase::Expire => SCALE_SMALL,
    }
}

/// Circle scale for the current frame.
///
/// Grows into Inspire and shrinks into Expire over [`ANIM`]; snaps to full
/// size the instant Hold is entered (transition duration zero). The opening
/// Inspire appears at full size directly.
pub fn circle_scale(phase: Phase, from: Option<Phase>, elapsed: Duration) -> f32 {
    match (phase, from) {
        (Phase::Hold, _) | (_, None) => steady_scale(phase),
        (_, Some(prev)) => {
            let start = steady_scale(prev);
            let end = steady_scale(phase);
            start + (end - start) * progress(elapsed)
        }
    }
}

fn fill_for(phase: Phase) -> Rgb {
    match phase {
        Phase::Inspire => CHERRY_PINK,
        Phase::Hold => SILVER_BLUE,
        Phase::Expire => BURGUNDY,
    }
}

/// Circle fill color, eased from the `from` phase's fill over [`ANIM`].
pub fn circle_color(phase: Phase, from: Option<Phase>, elapsed: Duration) -> Rgb {
    match from {
        Some(prev) => fill_for(prev).lerp(fill_for(phase), progress(elapsed)),
        None => fill_for(phase),
    }
}

const GLOW_BASE: f32 = 0.4;
const GLOW_HOLD: f32 = 1.0;

fn steady_glow(phase: Phase) -> f32 {
    if phase == Phase::Hold { GLOW_HOLD } else { GLOW_BASE }
}

/// Glow intensity in [0, 1], strongest during Hold, eased over [`ANIM`].
pub fn glow_level(phase: Phase, from: Option<Phase>, elapsed: Duration) -> f32 {
    let Some(prev) = from else {
        return steady_glow(phase);
    };
    let start = steady_glow(prev);
    let end = steady_glow(phase);
    start + (end - start) * progress(elapsed)
}

// ============================================================================
// Copy
// ============================================================================

/// Headline text ("live region" of the screen).
pub fn headline(is_active: bool, phase: Phase) -> &'static str {
    if !is_active {
        return "Respira";
    }
    match phase {
        Phase::Inspire => "Inspira...",
        Phase::Hold => "Segura...",
        Phase::Expire => "Expira...",
    }
}

/// Body copy below the headline. Static per session state, not per phase.
pub fn body_copy(is_active: bool) -> &'static str {
    if is_active {
        "Respira fundo, sente o ar e lembra que tá tudo bem desacelerar 💕"
    } else {
        "Um espaço para desacelerar e se reconectar com sua respiração 🌸"
    }
}

/// Descriptive label for the animated circle.
pub fn circle_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Inspire => "Inspirar",
        Phase::Hold => "Segurar o ar",
        Phase::Expire => "Expirar",
    }
}

/// Label for the session toggle control.
pub fn session_button_label(is_active: bool) -> &'static str {
    if is_active {
        "Parar sessão"
    } else {
        "Iniciar sessão"
    }
}

/// Label for the sound toggle control.
pub fn sound_button_label(sound_on: bool) -> &'static str {
    if sound_on { "Som ligado" } else { "Som desligado" }
}
