//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects. Every visual is derived
//! from `(is_active, phase, elapsed_in_phase)` via the theme module.

use std::time::Instant;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::state::AppState;
use crate::theme::{self, Rgb};

/// Terminal cells are roughly twice as tall as wide; x distances are halved
/// so the disc reads as a circle.
const CELL_ASPECT: f32 = 0.5;

/// Glow ring thickness in row units at full glow.
const GLOW_WIDTH: f32 = 2.5;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Renders the entire screen to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let now = Instant::now();

    let is_active = state.session.is_active();
    let phase = state.session.phase();
    let from = state.session.animates_from();
    let elapsed = state.session.elapsed_in_phase(now);

    let gradient = theme::background(is_active, phase, from, elapsed);
    paint_background(frame.buffer_mut(), area, gradient);

    let rows = Layout::vertical([
        Constraint::Fill(2),   // circle zone
        Constraint::Length(1), // circle caption
        Constraint::Length(1),
        Constraint::Length(1), // headline
        Constraint::Length(1),
        Constraint::Length(2), // body copy
        Constraint::Length(1),
        Constraint::Length(1), // controls
        Constraint::Fill(1),
        Constraint::Length(1), // key hints
    ])
    .split(area);

    if is_active {
        paint_circle(frame.buffer_mut(), rows[0], gradient, phase, from, elapsed);
        let caption = Paragraph::new(theme::circle_label(phase))
            .alignment(Alignment::Center)
            .style(Style::default().fg(color(theme::LAPIS_BLUE)));
        frame.render_widget(caption, rows[1]);
    }

    let headline = Paragraph::new(theme::headline(is_active, phase))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(color(theme::LAPIS_BLUE))
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(headline, rows[3]);

    let body = Paragraph::new(theme::body_copy(is_active))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color(theme::LAPIS_BLUE)));
    frame.render_widget(body, rows[5]);

    frame.render_widget(controls_line(state), rows[7]);

    let hints = Paragraph::new("espaço inicia/para · s som · q sai")
        .alignment(Alignment::Center)
        .style(Style::default().fg(color(theme::LAPIS_BLUE)).add_modifier(Modifier::DIM));
    frame.render_widget(hints, rows[9]);
}

/// The two control "buttons". The sound toggle renders reversed when on,
/// mirroring its pressed state.
fn controls_line(state: &AppState) -> Paragraph<'static> {
    let base = Style::default()
        .fg(color(theme::LAPIS_BLUE))
        .add_modifier(Modifier::BOLD);
    let pressed = if state.sound_on {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    };

    let line = Line::from(vec![
        Span::styled(
            format!("[ {} ]", theme::session_button_label(state.session.is_active())),
            base,
        ),
        Span::raw("   "),
        Span::styled(
            format!("[ {} ]", theme::sound_button_label(state.sound_on)),
            pressed,
        ),
    ]);

    Paragraph::new(line).alignment(Alignment::Center)
}

/// Paints the radial background gradient cell by cell.
fn paint_background(buf: &mut Buffer, area: Rect, gradient: theme::Gradient) {
    let cx = f32::from(area.x) + f32::from(area.width) / 2.0;
    let cy = f32::from(area.y) + f32::from(area.height) / 2.0;
    let max_d = distance(f32::from(area.x), f32::from(area.y), cx, cy).max(1.0);

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let d = distance(f32::from(x), f32::from(y), cx, cy) / max_d;
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_bg(color(gradient.sample(d)));
            }
        }
    }
}

/// Paints the pulsing disc and its glow ring into the circle zone.
fn paint_circle(
    buf: &mut Buffer,
    area: Rect,
    gradient: theme::Gradient,
    phase: respira_core::session::Phase,
    from: Option<respira_core::session::Phase>,
    elapsed: std::time::Duration,
) {
    if area.width < 4 || area.height < 2 {
        return;
    }

    let scale = theme::circle_scale(phase, from, elapsed);
    let fill = theme::circle_color(phase, from, elapsed);
    let glow = theme::glow_level(phase, from, elapsed);

    let cx = f32::from(area.x) + f32::from(area.width) / 2.0;
    let cy = f32::from(area.y) + f32::from(area.height) / 2.0;
    let base_radius = (f32::from(area.height) * 0.42)
        .min(f32::from(area.width) * CELL_ASPECT * 0.42)
        .max(1.0);
    let radius = base_radius * scale;
    let glow_width = GLOW_WIDTH * (0.5 + glow);

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let d = distance(f32::from(x), f32::from(y), cx, cy);
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            if d <= radius {
                cell.set_bg(color(fill));
            } else if d <= radius + glow_width {
                // Fade the fill into the surrounding gradient; a stronger
                // glow keeps more of the fill further out.
                let under = gradient.sample(d / (radius * 3.0));
                let t = (d - radius) / glow_width;
                cell.set_bg(color(under.lerp(fill, (1.0 - t) * glow)));
            }
        }
    }
}

/// Aspect-corrected distance in row units.
fn distance(x: f32, y: f32, cx: f32, cy: f32) -> f32 {
    let dx = (x - cx) * CELL_ASPECT;
    let dy = y - cy;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use respira_core::config::Config;

    use super::*;
    use crate::state::AppState;

    fn draw(state: &AppState) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("terminal");
        terminal.draw(|frame| render(state, frame)).expect("draw");
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf.cell((x, y)).map_or(" ", |cell| cell.symbol()));
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn idle_screen_shows_neutral_copy() {
        let state = AppState::new(Config::default());
        let text = buffer_text(&draw(&state));
        assert!(text.contains("Respira"));
        assert!(text.contains("Iniciar sessão"));
        assert!(text.contains("Som desligado"));
    }

    #[test]
    fn active_screen_shows_phase_headline() {
        let mut state = AppState::new(Config::default());
        state.session.start(std::time::Instant::now());
        let text = buffer_text(&draw(&state));
        assert!(text.contains("Inspira..."));
        assert!(text.contains("Parar sessão"));
        assert!(text.contains("Inspirar"));
    }

    #[test]
    fn session_start_keeps_the_idle_background() {
        let idle = AppState::new(Config::default());
        let mut started = AppState::new(Config::default());
        started.session.start(std::time::Instant::now());

        let idle_buf = draw(&idle);
        let started_buf = draw(&started);

        // The bottom row sits outside the circle zone: its background cells
        // must be identical on the first frame of a session.
        let y = idle_buf.area.height - 1;
        for x in 0..idle_buf.area.width {
            assert_eq!(
                idle_buf.cell((x, y)).map(|cell| cell.bg),
                started_buf.cell((x, y)).map(|cell| cell.bg),
            );
        }
    }
}
