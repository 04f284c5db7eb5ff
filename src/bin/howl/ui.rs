//! Phonemeboard rendering
//!
//! The pad is filled with the colour of the current control pair (hue and
//! saturation straight from the polar mapper, value 1). A status line shows
//! the numbers, a help bar the keys.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use howl_dsp::control::{ControlPair, InteractionState, Presenter};

use super::board;

/// Presenter that remembers the last frame for drawing.
#[derive(Debug, Default)]
pub struct Screen {
    pub state: InteractionState,
    pub control: Option<ControlPair>,
}

impl Presenter for Screen {
    fn present(&mut self, state: InteractionState, control: Option<ControlPair>) {
        self.state = state;
        self.control = control;
    }
}

/// Values shown in the status line that do not come from the presenter.
pub struct Status {
    pub sample_rate: f32,
    pub bitcrush_mix: f32,
    pub reverb_mix: f32,
    pub sustain: bool,
}

/// Convert HSV (all in [0,1]) to an RGB terminal colour.
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Color {
    let h = (hue.rem_euclid(1.0)) * 6.0;
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |channel: f32| ((channel + m) * 255.0).round() as u8;
    Color::Rgb(to_byte(r), to_byte(g), to_byte(b))
}

/// Draw the whole screen and return the pad area (the touch surface).
pub fn render(frame: &mut Frame, screen: &Screen, status: &Status) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Pad
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let (colour, title) = match (screen.state, screen.control) {
        (InteractionState::Idle, _) | (_, None) => (Color::Black, " howl ".to_string()),
        (_, Some(control)) => (
            hsv(control.hue, control.display_saturation(), 1.0),
            format!(" howl - /{}/ ", board::vowel_name(control.hue)),
        ),
    };

    let pad_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().bg(colour));
    let pad = pad_block.inner(chunks[0]);
    frame.render_widget(pad_block, chunks[0]);

    let state_colour = match screen.state {
        InteractionState::Idle => Color::DarkGray,
        InteractionState::Highlighted => Color::Green,
        InteractionState::Selected => Color::Yellow,
    };
    let (hue, saturation) = screen
        .control
        .map(|c| (c.hue, c.saturation))
        .unwrap_or((0.0, 0.0));

    let line = Line::from(vec![
        Span::styled(
            format!(" {:?}  ", screen.state),
            Style::default().fg(state_colour),
        ),
        Span::styled(
            format!("hue {:.3}  sat {:.3}  ", hue, saturation),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!(
                "crush {:.0}%  reverb {:.0}%  ",
                status.bitcrush_mix * 100.0,
                status.reverb_mix * 100.0
            ),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            if status.sustain { "sustain on  " } else { "sustain off  " },
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz", status.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );

    let help = Paragraph::new(" [mouse] sing  [H] Sustain  [b/B] Crush -/+  [r/R] Reverb -/+  [Q] Quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);

    pad
}
