//! Howl - audio setup, gesture handling and the UI loop

use std::io::stdout;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::{layout::Rect, DefaultTerminal};

use howl_dsp::choir::{self, ChoirConfig, ChoirControl};
use howl_dsp::control::{
    AudioEngine, Bounds, Dispatcher, PhonemeTable, SustainFlag, TouchEvent, TouchPhase,
    TouchPoint,
};
use howl_dsp::graph::{MasterParams, Phoneme};

use super::board;
use super::ui::{self, Screen, Status};

/// Step size of the b/B and r/R keys
const MIX_STEP: f32 = 0.1;

pub struct Howl {
    config: ChoirConfig,
}

impl Howl {
    pub fn new(config: ChoirConfig) -> Self {
        Self { config }
    }

    /// Open the audio device, start the choir and run the phonemeboard
    /// until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        log::info!("output: {} Hz, {} channels", sample_rate, channels);

        let (mut graph, control) =
            choir::build(&self.config, sample_rate).wrap_err("failed to build the choir")?;
        let params = control.params().clone();

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| graph.render_interleaved(data, channels),
                |err| log::error!("audio stream error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        let sustain = SustainFlag::new(false);
        let dispatcher = Dispatcher::new(board::tables())
            .with_engine(control)
            .with_presenter(Screen::default())
            .with_sustain(sustain.clone());

        let mut pad = Pad {
            dispatcher,
            sustain,
            params,
            sample_rate,
            touches: Vec::new(),
            next_id: 0,
            area: Rect::default(),
            should_quit: false,
        };

        let mut terminal = ratatui::init();
        let result = execute!(stdout(), EnableMouseCapture)
            .wrap_err("failed to enable mouse capture")
            .and_then(|_| pad.run(&mut terminal));
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        drop(stream);
        result
    }
}

/// The terminal as a single-finger touch surface.
struct Pad<T: PhonemeTable<Phoneme = Phoneme>> {
    dispatcher: Dispatcher<T, ChoirControl, Screen>,
    sustain: SustainFlag,
    params: MasterParams,
    sample_rate: f32,
    touches: Vec<TouchPoint>,
    next_id: u64,
    /// Pad area from the last draw, in terminal cells
    area: Rect,
    should_quit: bool,
}

impl<T: PhonemeTable<Phoneme = Phoneme>> Pad<T> {
    fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        // Start muted with an empty snapshot
        self.dispatch(TouchEvent::Ended);

        while !self.should_quit {
            terminal.draw(|frame| {
                let status = Status {
                    sample_rate: self.sample_rate,
                    bitcrush_mix: self.params.bitcrush_mix.get(),
                    reverb_mix: self.params.reverb_mix.get(),
                    sustain: self.sustain.get(),
                };
                let screen = self.dispatcher.presenter();
                let fallback = Screen::default();
                self.area = ui::render(frame, screen.unwrap_or(&fallback), &status);
            })?;

            let area = self.area;
            self.dispatcher.set_bounds(Some(Bounds::new(
                area.x as f32,
                area.y as f32,
                area.width as f32,
                area.height as f32,
            )));

            // Non-blocking, ~60fps
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        // Leave the choir muted
        if let Some(engine) = self.dispatcher.engine_mut() {
            engine.mute();
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                if !self.sustain.toggle() {
                    self.release_retired();
                }
            }
            KeyCode::Char('b') => step(&self.params.bitcrush_mix, -MIX_STEP),
            KeyCode::Char('B') => step(&self.params.bitcrush_mix, MIX_STEP),
            KeyCode::Char('r') => step(&self.params.reverb_mix, -MIX_STEP),
            KeyCode::Char('R') => step(&self.params.reverb_mix, MIX_STEP),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (x, y) = (mouse.column as f32 + 0.5, mouse.row as f32 + 0.5);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Clicks on the status and help rows are not touches
                if !on_pad(self.area, mouse.column, mouse.row) {
                    return;
                }
                // A new finger replaces any touch held by sustain
                self.touches.clear();
                self.next_id += 1;
                self.touches
                    .push(TouchPoint::new(self.next_id, x, y, TouchPhase::Began));
                self.dispatch(TouchEvent::Began);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                for touch in self.touches.iter_mut().filter(|t| t.phase.is_live()) {
                    touch.position.x = x;
                    touch.position.y = y;
                    touch.phase = TouchPhase::Moved;
                }
                self.dispatch(TouchEvent::Moved);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                for touch in self.touches.iter_mut().filter(|t| t.phase.is_live()) {
                    touch.phase = TouchPhase::Ended;
                }
                self.dispatch(TouchEvent::Ended);

                if !self.dispatcher.should_sustain_touches() {
                    self.release_retired();
                }
            }
            _ => {}
        }
    }

    /// Drop touches that already ended and tell the pipeline.
    fn release_retired(&mut self) {
        let before = self.touches.len();
        self.touches.retain(|touch| touch.phase.is_live());
        if self.touches.len() != before {
            self.dispatch(TouchEvent::Ended);
        }
    }

    fn dispatch(&mut self, event: TouchEvent) {
        self.dispatcher.handle(event, &self.touches);
    }
}

fn step(param: &howl_dsp::Param, delta: f32) {
    param.set(param.get() + delta);
}

/// True when the terminal cell lies inside the pad area.
fn on_pad(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && row >= area.y
        && u32::from(column) < u32::from(area.x) + u32::from(area.width)
        && u32::from(row) < u32::from(area.y) + u32::from(area.height)
}
