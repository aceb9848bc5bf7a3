//! Interactive terminal Lissajous viewer.
//!
//! Plays every role the core leaves to its environment: a tick loop drives
//! the generators, the keyboard acts as the control surface, and the terminal
//! is the renderer (static curve as `.`, live trace as `*`).
//!
//! Keys:
//! - TAB: switch between the x and y axis
//! - LEFT / RIGHT: select a constituent frequency
//! - UP / DOWN: raise / lower its amplitude
//! - [ / ]: lower / raise the axis phase offset
//! - Q or ESC: quit
//!
//! Logs go to `terminal_trace.log`; set `RUST_LOG=lissajous=debug` to see
//! every parameter edit.

use anyhow::Result;
use crossterm::{
    ExecutableCommand, QueueableCommand,
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use lissajous::ReactiveController;
use lissajous::config::{AMPLITUDE_MAX, AMPLITUDE_MIN, Axis, OFFSET_MAX, OFFSET_MIN, OFFSET_STEP};
use std::fs::File;
use std::io::{Write, stdout};
use std::panic;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const TICKS_PER_FRAME: usize = 24;
const FRAME: Duration = Duration::from_millis(16);
const AMPLITUDE_STEP: f64 = 5.0;
const PLOT_WIDTH: usize = 72;
const PLOT_HEIGHT: usize = 28;

struct Surface {
    axis: Axis,
    index: usize,
}

impl Surface {
    fn handle_key(&mut self, controller: &ReactiveController, key: &KeyEvent) -> Result<()> {
        let wave = controller.axis(self.axis);
        match key.code {
            KeyCode::Tab => {
                self.axis = match self.axis {
                    Axis::X => Axis::Y,
                    Axis::Y => Axis::X,
                };
                self.index = self.index.min(controller.axis(self.axis).len() - 1);
            }
            KeyCode::Left => self.index = self.index.saturating_sub(1),
            KeyCode::Right => self.index = (self.index + 1).min(wave.len() - 1),
            KeyCode::Up | KeyCode::Down => {
                let delta = if key.code == KeyCode::Up {
                    AMPLITUDE_STEP
                } else {
                    -AMPLITUDE_STEP
                };
                let current = wave.amplitude(self.index).unwrap_or_default();
                let next = (current + delta).clamp(AMPLITUDE_MIN, AMPLITUDE_MAX);
                controller.set_amplitude(self.axis, self.index, next)?;
            }
            KeyCode::Char('[') | KeyCode::Char(']') => {
                let delta = if key.code == KeyCode::Char(']') {
                    OFFSET_STEP
                } else {
                    -OFFSET_STEP
                };
                let next = (wave.offset() + delta).clamp(OFFSET_MIN, OFFSET_MAX);
                controller.set_offset(self.axis, next)?;
            }
            _ => {}
        }
        Ok(())
    }
}

fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}

/// Largest value an axis can reach: the sum of its absolute amplitudes.
fn extent(controller: &ReactiveController, axis: Axis) -> f64 {
    let sum: f64 = controller.axis(axis).amplitudes().iter().map(|a| a.abs()).sum();
    sum.max(1.0)
}

fn plot(
    grid: &mut [Vec<char>],
    points: impl Iterator<Item = (f64, f64)>,
    sx: f64,
    sy: f64,
    mark: char,
) {
    for (x, y) in points {
        let col = ((x / sx + 1.0) * 0.5 * (PLOT_WIDTH - 1) as f64).round();
        let row = ((1.0 - y / sy) * 0.5 * (PLOT_HEIGHT - 1) as f64).round();
        if (0.0..PLOT_WIDTH as f64).contains(&col) && (0.0..PLOT_HEIGHT as f64).contains(&row) {
            grid[row as usize][col as usize] = mark;
        }
    }
}

fn draw(controller: &ReactiveController, surface: &Surface) -> Result<()> {
    let sx = extent(controller, Axis::X);
    let sy = extent(controller, Axis::Y);
    let mut grid = vec![vec![' '; PLOT_WIDTH]; PLOT_HEIGHT];
    plot(&mut grid, controller.static_curve().points(), sx, sy, '.');
    plot(&mut grid, controller.live_trace().snapshot().into_iter(), sx, sy, '*');

    let mut out = stdout();
    out.queue(MoveTo(0, 0))?;
    for axis in Axis::ALL {
        let wave = controller.axis(axis);
        let marker = if axis == surface.axis { '>' } else { ' ' };
        let amplitudes: Vec<String> = wave
            .amplitudes()
            .iter()
            .enumerate()
            .map(|(i, a)| {
                if axis == surface.axis && i == surface.index {
                    format!("[{:>3}]", a)
                } else {
                    format!(" {:>3} ", a)
                }
            })
            .collect();
        out.queue(Clear(ClearType::CurrentLine))?;
        out.queue(Print(format!(
            "{} {:<20} offset {:>3}  {}\r\n",
            marker,
            axis.label(),
            wave.offset(),
            amplitudes.join("")
        )))?;
    }
    out.queue(Print("\r\n"))?;
    for row in grid {
        let line: String = row.into_iter().collect();
        out.queue(Print(format!("|{}|\r\n", line)))?;
    }
    out.queue(Print(
        "TAB axis  LEFT/RIGHT select  UP/DOWN amplitude  [ ] offset  Q quit\r\n",
    ))?;
    out.flush()?;
    Ok(())
}

fn init_logging() -> Result<()> {
    let file = File::create("terminal_trace.log")?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lissajous=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialise tracing subscriber: {err}"))?;
    Ok(())
}

fn cleanup_terminal() {
    let _ = stdout().execute(Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn main() -> Result<()> {
    init_logging()?;
    let mut controller = ReactiveController::with_defaults()?;
    let mut surface = Surface {
        axis: Axis::X,
        index: 0,
    };
    info!("terminal trace starting");

    terminal::enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(Hide)?;
    stdout().execute(Clear(ClearType::All))?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    let result = (|| -> Result<()> {
        loop {
            if event::poll(FRAME)?
                && let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                if is_quit_key(key.code) {
                    break;
                }
                surface.handle_key(&controller, &key)?;
            }
            controller.tick_n(TICKS_PER_FRAME);
            draw(&controller, &surface)?;
        }
        Ok(())
    })();

    cleanup_terminal();
    info!(
        ticks = controller.generator(Axis::X).steps(),
        recomputes = controller.sampler().recompute_count(),
        "terminal trace finished"
    );
    result
}
