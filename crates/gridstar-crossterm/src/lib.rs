//! Crossterm terminal view for gridstar.
//!
//! [`TermView`] draws a [`Scene`] with one coloured two-column block per
//! grid cell and turns terminal events into editor [`Input`]s. It also
//! implements [`SearchObserver`]: once initialised it redraws and pauses
//! for a fixed delay after every step.

pub mod input;
pub mod scene;

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor, event, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridstar_core::Point;
use gridstar_search::{Observation, SearchObserver};
use log::warn;

pub use input::{Input, Layout, map_event};
pub use scene::{CellKind, Scene, render_ascii};

/// Colour of each kind of cell.
pub fn cell_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Empty => Color::Rgb {
            r: 128,
            g: 128,
            b: 128,
        },
        CellKind::Blocked => Color::Black,
        CellKind::Open => Color::Rgb {
            r: 31,
            g: 119,
            b: 180,
        },
        CellKind::Closed | CellKind::Current => Color::Rgb {
            r: 214,
            g: 39,
            b: 40,
        },
        CellKind::Path => Color::Rgb {
            r: 240,
            g: 240,
            b: 240,
        },
        CellKind::Start => Color::Yellow,
        CellKind::Goal => Color::Rgb {
            r: 44,
            g: 160,
            b: 44,
        },
    }
}

const HELP: &str = "left: block  right: unblock  space: start  r: scatter  c: clear  enter: reset  q: quit";

/// Rows above the grid: title and status.
const HEADER_ROWS: i32 = 2;

/// A terminal back-end for the visualizer.
pub struct TermView {
    scene: Scene,
    delay: Duration,
    mouse_enabled: bool,
    active: bool,
    error: Option<io::Error>,
}

impl TermView {
    /// Create a view for `scene`, pausing `delay` after each observed step.
    pub fn new(scene: Scene, delay: Duration) -> Self {
        Self {
            scene,
            delay,
            mouse_enabled: true,
            active: false,
            error: None,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
    }

    pub fn layout(&self) -> Layout {
        Layout {
            origin: Point::new(0, HEADER_ROWS),
            cell_width: 2,
            grid: self.scene.range,
        }
    }

    /// Enter raw mode and the alternate screen.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            queue!(stdout, event::EnableMouseCapture)?;
        }
        stdout.flush()?;
        self.active = true;
        Ok(())
    }

    /// Wait up to `timeout` for an event and map it.
    pub fn poll(&self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let ev = event::read()?;
        Ok(map_event(&ev, &self.layout()))
    }

    /// Draw the whole scene.
    pub fn draw(&self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        let layout = self.layout();

        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            Print(self.scene.title()),
            cursor::MoveTo(0, 1),
            Print(self.scene.status())
        )?;

        for p in self.scene.range {
            let (col, row) = layout.to_screen(p);
            queue!(
                stdout,
                cursor::MoveTo(col, row),
                SetBackgroundColor(cell_color(self.scene.kind(p))),
                Print("  ")
            )?;
        }

        let help_row = (HEADER_ROWS + self.scene.range.height() + 1) as u16;
        queue!(
            stdout,
            ResetColor,
            cursor::MoveTo(0, help_row),
            SetForegroundColor(Color::DarkGrey),
            Print(HELP),
            ResetColor
        )?;
        stdout.flush()
    }

    /// Take the first drawing error recorded while observing.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Leave the alternate screen and restore the terminal.
    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = queue!(stdout, event::DisableMouseCapture);
        }
        let _ = queue!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

impl SearchObserver for TermView {
    fn observe(&mut self, obs: &Observation) {
        self.scene.apply(obs);
        if !self.active {
            return;
        }
        if let Err(e) = self.draw() {
            warn!("dropping frame {}: {e}", obs.iteration);
            self.error.get_or_insert(e);
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl Drop for TermView {
    fn drop(&mut self) {
        self.close();
    }
}
