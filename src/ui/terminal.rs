//! Crossterm-backed full-screen renderer

use std::io::{self, Stdout, Write};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use tracing::{debug, warn};

use super::frame::Frame;
use crate::error::{Error, Result};

const INK: char = '█';

/// Draws frames produced by the scheduler
pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

/// Owns the terminal for the lifetime of the run.
///
/// Creating one switches to raw mode on the alternate screen; dropping it
/// puts the terminal back.
pub struct TerminalRenderer {
    out: Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Result<Self> {
        enable_raw_mode().map_err(Error::Terminal)?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(Error::Terminal(e));
        }
        debug!("Terminal initialized");
        Ok(Self { out })
    }

    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let (ox, oy) = frame.origin_on(cols, rows);

        queue!(self.out, Clear(ClearType::All))?;
        for placement in frame.placements() {
            let x = ox.saturating_add(placement.x);
            if x >= cols {
                continue;
            }
            let visible = usize::from(cols - x);
            for (dy, row) in placement.glyph.rows().iter().enumerate() {
                let y = oy.saturating_add(placement.y).saturating_add(dy as u16);
                if y >= rows {
                    break;
                }
                let line: String = row
                    .chars()
                    .take(visible)
                    .map(|c| if c == '#' { INK } else { ' ' })
                    .collect();
                queue!(self.out, MoveTo(x, y), Print(line))?;
            }
        }
        self.out.flush()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.draw(frame).map_err(Error::Render)
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, Show, LeaveAlternateScreen) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
}
