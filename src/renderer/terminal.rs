//! Terminal session.
//!
//! Owns stdout for the lifetime of the UI: raw mode, alternate screen, mouse
//! reporting and a hidden cursor. Everything is restored when the session is
//! dropped, including on unwind.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use super::buffer::FrameBuffer;
use super::diff::DiffRenderer;
use super::RenderError;
use crate::primitives::Primitive;

/// A fullscreen terminal that primitives can be drawn to.
pub struct Terminal {
    out: Stdout,
    buffer: FrameBuffer,
    renderer: DiffRenderer,
}

impl Terminal {
    /// Enter fullscreen mode with mouse reporting enabled.
    pub fn enter() -> Result<Self, RenderError> {
        let (width, height) = terminal::size()?;
        let mut out = io::stdout();

        enable_raw_mode()?;
        execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            Hide,
            Clear(ClearType::All)
        )?;
        tracing::debug!(width, height, "terminal session started");

        Ok(Self {
            out,
            buffer: FrameBuffer::new(width, height),
            renderer: DiffRenderer::new(),
        })
    }

    /// Current size as (width, height).
    pub fn size(&self) -> (u16, u16) {
        (self.buffer.width(), self.buffer.height())
    }

    /// Adopt a new terminal size. The next draw is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.buffer.resize(width, height);
        self.renderer.invalidate();
    }

    /// Draw one frame of `root` and push the changed cells to the terminal.
    pub fn draw(&mut self, root: &dyn Primitive) -> Result<(), RenderError> {
        self.buffer.clear();
        root.draw(&mut self.buffer);
        self.renderer.render(&mut self.out, &self.buffer)?;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        execute!(self.out, Show, DisableMouseCapture, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}
