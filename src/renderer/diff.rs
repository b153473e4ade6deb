//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: move there, switch style only if it differs from the
//!      last emitted style, print the cell
//! 3. Flush the writer once
//! 4. Store current frame as previous for next comparison

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use super::buffer::FrameBuffer;
use super::RenderError;
use crate::types::{Attr, Cell, Rgba, Style};

/// Differential renderer for fullscreen mode.
pub struct DiffRenderer {
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    /// Create a new diff renderer.
    pub fn new() -> Self {
        Self { previous: None }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render<W: Write>(&mut self, out: &mut W, buffer: &FrameBuffer) -> Result<bool, RenderError> {
        let mut has_changes = false;
        let mut last_style: Option<Style> = None;

        queue!(out, BeginSynchronizedUpdate)?;

        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        for (x, y, cell) in buffer.iter() {
            let changed = match &self.previous {
                Some(prev) if same_size => prev.get(x, y) != Some(cell),
                _ => true,
            };
            if !changed {
                continue;
            }

            has_changes = true;
            queue!(out, MoveTo(x, y))?;
            if last_style != Some(cell.style) {
                write_style(out, cell.style)?;
                last_style = Some(cell.style);
            }
            write_cell(out, cell)?;
        }

        queue!(out, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        out.flush()?;

        tracing::trace!(has_changes, "frame rendered");
        self.previous = Some(buffer.clone());

        Ok(has_changes)
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if we have a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cell output
// =============================================================================

/// Map our color to a crossterm color.
pub(crate) fn to_crossterm_color(color: Rgba) -> Color {
    if color.is_terminal_default() || color.is_transparent() {
        Color::Reset
    } else if color.is_ansi() {
        Color::AnsiValue(color.ansi_index())
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

fn write_style<W: Write>(out: &mut W, style: Style) -> Result<(), RenderError> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_crossterm_color(style.fg)),
        SetBackgroundColor(to_crossterm_color(style.bg)),
    )?;

    const ATTRIBUTES: [(Attr, Attribute); 8] = [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::BLINK, Attribute::SlowBlink),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::HIDDEN, Attribute::Hidden),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ];
    for (flag, attribute) in ATTRIBUTES {
        if style.attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

fn write_cell<W: Write>(out: &mut W, cell: &Cell) -> Result<(), RenderError> {
    if cell.combining.is_empty() {
        queue!(out, Print(cell.ch))?;
    } else {
        let mut grapheme = String::with_capacity(1 + cell.combining.len());
        grapheme.push(cell.ch);
        grapheme.extend(cell.combining.iter());
        queue!(out, Print(grapheme))?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
