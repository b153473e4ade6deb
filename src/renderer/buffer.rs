//! FrameBuffer - the in-memory surface.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be
//! displayed on the terminal. Every frame the root primitive draws into it,
//! then the [`DiffRenderer`](super::DiffRenderer) pushes the changed cells out.
//!
//! Flat storage with row-major indexing: `index = y * width + x`.

use crate::types::{Cell, Style};

use super::surface::Surface;

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Get buffer width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Get buffer height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Convert (x, y) to flat index.
    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x as i32, y as i32) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Base character at (x, y).
    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        self.get(x, y).map(|cell| cell.ch)
    }

    /// Row `y` as a string of base characters.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width).filter_map(|x| self.char_at(x, y)).collect()
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % width) as u16;
            let y = (i / width) as u16;
            (x, y, cell)
        })
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let size = width as usize * height as usize;
        self.cells.resize(size, Cell::default());
        self.clear();
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn set_content(&mut self, x: i32, y: i32, ch: char, combining: &[char], style: Style) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x as u16, y as u16);
        let cell = &mut self.cells[idx];
        cell.ch = ch;
        cell.combining.clear();
        cell.combining.extend_from_slice(combining);
        cell.style = style;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Rgba};

    #[test]
    fn test_framebuffer_creation() {
        let buffer = FrameBuffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.size(), (80, 24));
        assert_eq!(buffer.iter().count(), 80 * 24);
    }

    #[test]
    fn test_framebuffer_set_content() {
        let mut buffer = FrameBuffer::new(10, 10);
        let style = Style::default().fg(Rgba::RED).bg(Rgba::BLACK).attrs(Attr::BOLD);
        buffer.set_content(5, 5, 'X', &[], style);

        let cell = buffer.get(5, 5).unwrap();
        assert_eq!(cell.ch, 'X');
        assert_eq!(cell.style, style);
    }

    #[test]
    fn test_framebuffer_ignores_out_of_bounds() {
        let mut buffer = FrameBuffer::new(4, 2);
        buffer.set_content(-1, 0, 'X', &[], Style::default());
        buffer.set_content(0, -1, 'X', &[], Style::default());
        buffer.set_content(4, 0, 'X', &[], Style::default());
        buffer.set_content(0, 2, 'X', &[], Style::default());

        assert!(buffer.iter().all(|(_, _, cell)| cell.ch == ' '));
    }

    #[test]
    fn test_resize_and_clear() {
        let mut buffer = FrameBuffer::new(3, 3);
        buffer.set_content(1, 1, 'Q', &[], Style::default());
        buffer.resize(5, 2);
        assert_eq!(buffer.size(), (5, 2));
        assert_eq!(buffer.row_text(0), "     ");

        buffer.set_content(4, 1, 'Z', &[], Style::default());
        buffer.clear();
        assert_eq!(buffer.row_text(1), "     ");
    }
}
