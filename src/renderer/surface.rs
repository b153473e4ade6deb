//! The drawing surface contract.
//!
//! Primitives never talk to the terminal. They write cells into a [`Surface`],
//! which is either an in-memory [`FrameBuffer`](super::FrameBuffer) or
//! anything else that can accept cell writes and report its size. Writes
//! outside the surface are silently dropped by the surface.

use unicode_width::UnicodeWidthChar;

use crate::types::{Rect, Style};

/// A character grid that primitives draw onto.
pub trait Surface {
    /// Overall size as (width, height).
    fn size(&self) -> (i32, i32);

    /// Write one cell. Out-of-bounds coordinates are ignored.
    fn set_content(&mut self, x: i32, y: i32, ch: char, combining: &[char], style: Style);
}

// =============================================================================
// ClippedSurface
// =============================================================================

/// A view onto another surface that drops writes outside `clip`.
///
/// Scrolling containers hand this to their children so a partially scrolled
/// child cannot paint over neighbors of the container.
pub struct ClippedSurface<'a> {
    inner: &'a mut dyn Surface,
    clip: Rect,
}

impl<'a> ClippedSurface<'a> {
    pub fn new(inner: &'a mut dyn Surface, clip: Rect) -> Self {
        Self { inner, clip }
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }
}

impl Surface for ClippedSurface<'_> {
    fn size(&self) -> (i32, i32) {
        self.inner.size()
    }

    fn set_content(&mut self, x: i32, y: i32, ch: char, combining: &[char], style: Style) {
        if self.clip.contains(x, y) {
            self.inner.set_content(x, y, ch, combining, style);
        }
    }
}

// =============================================================================
// Drawing helpers
// =============================================================================

/// Fill a rectangle with `ch`. Only the part on the surface is visited.
pub fn fill(surface: &mut dyn Surface, rect: Rect, ch: char, style: Style) {
    let (width, height) = surface.size();
    let Some(area) = rect.intersect(&Rect::new(0, 0, width, height)) else {
        return;
    };
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            surface.set_content(x, y, ch, &[], style);
        }
    }
}

/// Print `text` starting at (x, y), using at most `max_width` cells.
///
/// Zero-width characters are attached to the preceding cell as combining
/// characters. Wide characters that would not fit are not printed.
/// Returns the number of cells used.
pub fn print(surface: &mut dyn Surface, x: i32, y: i32, max_width: i32, text: &str, style: Style) -> i32 {
    let mut used = 0;
    let mut pending: Option<(i32, char, Vec<char>)> = None;

    for ch in text.chars() {
        let width = ch.width().unwrap_or(0) as i32;
        if width == 0 {
            if let Some((_, _, combining)) = pending.as_mut() {
                combining.push(ch);
            }
            continue;
        }
        if used + width > max_width {
            break;
        }
        if let Some((col, base, combining)) = pending.take() {
            surface.set_content(col, y, base, &combining, style);
        }
        pending = Some((x + used, ch, Vec::new()));
        used += width;
    }

    if let Some((col, base, combining)) = pending {
        surface.set_content(col, y, base, &combining, style);
    }

    used
}

/// Display width of `text` in cells.
pub fn text_width(text: &str) -> i32 {
    text.chars().map(|c| c.width().unwrap_or(0) as i32).sum()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuffer;

    #[test]
    fn test_clipped_surface_drops_outside_writes() {
        let mut buffer = FrameBuffer::new(10, 10);
        {
            let mut clipped = ClippedSurface::new(&mut buffer, Rect::new(2, 2, 3, 3));
            fill(&mut clipped, Rect::new(0, 0, 10, 10), '#', Style::default());
            assert_eq!(clipped.size(), (10, 10));
        }

        assert_eq!(buffer.char_at(2, 2), Some('#'));
        assert_eq!(buffer.char_at(4, 4), Some('#'));
        assert_eq!(buffer.char_at(1, 2), Some(' '));
        assert_eq!(buffer.char_at(5, 4), Some(' '));
        assert_eq!(buffer.char_at(2, 5), Some(' '));
    }

    #[test]
    fn test_print_truncates_to_width() {
        let mut buffer = FrameBuffer::new(10, 1);
        let used = print(&mut buffer, 1, 0, 3, "Hello", Style::default());
        assert_eq!(used, 3);
        assert_eq!(buffer.row_text(0), " Hel      ");
    }

    #[test]
    fn test_print_wide_and_combining() {
        let mut buffer = FrameBuffer::new(6, 1);
        let used = print(&mut buffer, 0, 0, 6, "中e\u{301}", Style::default());
        assert_eq!(used, 3);
        assert_eq!(buffer.char_at(0, 0), Some('中'));
        let cell = buffer.get(2, 0).unwrap();
        assert_eq!(cell.ch, 'e');
        assert_eq!(cell.combining, vec!['\u{301}']);

        // A wide character that does not fit is dropped entirely.
        let mut narrow = FrameBuffer::new(3, 1);
        assert_eq!(print(&mut narrow, 0, 0, 1, "中", Style::default()), 0);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("hello"), 5);
        assert_eq!(text_width("中文"), 4);
        assert_eq!(text_width("e\u{301}"), 1);
    }
}
