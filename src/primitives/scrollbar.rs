//! Scroll bar rendering.
//!
//! A one-cell-thick track with a single handle cell. The handle position is
//! proportional to the scroll depth, not to the number of items.

use crate::renderer::Surface;
use crate::types::{FlexDirection, Rgba, ScrollBarVisibility, Style};

const TRACK: char = '░';
const TRACK_FOCUSED: char = '▒';
const HANDLE: char = '▓';
const HANDLE_FOCUSED: char = '█';

/// One frame's scroll bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBar {
    pub visibility: ScrollBarVisibility,
    /// `Column` draws a vertical bar, `Row` a horizontal one.
    pub direction: FlexDirection,
    /// First cell of the track.
    pub x: i32,
    pub y: i32,
    /// Track length in cells.
    pub extent: i32,
    /// Total content extent.
    pub content: i32,
    /// Scroll cursor in `[0, content]`.
    pub cursor: i32,
    pub focused: bool,
    pub color: Rgba,
}

impl ScrollBar {
    /// Track cell that holds the handle, or `None` when nothing is drawn.
    pub fn handle_position(&self) -> Option<i32> {
        if self.extent <= 0 || !self.visibility.shows(self.content, self.extent) {
            return None;
        }
        let cursor = if self.content <= self.extent {
            0
        } else {
            self.cursor.clamp(0, self.content)
        };
        let position = if self.content > 1 {
            (self.extent as i64 - 1) * cursor as i64 / (self.content as i64 - 1)
        } else {
            0
        };
        Some((position as i32).clamp(0, self.extent - 1))
    }
}

/// Draw `bar` onto `surface`.
///
/// Nothing is drawn for `Never`, or for `Auto` when the content fits.
pub fn render_scroll_bar(surface: &mut dyn Surface, bar: &ScrollBar) {
    let Some(handle) = bar.handle_position() else {
        return;
    };

    let (track, thumb) = if bar.focused {
        (TRACK_FOCUSED, HANDLE_FOCUSED)
    } else {
        (TRACK, HANDLE)
    };
    let style = Style::default().fg(bar.color);

    for i in 0..bar.extent {
        let ch = if i == handle { thumb } else { track };
        let (x, y) = match bar.direction {
            FlexDirection::Column => (bar.x, bar.y + i),
            FlexDirection::Row => (bar.x + i, bar.y),
        };
        surface.set_content(x, y, ch, &[], style);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuffer;

    fn bar(visibility: ScrollBarVisibility, extent: i32, content: i32, cursor: i32) -> ScrollBar {
        ScrollBar {
            visibility,
            direction: FlexDirection::Column,
            x: 0,
            y: 0,
            extent,
            content,
            cursor,
            focused: false,
            color: Rgba::WHITE,
        }
    }

    fn column(frame: &FrameBuffer) -> String {
        (0..frame.height()).filter_map(|y| frame.char_at(0, y)).collect()
    }

    #[test]
    fn test_handle_follows_cursor() {
        assert_eq!(bar(ScrollBarVisibility::Auto, 10, 30, 0).handle_position(), Some(0));
        assert_eq!(bar(ScrollBarVisibility::Auto, 10, 30, 30).handle_position(), Some(9));
        assert_eq!(bar(ScrollBarVisibility::Auto, 10, 30, 15).handle_position(), Some(4));
    }

    #[test]
    fn test_visibility_rules() {
        assert_eq!(bar(ScrollBarVisibility::Never, 10, 30, 0).handle_position(), None);
        assert_eq!(bar(ScrollBarVisibility::Auto, 10, 10, 0).handle_position(), None);
        assert_eq!(bar(ScrollBarVisibility::Always, 10, 10, 7).handle_position(), Some(0));
        assert_eq!(bar(ScrollBarVisibility::Always, 0, 10, 0).handle_position(), None);
    }

    #[test]
    fn test_render_vertical() {
        let mut frame = FrameBuffer::new(1, 4);
        render_scroll_bar(&mut frame, &bar(ScrollBarVisibility::Always, 4, 20, 20));
        assert_eq!(column(&frame), "░░░▓");
    }

    #[test]
    fn test_render_focused_horizontal() {
        let mut frame = FrameBuffer::new(5, 1);
        let mut b = bar(ScrollBarVisibility::Always, 5, 5, 0);
        b.direction = FlexDirection::Row;
        b.focused = true;
        render_scroll_bar(&mut frame, &b);
        assert_eq!(frame.row_text(0), "█▒▒▒▒");
    }

    #[test]
    fn test_render_nothing_when_hidden() {
        let mut frame = FrameBuffer::new(1, 3);
        render_scroll_bar(&mut frame, &bar(ScrollBarVisibility::Auto, 3, 2, 0));
        assert_eq!(column(&frame), "   ");
    }
}
