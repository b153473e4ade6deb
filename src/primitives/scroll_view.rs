//! ScrollView - a container whose content may exceed its viewport.
//!
//! Items are stacked along the scroll axis with fixed sizes only. The view
//! keeps a scroll offset, draws the items intersecting the viewport (items
//! straddling an edge are clipped to it) and overlays a proportional scroll
//! bar.
//!
//! ```text
//!   content                     viewport
//!   ┌──────────┐ 0
//!   │ item 0   │
//!   ├──────────┤ ← offset ──▶ ┌──────────┐░
//!   │ item 1   │              │ item 1   │▓
//!   ├──────────┤              ├──────────┤░
//!   │ item 2   │              │ item 2   │░
//!   ├──────────┤              └──────────┘░
//!   │ item 3   │
//!   └──────────┘ content extent
//! ```
//!
//! The offset is clamped to `[0, max(0, content - viewport)]` on every draw.

use std::sync::Arc;

use parking_lot::RwLock;

use super::box_primitive::BoxPrimitive;
use super::scrollbar::{render_scroll_bar, ScrollBar};
use super::types::{
    draw_deferred, route_mouse, same_primitive, ItemSlot, MouseOutcome, Primitive, PrimitiveRef, SetFocus,
};
use crate::renderer::{fill, ClippedSurface, Surface};
use crate::state::{KeyCode, KeyEvent, MouseAction, MouseEvent};
use crate::theme;
use crate::types::{FlexDirection, Rect, Rgba, ScrollBarVisibility, Style};

#[derive(Debug, Clone)]
struct ScrollItem {
    slot: ItemSlot,
    fixed: i32,
    focus: bool,
}

struct ScrollState {
    items: Vec<ScrollItem>,
    direction: FlexDirection,
    full_screen: bool,
    scroll_bar_visibility: ScrollBarVisibility,
    scroll_bar_color: Rgba,
    offset: i32,
    /// (content, viewport) extents of the last draw.
    last_extents: Option<(i32, i32)>,
    /// Items intersecting the viewport as of the last draw.
    on_screen: Vec<PrimitiveRef>,
}

impl ScrollState {
    fn content_extent(&self) -> i32 {
        self.items
            .iter()
            .fold(0i32, |total, item| total.saturating_add(item.fixed.max(0)))
    }

    fn max_offset(&self) -> Option<i32> {
        self.last_extents
            .map(|(content, viewport)| (content - viewport).max(0))
    }

    /// Offset of the content end; clamped on the next draw if no frame was drawn yet.
    fn end_offset(&self) -> i32 {
        self.max_offset().unwrap_or_else(|| self.content_extent())
    }

    /// Move the offset by `delta`, clamping against the last drawn frame.
    fn scroll_by(&mut self, delta: i32) {
        let mut offset = self.offset.saturating_add(delta).max(0);
        if let Some(max) = self.max_offset() {
            offset = offset.min(max);
        }
        self.offset = offset;
    }
}

/// Everything the unlocked part of a draw needs.
struct Frame {
    viewport: Rect,
    visible: Vec<PrimitiveRef>,
    leftover: Rect,
    bar: Option<ScrollBar>,
}

/// Scrolling container of fixed-size items.
pub struct ScrollView {
    base: BoxPrimitive,
    state: RwLock<ScrollState>,
}

impl Default for ScrollView {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollView {
    /// Vertical scroll view with an automatic scroll bar and a transparent
    /// background.
    pub fn new() -> Self {
        let base = BoxPrimitive::new();
        base.set_background_transparent(true);
        Self {
            base,
            state: RwLock::new(ScrollState {
                items: Vec::new(),
                direction: FlexDirection::Column,
                full_screen: false,
                scroll_bar_visibility: ScrollBarVisibility::Auto,
                scroll_bar_color: theme::styles().scroll_bar_color,
                offset: 0,
                last_extents: None,
                on_screen: Vec::new(),
            }),
        }
    }

    /// The embedded box: border, title, background and event hooks.
    pub fn base(&self) -> &BoxPrimitive {
        &self.base
    }

    /// `Column` scrolls vertically, `Row` horizontally.
    pub fn set_direction(&self, direction: FlexDirection) {
        self.state.write().direction = direction;
    }

    pub fn direction(&self) -> FlexDirection {
        self.state.read().direction
    }

    /// Use the whole surface instead of the assigned rectangle.
    pub fn set_full_screen(&self, full_screen: bool) {
        self.state.write().full_screen = full_screen;
    }

    pub fn set_scroll_bar_visibility(&self, visibility: ScrollBarVisibility) {
        self.state.write().scroll_bar_visibility = visibility;
    }

    pub fn set_scroll_bar_color(&self, color: Rgba) {
        self.state.write().scroll_bar_color = color;
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Append an item `fixed` cells long. `None` reserves empty space.
    pub fn add_item(&self, item: Option<PrimitiveRef>, fixed: i32, focus: bool) {
        let mut state = self.state.write();
        let index = state.items.len();
        Self::insert(&mut state, index, item, fixed, focus);
    }

    /// Insert an item at `index`, clamped to the current item count.
    pub fn add_item_at_index(&self, index: usize, item: Option<PrimitiveRef>, fixed: i32, focus: bool) {
        let mut state = self.state.write();
        let index = index.min(state.items.len());
        Self::insert(&mut state, index, item, fixed, focus);
    }

    fn insert(state: &mut ScrollState, index: usize, item: Option<PrimitiveRef>, fixed: i32, focus: bool) {
        if fixed <= 0 {
            tracing::warn!(fixed, "scroll view items need a positive fixed size, item gets zero length");
        }
        state.items.insert(
            index,
            ScrollItem {
                slot: item.into(),
                fixed,
                focus,
            },
        );
        tracing::debug!(index, fixed, count = state.items.len(), "scroll view item added");
    }

    /// Remove every occurrence of `p`, keeping the order of the rest.
    pub fn remove_item(&self, p: &PrimitiveRef) {
        let mut state = self.state.write();
        for index in (0..state.items.len()).rev() {
            if state.items[index].slot.holds(p) {
                state.items.remove(index);
            }
        }
        state.on_screen.retain(|shown| !same_primitive(shown, p));
        tracing::debug!(count = state.items.len(), "scroll view item removed");
    }

    /// Change the size of every occurrence of `p` in place.
    pub fn resize_item(&self, p: &PrimitiveRef, fixed: i32) {
        let mut state = self.state.write();
        for item in state.items.iter_mut().filter(|item| item.slot.holds(p)) {
            item.fixed = fixed;
        }
        tracing::debug!(fixed, "scroll view item resized");
    }

    /// All item slots in order.
    pub fn items(&self) -> Vec<ItemSlot> {
        self.state.read().items.iter().map(|item| item.slot.clone()).collect()
    }

    pub fn item_count(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        state.items.clear();
        state.on_screen.clear();
        state.offset = 0;
        tracing::debug!("scroll view cleared");
    }

    fn occupied(&self) -> Vec<PrimitiveRef> {
        self.state
            .read()
            .items
            .iter()
            .filter_map(|item| item.slot.primitive().cloned())
            .collect()
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Scroll so `offset` cells of content lie before the viewport.
    ///
    /// Takes effect (clamped) on the next draw.
    pub fn scroll_to(&self, offset: i32) {
        self.state.write().offset = offset.max(0);
    }

    /// Current offset. Clamped as of the last draw.
    pub fn scroll_offset(&self) -> i32 {
        self.state.read().offset
    }

    pub fn scroll_to_beginning(&self) {
        self.state.write().offset = 0;
    }

    /// Scroll to the end of the content.
    pub fn scroll_to_end(&self) {
        let mut state = self.state.write();
        state.offset = state.end_offset();
    }

    /// Scroll the least amount that makes the first occurrence of `p` fully
    /// visible. Uses the viewport of the last draw.
    pub fn scroll_to_item(&self, p: &PrimitiveRef) {
        let mut state = self.state.write();
        let mut start: i32 = 0;
        let mut found = None;
        for item in &state.items {
            let size = item.fixed.max(0);
            if item.slot.holds(p) {
                found = Some((start, size));
                break;
            }
            start = start.saturating_add(size);
        }
        let Some((start, size)) = found else {
            return;
        };

        let viewport = state.last_extents.map_or(size, |(_, viewport)| viewport);
        if start < state.offset {
            state.offset = start;
        } else if start.saturating_add(size) > state.offset.saturating_add(viewport) {
            state.offset = start.saturating_add(size) - viewport;
        }
        tracing::debug!(offset = state.offset, "scrolled to item");
    }

    /// Lay out the visible items and decide the scroll bar for one frame.
    fn layout(&self, area: Rect, focused: bool) -> Frame {
        let mut state = self.state.write();
        let direction = state.direction;
        let content = state.content_extent();

        let show_bar = state
            .scroll_bar_visibility
            .shows(content, direction.main_len(&area));
        let viewport = match (show_bar, direction) {
            (false, _) => area,
            (true, FlexDirection::Column) => area.inset(0, 0, 0, 1),
            (true, FlexDirection::Row) => area.inset(0, 1, 0, 0),
        };

        let extent = direction.main_len(&viewport);
        let max_offset = (content - extent).max(0);
        state.offset = state.offset.clamp(0, max_offset);
        state.last_extents = Some((content, extent));
        let offset = state.offset;

        let origin = direction.main_start(&viewport);
        let mut position: i32 = 0;
        let mut visible = Vec::new();
        for item in &state.items {
            let size = item.fixed.max(0);
            let start = position;
            position = position.saturating_add(size);

            if size == 0 || position <= offset || start >= offset.saturating_add(extent) {
                continue;
            }
            if let Some(primitive) = item.slot.primitive() {
                primitive.set_rect(direction.slot(&viewport, origin.saturating_add(start - offset), size));
                visible.push(primitive.clone());
            }
        }
        state.on_screen = visible.clone();

        let filled = (content - offset).clamp(0, extent);
        let leftover = direction.slot(&viewport, origin + filled, extent - filled);

        let bar = show_bar.then(|| {
            let cursor = if content > extent {
                let ratio = offset as f64 / max_offset as f64;
                ((content as f64 * ratio).round() as i32).clamp(0, content)
            } else {
                0
            };
            let (x, y) = match direction {
                FlexDirection::Column => (viewport.right(), viewport.y),
                FlexDirection::Row => (viewport.x, viewport.bottom()),
            };
            ScrollBar {
                visibility: state.scroll_bar_visibility,
                direction,
                x,
                y,
                extent,
                content,
                cursor,
                focused,
                color: state.scroll_bar_color,
            }
        });

        tracing::trace!(content, extent, offset, show_bar, drawn = visible.len(), "scroll view layout");

        Frame {
            viewport,
            visible,
            leftover,
            bar,
        }
    }
}

impl Primitive for ScrollView {
    fn rect(&self) -> Rect {
        self.base.rect()
    }

    fn set_rect(&self, rect: Rect) {
        self.base.set_rect(rect);
    }

    fn inner_rect(&self) -> Rect {
        self.base.inner_rect()
    }

    fn visible(&self) -> bool {
        self.base.visible()
    }

    fn set_visible(&self, visible: bool) {
        self.base.set_visible(visible);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.base.visible() {
            return;
        }
        if self.state.read().full_screen {
            let (width, height) = surface.size();
            self.base.set_rect(Rect::new(0, 0, width, height));
        }

        self.base.draw(surface);
        let frame = self.layout(self.base.inner_rect(), self.base.holds_focus());

        let blank = Style::default().bg(theme::styles().primitive_background);
        fill(surface, frame.leftover, ' ', blank);

        {
            let mut clipped = ClippedSurface::new(&mut *surface, frame.viewport);
            draw_deferred(&mut clipped, &frame.visible);
        }

        if let Some(bar) = frame.bar {
            render_scroll_bar(surface, &bar);
        }
    }

    fn has_focus(&self) -> bool {
        self.base.holds_focus() || self.occupied().iter().any(|child| child.has_focus())
    }

    fn focus(&self) -> Option<PrimitiveRef> {
        let target = self
            .state
            .read()
            .items
            .iter()
            .filter(|item| item.focus)
            .find_map(|item| item.slot.primitive().cloned());

        if target.is_none() {
            self.base.set_holds_focus(true);
        }
        target
    }

    fn blur(&self) {
        self.base.set_holds_focus(false);
    }

    fn children(&self) -> Vec<PrimitiveRef> {
        self.occupied()
    }

    fn reveal(&self, child: &PrimitiveRef) {
        self.scroll_to_item(child);
    }

    fn handle_mouse(self: Arc<Self>, action: MouseAction, event: &MouseEvent, set_focus: SetFocus<'_>) -> MouseOutcome {
        let Some((action, event)) = self.base.capture_mouse(action, event) else {
            return MouseOutcome::consumed();
        };
        if !self.rect().contains(event.x, event.y) {
            return MouseOutcome::ignored();
        }

        match action {
            MouseAction::ScrollUp | MouseAction::ScrollLeft => {
                self.state.write().scroll_by(-1);
                MouseOutcome::consumed()
            }
            MouseAction::ScrollDown | MouseAction::ScrollRight => {
                self.state.write().scroll_by(1);
                MouseOutcome::consumed()
            }
            _ => {
                let on_screen = self.state.read().on_screen.clone();
                route_mouse(on_screen, action, &event, set_focus)
            }
        }
    }

    fn handle_key(&self, event: &KeyEvent) -> bool {
        let Some(event) = self.base.capture_key(event) else {
            return true;
        };

        let mut state = self.state.write();
        let page = state.last_extents.map_or(1, |(_, viewport)| viewport.max(1));
        let (back, forward) = match state.direction {
            FlexDirection::Column => (KeyCode::Up, KeyCode::Down),
            FlexDirection::Row => (KeyCode::Left, KeyCode::Right),
        };

        match event.code {
            code if code == back => state.scroll_by(-1),
            code if code == forward => state.scroll_by(1),
            KeyCode::PageUp => state.scroll_by(-page),
            KeyCode::PageDown => state.scroll_by(page),
            KeyCode::Home => state.offset = 0,
            KeyCode::End => state.offset = state.end_offset(),
            _ => return false,
        }
        true
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuffer;
    use crate::types::BorderStyle;

    fn leaf() -> PrimitiveRef {
        Arc::new(BoxPrimitive::new())
    }

    fn titled(title: &str) -> PrimitiveRef {
        let b = BoxPrimitive::new();
        b.set_border(BorderStyle::Single);
        b.set_title(title);
        Arc::new(b)
    }

    fn view_with(count: usize, size: i32) -> (ScrollView, Vec<PrimitiveRef>) {
        let view = ScrollView::new();
        let items: Vec<PrimitiveRef> = (0..count).map(|_| leaf()).collect();
        for item in &items {
            view.add_item(Some(item.clone()), size, false);
        }
        (view, items)
    }

    fn draw(view: &ScrollView, width: u16, height: u16) -> FrameBuffer {
        view.set_rect(Rect::new(0, 0, width as i32, height as i32));
        let mut frame = FrameBuffer::new(width, height);
        view.draw(&mut frame);
        frame
    }

    #[test]
    fn test_scroll_to_is_clamped_on_draw() {
        let (view, _) = view_with(3, 10);

        view.scroll_to(100);
        draw(&view, 5, 10);
        assert_eq!(view.scroll_offset(), 20);

        view.scroll_to(-5);
        draw(&view, 5, 10);
        assert_eq!(view.scroll_offset(), 0);

        view.scroll_to(7);
        draw(&view, 5, 10);
        assert_eq!(view.scroll_offset(), 7);
    }

    #[test]
    fn test_offset_is_zero_when_content_fits() {
        let (view, _) = view_with(3, 2);
        view.scroll_to(4);
        draw(&view, 5, 10);
        assert_eq!(view.scroll_offset(), 0);
    }

    #[test]
    fn test_items_are_placed_relative_to_offset() {
        let (view, items) = view_with(4, 3);
        view.set_scroll_bar_visibility(ScrollBarVisibility::Never);
        view.scroll_to(4);
        draw(&view, 6, 5);

        // Item 1 spans content rows 3..6, so it starts one row above the view.
        assert_eq!(items[1].rect(), Rect::new(0, -1, 6, 3));
        assert_eq!(items[2].rect(), Rect::new(0, 2, 6, 3));
    }

    #[test]
    fn test_scrolled_items_are_clipped_to_viewport() {
        let view = ScrollView::new();
        for title in ["A", "B", "C"] {
            view.add_item(Some(titled(title)), 3, false);
        }
        view.set_scroll_bar_visibility(ScrollBarVisibility::Never);
        view.set_rect(Rect::new(0, 1, 5, 4));
        view.scroll_to(1);

        let mut frame = FrameBuffer::new(5, 6);
        view.draw(&mut frame);

        // Row 0 is outside the view: the top border of "A" must not leak.
        assert_eq!(frame.row_text(0), "     ");
        assert_eq!(frame.row_text(1), "│   │");
        assert_eq!(frame.row_text(2), "└───┘");
        assert_eq!(frame.row_text(3), "┌─B─┐");
        assert_eq!(frame.row_text(5), "     ");
    }

    #[test]
    fn test_auto_scroll_bar_visibility() {
        let (view, items) = view_with(3, 10);
        let frame = draw(&view, 6, 10);
        assert_eq!(frame.char_at(5, 0), Some('▓'));
        assert_eq!(items[0].rect().width, 5);

        let frame = draw(&view, 6, 30);
        assert_eq!(frame.char_at(5, 0), Some(' '));
        assert_eq!(items[0].rect().width, 6);
    }

    #[test]
    fn test_scroll_bar_handle_tracks_offset() {
        let (view, _) = view_with(3, 10);
        view.scroll_to(20);
        let frame = draw(&view, 6, 10);
        assert_eq!(frame.char_at(5, 9), Some('▓'));
        assert_eq!(frame.char_at(5, 0), Some('░'));
    }

    #[test]
    fn test_never_still_scrolls() {
        let (view, items) = view_with(3, 10);
        view.set_scroll_bar_visibility(ScrollBarVisibility::Never);
        view.scroll_to(10);
        let frame = draw(&view, 6, 10);

        assert_eq!(items[1].rect(), Rect::new(0, 0, 6, 10));
        assert_eq!(frame.char_at(5, 0), Some(' '));
    }

    #[test]
    fn test_leftover_space_is_filled() {
        let (view, items) = view_with(1, 2);
        let frame = draw(&view, 4, 5);
        assert_eq!(items[0].rect(), Rect::new(0, 0, 4, 2));
        assert_eq!(frame.row_text(4), "    ");
    }

    #[test]
    fn test_horizontal_scrolling() {
        let (view, items) = view_with(3, 4);
        view.set_direction(FlexDirection::Row);
        view.scroll_to(2);
        let frame = draw(&view, 6, 3);

        assert_eq!(items[0].rect(), Rect::new(-2, 0, 4, 2));
        assert_eq!(items[1].rect(), Rect::new(2, 0, 4, 2));
        assert!(frame.row_text(2).contains('▓'));
    }

    #[test]
    fn test_wheel_clamps_against_last_frame() {
        let (view, _) = view_with(3, 10);
        draw(&view, 6, 10);
        let view = Arc::new(view);

        for expected in 1..=20 {
            let outcome = Arc::clone(&view).handle_mouse(MouseAction::ScrollDown, &MouseEvent::new(1, 1), &mut |_| {});
            assert!(outcome.consumed);
            assert_eq!(view.scroll_offset(), expected);
        }
        Arc::clone(&view).handle_mouse(MouseAction::ScrollDown, &MouseEvent::new(1, 1), &mut |_| {});
        assert_eq!(view.scroll_offset(), 20);

        Arc::clone(&view).handle_mouse(MouseAction::ScrollUp, &MouseEvent::new(1, 1), &mut |_| {});
        assert_eq!(view.scroll_offset(), 19);
    }

    #[test]
    fn test_wheel_outside_is_ignored() {
        let (view, _) = view_with(3, 10);
        draw(&view, 6, 10);
        let view = Arc::new(view);
        let outcome = Arc::clone(&view).handle_mouse(MouseAction::ScrollDown, &MouseEvent::new(40, 1), &mut |_| {});
        assert!(!outcome.consumed);
        assert_eq!(view.scroll_offset(), 0);
    }

    #[test]
    fn test_keyboard_scrolling() {
        let (view, _) = view_with(5, 4);
        draw(&view, 6, 8);

        assert!(view.handle_key(&KeyEvent::new(KeyCode::Down)));
        assert_eq!(view.scroll_offset(), 1);
        assert!(view.handle_key(&KeyEvent::new(KeyCode::PageDown)));
        assert_eq!(view.scroll_offset(), 9);
        assert!(view.handle_key(&KeyEvent::new(KeyCode::End)));
        assert_eq!(view.scroll_offset(), 12);
        assert!(view.handle_key(&KeyEvent::new(KeyCode::Home)));
        assert_eq!(view.scroll_offset(), 0);
        assert!(!view.handle_key(&KeyEvent::new(KeyCode::Char('x'))));
    }

    #[test]
    fn test_scroll_to_item() {
        let (view, items) = view_with(6, 3);
        draw(&view, 6, 6);

        view.scroll_to_item(&items[4]);
        assert_eq!(view.scroll_offset(), 9);
        view.scroll_to_item(&items[1]);
        assert_eq!(view.scroll_offset(), 3);
        view.scroll_to_item(&items[2]);
        assert_eq!(view.scroll_offset(), 3);
    }

    #[test]
    fn test_focus_delegation() {
        let (view, items) = view_with(3, 1);
        assert!(view.focus().is_none());
        assert!(view.has_focus());
        view.blur();

        let flagged = leaf();
        view.add_item(Some(flagged.clone()), 1, true);
        let target = view.focus().unwrap();
        assert!(crate::primitives::same_primitive(&target, &flagged));
        assert!(!items[0].has_focus());
    }

    #[test]
    fn test_mutations() {
        let (view, items) = view_with(2, 1);
        view.add_item(Some(items[0].clone()), 1, false);
        view.add_item_at_index(0, None, 2, false);
        assert_eq!(view.item_count(), 4);
        assert!(view.items()[0].is_spacer());

        view.remove_item(&items[0]);
        let remaining = view.items();
        assert_eq!(remaining.len(), 2);
        assert!(remaining[1].holds(&items[1]));

        view.resize_item(&items[1], 5);
        draw(&view, 3, 20);
        assert_eq!(items[1].rect(), Rect::new(0, 2, 3, 5));

        view.clear();
        assert_eq!(view.item_count(), 0);
    }

    #[test]
    fn test_clicks_reach_only_items_on_screen() {
        let (view, items) = view_with(3, 10);
        let view = Arc::new(view);
        draw(&view, 6, 10);
        view.scroll_to(10);
        draw(&view, 6, 10);

        let mut requested = None;
        let outcome = Arc::clone(&view).handle_mouse(MouseAction::LeftClick, &MouseEvent::new(1, 1), &mut |p| {
            requested = Some(p)
        });
        assert!(outcome.consumed);
        assert!(same_primitive(&requested.unwrap(), &items[1]));

        view.remove_item(&items[1]);
        let outcome = Arc::clone(&view).handle_mouse(MouseAction::LeftClick, &MouseEvent::new(1, 1), &mut |_| {
            panic!("removed item must not receive clicks")
        });
        assert!(!outcome.consumed);
    }

    #[test]
    fn test_huge_item_sizes_do_not_overflow() {
        let view = ScrollView::new();
        let (huge, small) = (leaf(), leaf());
        view.add_item(Some(huge.clone()), i32::MAX, false);
        view.add_item(Some(small.clone()), 5, false);

        view.scroll_to_end();
        let frame = draw(&view, 6, 10);
        assert_eq!(view.scroll_offset(), i32::MAX - 10);
        assert_eq!(huge.rect().height, i32::MAX);
        assert_eq!(frame.char_at(5, 9), Some('▓'));

        view.scroll_to_item(&small);
        draw(&view, 6, 10);
        assert_eq!(view.scroll_offset(), i32::MAX - 10);
    }
}
