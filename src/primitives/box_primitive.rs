//! Box Primitive - the minimal concrete primitive.
//!
//! A rectangle with an optional background, border and title. Every
//! container embeds one for its own geometry, decoration and nominal focus.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spark_widgets::primitives::{BoxPrimitive, Primitive};
//! use spark_widgets::renderer::FrameBuffer;
//! use spark_widgets::types::{BorderStyle, Rect, TitleAlign};
//!
//! let b = Arc::new(BoxPrimitive::new());
//! b.set_border(BorderStyle::Rounded);
//! b.set_title("Hello");
//! b.set_title_align(TitleAlign::Left);
//! b.set_rect(Rect::new(0, 0, 12, 3));
//!
//! let mut frame = FrameBuffer::new(12, 3);
//! b.draw(&mut frame);
//! assert_eq!(frame.row_text(0), "╭Hello─────╮");
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use super::types::{MouseOutcome, Primitive, PrimitiveRef, SetFocus};
use crate::renderer::{fill, print, text_width, Surface};
use crate::state::{KeyEvent, MouseAction, MouseEvent};
use crate::theme;
use crate::types::{Attr, BorderStyle, Rect, Rgba, Style, TitleAlign};

/// Rewrites or swallows a key before the primitive sees it (`None` swallows).
pub type InputCapture = Arc<dyn Fn(&KeyEvent) -> Option<KeyEvent> + Send + Sync>;

/// Rewrites or swallows a mouse event before the primitive sees it (`None` swallows).
pub type MouseCapture =
    Arc<dyn Fn(MouseAction, MouseEvent) -> Option<(MouseAction, MouseEvent)> + Send + Sync>;

/// Inner spacing between the border and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

struct BoxState {
    rect: Rect,
    visible: bool,
    has_focus: bool,

    border: BorderStyle,
    border_color: Rgba,
    border_focus_color: Rgba,
    border_attrs: Attr,
    /// Switch to double lines while focused.
    show_focus: bool,

    title: String,
    title_color: Rgba,
    title_align: TitleAlign,

    padding: Padding,
    background: Rgba,
    transparent: bool,

    input_capture: Option<InputCapture>,
    mouse_capture: Option<MouseCapture>,
}

/// A plain decorated rectangle.
pub struct BoxPrimitive {
    state: RwLock<BoxState>,
}

impl Default for BoxPrimitive {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxPrimitive {
    /// Create a box without border, using the active palette.
    pub fn new() -> Self {
        let styles = theme::styles();
        Self {
            state: RwLock::new(BoxState {
                rect: Rect::new(0, 0, 15, 10),
                visible: true,
                has_focus: false,
                border: BorderStyle::None,
                border_color: styles.border_color,
                border_focus_color: styles.border_focus_color,
                border_attrs: Attr::NONE,
                show_focus: true,
                title: String::new(),
                title_color: styles.title_color,
                title_align: TitleAlign::Center,
                padding: Padding::default(),
                background: styles.primitive_background,
                transparent: false,
                input_capture: None,
                mouse_capture: None,
            }),
        }
    }

    // =========================================================================
    // Decoration
    // =========================================================================

    /// Set the border style. `BorderStyle::None` removes the border.
    pub fn set_border(&self, border: BorderStyle) {
        self.state.write().border = border;
    }

    pub fn border(&self) -> BorderStyle {
        self.state.read().border
    }

    pub fn set_border_color(&self, color: Rgba) {
        self.state.write().border_color = color;
    }

    pub fn set_border_focus_color(&self, color: Rgba) {
        self.state.write().border_focus_color = color;
    }

    pub fn set_border_attributes(&self, attrs: Attr) {
        self.state.write().border_attrs = attrs;
    }

    /// Whether the border switches to double lines while focused.
    pub fn set_show_focus(&self, show: bool) {
        self.state.write().show_focus = show;
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.state.write().title = title.into();
    }

    pub fn title(&self) -> String {
        self.state.read().title.clone()
    }

    pub fn set_title_color(&self, color: Rgba) {
        self.state.write().title_color = color;
    }

    pub fn set_title_align(&self, align: TitleAlign) {
        self.state.write().title_align = align;
    }

    pub fn set_padding(&self, top: i32, bottom: i32, left: i32, right: i32) {
        self.state.write().padding = Padding {
            top,
            bottom,
            left,
            right,
        };
    }

    pub fn padding(&self) -> Padding {
        self.state.read().padding
    }

    pub fn set_background_color(&self, color: Rgba) {
        self.state.write().background = color;
    }

    pub fn background_color(&self) -> Rgba {
        self.state.read().background
    }

    /// A transparent box does not fill its background.
    pub fn set_background_transparent(&self, transparent: bool) {
        self.state.write().transparent = transparent;
    }

    pub fn is_background_transparent(&self) -> bool {
        self.state.read().transparent
    }

    // =========================================================================
    // Event hooks
    // =========================================================================

    pub fn set_input_capture<F>(&self, capture: F)
    where
        F: Fn(&KeyEvent) -> Option<KeyEvent> + Send + Sync + 'static,
    {
        self.state.write().input_capture = Some(Arc::new(capture));
    }

    pub fn set_mouse_capture<F>(&self, capture: F)
    where
        F: Fn(MouseAction, MouseEvent) -> Option<(MouseAction, MouseEvent)> + Send + Sync + 'static,
    {
        self.state.write().mouse_capture = Some(Arc::new(capture));
    }

    /// Run the input capture hook. `None` means the key was swallowed.
    pub fn capture_key(&self, event: &KeyEvent) -> Option<KeyEvent> {
        let capture = self.state.read().input_capture.clone();
        match capture {
            Some(capture) => capture(event),
            None => Some(*event),
        }
    }

    /// Run the mouse capture hook. `None` means the event was swallowed.
    pub fn capture_mouse(&self, action: MouseAction, event: &MouseEvent) -> Option<(MouseAction, MouseEvent)> {
        let capture = self.state.read().mouse_capture.clone();
        match capture {
            Some(capture) => capture(action, *event),
            None => Some((action, *event)),
        }
    }

    /// Whether the box itself (not a descendant) holds focus.
    pub fn holds_focus(&self) -> bool {
        self.state.read().has_focus
    }

    pub(crate) fn set_holds_focus(&self, focused: bool) {
        self.state.write().has_focus = focused;
    }
}

// =============================================================================
// Drawing
// =============================================================================

fn draw_border(surface: &mut dyn Surface, rect: Rect, border: BorderStyle, style: Style) {
    let (h, v, tl, tr, br, bl) = border.chars();
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);
    let (width, height) = surface.size();

    for x in (rect.x + 1).max(0)..right.min(width) {
        surface.set_content(x, rect.y, h, &[], style);
        surface.set_content(x, bottom, h, &[], style);
    }
    for y in (rect.y + 1).max(0)..bottom.min(height) {
        surface.set_content(rect.x, y, v, &[], style);
        surface.set_content(right, y, v, &[], style);
    }
    surface.set_content(rect.x, rect.y, tl, &[], style);
    surface.set_content(right, rect.y, tr, &[], style);
    surface.set_content(right, bottom, br, &[], style);
    surface.set_content(rect.x, bottom, bl, &[], style);
}

fn draw_title(surface: &mut dyn Surface, rect: Rect, title: &str, align: TitleAlign, style: Style) {
    let available = rect.width - 2;
    if available <= 0 {
        return;
    }
    let width = text_width(title).min(available);
    let x = match align {
        TitleAlign::Left => rect.x + 1,
        TitleAlign::Center => rect.x + 1 + (available - width) / 2,
        TitleAlign::Right => rect.x + 1 + available - width,
    };
    print(surface, x, rect.y, available, title, style);
}

impl Primitive for BoxPrimitive {
    fn rect(&self) -> Rect {
        self.state.read().rect
    }

    fn set_rect(&self, rect: Rect) {
        self.state.write().rect = Rect::new(rect.x, rect.y, rect.width, rect.height);
    }

    fn inner_rect(&self) -> Rect {
        let state = self.state.read();
        let rect = if state.border == BorderStyle::None {
            state.rect
        } else {
            state.rect.inset(1, 1, 1, 1)
        };
        let p = state.padding;
        rect.inset(p.top, p.bottom, p.left, p.right)
    }

    fn visible(&self) -> bool {
        self.state.read().visible
    }

    fn set_visible(&self, visible: bool) {
        self.state.write().visible = visible;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let state = self.state.read();
        if !state.visible || state.rect.is_empty() {
            return;
        }
        let rect = state.rect;
        let background = if state.transparent {
            Rgba::TERMINAL_DEFAULT
        } else {
            state.background
        };

        if !state.transparent {
            fill(surface, rect, ' ', Style::default().bg(background));
        }

        if state.border == BorderStyle::None || rect.width < 2 || rect.height < 2 {
            return;
        }

        let focused = state.has_focus && state.show_focus;
        let (border, color) = if focused {
            (BorderStyle::Double, state.border_focus_color)
        } else {
            (state.border, state.border_color)
        };
        let style = Style::default().fg(color).bg(background).attrs(state.border_attrs);
        draw_border(surface, rect, border, style);

        if !state.title.is_empty() {
            let style = Style::default().fg(state.title_color).bg(background);
            draw_title(surface, rect, &state.title, state.title_align, style);
        }
    }

    fn has_focus(&self) -> bool {
        self.holds_focus()
    }

    fn focus(&self) -> Option<PrimitiveRef> {
        self.set_holds_focus(true);
        None
    }

    fn blur(&self) {
        self.set_holds_focus(false);
    }

    fn focusable(&self) -> bool {
        true
    }

    fn handle_mouse(self: Arc<Self>, action: MouseAction, event: &MouseEvent, set_focus: SetFocus<'_>) -> MouseOutcome {
        let Some((action, event)) = self.capture_mouse(action, event) else {
            return MouseOutcome::consumed();
        };
        if action == MouseAction::LeftClick && self.rect().contains(event.x, event.y) {
            let this: PrimitiveRef = self;
            set_focus(this);
            return MouseOutcome::consumed();
        }
        MouseOutcome::ignored()
    }

    fn handle_key(&self, event: &KeyEvent) -> bool {
        self.capture_key(event).is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::same_primitive;
    use crate::renderer::FrameBuffer;
    use crate::state::{KeyCode, Modifiers};

    fn bordered(rect: Rect) -> Arc<BoxPrimitive> {
        let b = Arc::new(BoxPrimitive::new());
        b.set_border(BorderStyle::Single);
        b.set_rect(rect);
        b
    }

    #[test]
    fn test_inner_rect_border_and_padding() {
        let b = bordered(Rect::new(2, 3, 10, 6));
        assert_eq!(b.inner_rect(), Rect::new(3, 4, 8, 4));

        b.set_padding(1, 0, 2, 1);
        assert_eq!(b.inner_rect(), Rect::new(5, 5, 5, 3));

        b.set_border(BorderStyle::None);
        assert_eq!(b.inner_rect(), Rect::new(4, 4, 7, 5));
    }

    #[test]
    fn test_set_rect_clamps_negative_dims() {
        let b = BoxPrimitive::new();
        b.set_rect(Rect { x: 1, y: 1, width: -3, height: 4 });
        assert_eq!(b.rect(), Rect::new(1, 1, 0, 4));
    }

    #[test]
    fn test_draw_border() {
        let b = bordered(Rect::new(0, 0, 5, 3));
        let mut frame = FrameBuffer::new(5, 3);
        b.draw(&mut frame);

        assert_eq!(frame.row_text(0), "┌───┐");
        assert_eq!(frame.row_text(1), "│   │");
        assert_eq!(frame.row_text(2), "└───┘");
    }

    #[test]
    fn test_focused_border_is_double() {
        let b = bordered(Rect::new(0, 0, 4, 3));
        b.focus();
        let mut frame = FrameBuffer::new(4, 3);
        b.draw(&mut frame);
        assert_eq!(frame.row_text(0), "╔══╗");

        b.set_show_focus(false);
        let mut frame = FrameBuffer::new(4, 3);
        b.draw(&mut frame);
        assert_eq!(frame.row_text(0), "┌──┐");
    }

    #[test]
    fn test_title_alignment_and_truncation() {
        let b = bordered(Rect::new(0, 0, 10, 3));
        b.set_title("Hi");

        let mut frame = FrameBuffer::new(10, 3);
        b.draw(&mut frame);
        assert_eq!(frame.row_text(0), "┌───Hi───┐");

        b.set_title_align(TitleAlign::Right);
        let mut frame = FrameBuffer::new(10, 3);
        b.draw(&mut frame);
        assert_eq!(frame.row_text(0), "┌──────Hi┐");

        b.set_title("A very long title");
        b.set_title_align(TitleAlign::Left);
        let mut frame = FrameBuffer::new(10, 3);
        b.draw(&mut frame);
        assert_eq!(frame.row_text(0), "┌A very l┐");
    }

    #[test]
    fn test_invisible_box_draws_nothing() {
        let b = bordered(Rect::new(0, 0, 5, 3));
        b.set_visible(false);
        let mut frame = FrameBuffer::new(5, 3);
        b.draw(&mut frame);
        assert_eq!(frame.row_text(0), "     ");
    }

    #[test]
    fn test_background_fill() {
        let b = BoxPrimitive::new();
        b.set_rect(Rect::new(1, 0, 2, 1));
        b.set_background_color(Rgba::RED);
        let mut frame = FrameBuffer::new(4, 1);
        b.draw(&mut frame);

        assert_eq!(frame.get(1, 0).unwrap().style.bg, Rgba::RED);
        assert_eq!(frame.get(2, 0).unwrap().style.bg, Rgba::RED);
        assert_eq!(frame.get(3, 0).unwrap().style.bg, Rgba::TERMINAL_DEFAULT);

        let mut frame = FrameBuffer::new(4, 1);
        b.set_background_transparent(true);
        b.draw(&mut frame);
        assert_eq!(frame.get(1, 0).unwrap().style.bg, Rgba::TERMINAL_DEFAULT);
    }

    #[test]
    fn test_click_focuses_box() {
        let b = bordered(Rect::new(0, 0, 5, 3));
        let mut requested: Option<PrimitiveRef> = None;

        let outcome = Arc::clone(&b).handle_mouse(
            MouseAction::LeftClick,
            &MouseEvent::new(2, 1),
            &mut |p| requested = Some(p),
        );
        assert!(outcome.consumed);
        let target: PrimitiveRef = b.clone();
        assert!(same_primitive(requested.as_ref().unwrap(), &target));

        let outcome = Arc::clone(&b).handle_mouse(
            MouseAction::LeftClick,
            &MouseEvent::new(9, 9),
            &mut |_| panic!("outside click must not focus"),
        );
        assert!(!outcome.consumed);
    }

    #[test]
    fn test_mouse_capture_can_swallow() {
        let b = bordered(Rect::new(0, 0, 5, 3));
        b.set_mouse_capture(|action, event| (action != MouseAction::LeftClick).then_some((action, event)));

        let outcome = Arc::clone(&b).handle_mouse(
            MouseAction::LeftClick,
            &MouseEvent::new(1, 1),
            &mut |_| panic!("swallowed click must not focus"),
        );
        assert!(outcome.consumed);
    }

    #[test]
    fn test_input_capture() {
        let b = BoxPrimitive::new();
        assert!(!b.handle_key(&KeyEvent::new(KeyCode::Enter)));

        b.set_input_capture(|event| match event.code {
            KeyCode::Char('x') => None,
            KeyCode::Char('a') => Some(KeyEvent::with_modifiers(KeyCode::Char('b'), Modifiers::none())),
            _ => Some(*event),
        });
        assert!(b.handle_key(&KeyEvent::new(KeyCode::Char('x'))));
        assert_eq!(
            b.capture_key(&KeyEvent::new(KeyCode::Char('a'))).map(|e| e.code),
            Some(KeyCode::Char('b'))
        );
    }

    #[test]
    fn test_focus_and_blur() {
        let b = BoxPrimitive::new();
        assert!(!b.has_focus());
        assert!(b.focus().is_none());
        assert!(b.has_focus());
        b.blur();
        assert!(!b.has_focus());
    }
}
