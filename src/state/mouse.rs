//! Mouse Module - discrete mouse actions and capture-aware dispatch.
//!
//! Terminals report raw button transitions. [`MouseTranslator`] turns them
//! into the discrete actions primitives react to, synthesising clicks and
//! double clicks. [`MouseDispatcher`] delivers each action to the primitive
//! tree and tracks mouse capture.
//!
//! # Example
//!
//! ```ignore
//! let mut translator = MouseTranslator::new();
//! let mut dispatcher = MouseDispatcher::new();
//!
//! if let Event::Mouse(raw) = crossterm::event::read()? {
//!     for (action, event) in translator.translate(raw) {
//!         dispatcher.dispatch_with_focus(&root, action, event, &mut focus);
//!     }
//! }
//! ```

use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind};

use super::focus::FocusManager;
use super::keyboard::Modifiers;
use crate::primitives::{MouseOutcome, PrimitiveRef};

/// Maximum delay between two clicks of a double click.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

// =============================================================================
// TYPES
// =============================================================================

/// Discrete mouse action offered to primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Pointer moved (with or without a button held).
    Move,
    LeftDown,
    LeftUp,
    LeftClick,
    LeftDoubleClick,
    MiddleDown,
    MiddleUp,
    MiddleClick,
    MiddleDoubleClick,
    RightDown,
    RightUp,
    RightClick,
    RightDoubleClick,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

impl MouseAction {
    /// Whether this is a wheel action.
    pub const fn is_scroll(&self) -> bool {
        matches!(
            self,
            Self::ScrollUp | Self::ScrollDown | Self::ScrollLeft | Self::ScrollRight
        )
    }
}

/// Position and modifiers of a mouse action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseEvent {
    /// Column (0-indexed)
    pub x: i32,
    /// Row (0-indexed)
    pub y: i32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            modifiers: Modifiers {
                ctrl: false,
                alt: false,
                shift: false,
                meta: false,
            },
        }
    }
}

// =============================================================================
// TRANSLATOR
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Button {
    Left,
    Middle,
    Right,
}

impl From<MouseButton> for Button {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::Left,
            MouseButton::Middle => Self::Middle,
            MouseButton::Right => Self::Right,
        }
    }
}

impl Button {
    const fn index(self) -> usize {
        self as usize
    }

    const fn down(self) -> MouseAction {
        match self {
            Self::Left => MouseAction::LeftDown,
            Self::Middle => MouseAction::MiddleDown,
            Self::Right => MouseAction::RightDown,
        }
    }

    const fn up(self) -> MouseAction {
        match self {
            Self::Left => MouseAction::LeftUp,
            Self::Middle => MouseAction::MiddleUp,
            Self::Right => MouseAction::RightUp,
        }
    }

    const fn click(self) -> MouseAction {
        match self {
            Self::Left => MouseAction::LeftClick,
            Self::Middle => MouseAction::MiddleClick,
            Self::Right => MouseAction::RightClick,
        }
    }

    const fn double_click(self) -> MouseAction {
        match self {
            Self::Left => MouseAction::LeftDoubleClick,
            Self::Middle => MouseAction::MiddleDoubleClick,
            Self::Right => MouseAction::RightDoubleClick,
        }
    }
}

/// Converts crossterm mouse reports into [`MouseAction`] sequences.
///
/// A release at the press position adds a click; a second click of the same
/// button at the same position within [`DOUBLE_CLICK_INTERVAL`] becomes a
/// double click instead.
#[derive(Debug)]
pub struct MouseTranslator {
    pressed: [Option<(i32, i32)>; 3],
    last_click: Option<(Button, i32, i32, Instant)>,
    double_click_interval: Duration,
}

impl Default for MouseTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseTranslator {
    pub fn new() -> Self {
        Self {
            pressed: [None; 3],
            last_click: None,
            double_click_interval: DOUBLE_CLICK_INTERVAL,
        }
    }

    pub fn with_double_click_interval(mut self, interval: Duration) -> Self {
        self.double_click_interval = interval;
        self
    }

    /// Translate one report, timestamped now.
    pub fn translate(&mut self, raw: CrosstermMouseEvent) -> Vec<(MouseAction, MouseEvent)> {
        self.translate_at(raw, Instant::now())
    }

    /// Translate one report received at `now`.
    pub fn translate_at(&mut self, raw: CrosstermMouseEvent, now: Instant) -> Vec<(MouseAction, MouseEvent)> {
        let event = MouseEvent {
            x: i32::from(raw.column),
            y: i32::from(raw.row),
            modifiers: raw.modifiers.into(),
        };

        let actions = match raw.kind {
            MouseEventKind::Down(button) => {
                let button = Button::from(button);
                self.pressed[button.index()] = Some((event.x, event.y));
                vec![button.down()]
            }
            MouseEventKind::Up(button) => {
                let button = Button::from(button);
                let mut actions = vec![button.up()];
                if self.pressed[button.index()].take() == Some((event.x, event.y)) {
                    actions.push(self.click(button, event.x, event.y, now));
                }
                actions
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => vec![MouseAction::Move],
            MouseEventKind::ScrollUp => vec![MouseAction::ScrollUp],
            MouseEventKind::ScrollDown => vec![MouseAction::ScrollDown],
            MouseEventKind::ScrollLeft => vec![MouseAction::ScrollLeft],
            MouseEventKind::ScrollRight => vec![MouseAction::ScrollRight],
        };

        actions.into_iter().map(|action| (action, event)).collect()
    }

    fn click(&mut self, button: Button, x: i32, y: i32, now: Instant) -> MouseAction {
        let is_double = matches!(
            self.last_click,
            Some((last, lx, ly, at))
                if last == button && (lx, ly) == (x, y)
                    && now.saturating_duration_since(at) <= self.double_click_interval
        );

        if is_double {
            self.last_click = None;
            button.double_click()
        } else {
            self.last_click = Some((button, x, y, now));
            button.click()
        }
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

/// Delivers mouse actions to a primitive tree, honoring capture.
///
/// While a primitive holds the capture it receives every action regardless
/// of position; otherwise the root does. The capture returned by the handler
/// replaces the previous one, so a handler releases it by returning none.
#[derive(Default)]
pub struct MouseDispatcher {
    capture: Option<PrimitiveRef>,
}

impl MouseDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primitive currently holding the capture.
    pub fn captured(&self) -> Option<&PrimitiveRef> {
        self.capture.as_ref()
    }

    /// Drop any capture.
    pub fn release(&mut self) {
        self.capture = None;
    }

    /// Deliver one action. Returns true if it was consumed.
    pub fn dispatch(
        &mut self,
        root: &PrimitiveRef,
        action: MouseAction,
        event: MouseEvent,
        set_focus: &mut dyn FnMut(PrimitiveRef),
    ) -> bool {
        let captured = self.capture.is_some();
        let target = self.capture.clone().unwrap_or_else(|| root.clone());

        let MouseOutcome { consumed, capture } = target.handle_mouse(action, &event, set_focus);
        if captured != capture.is_some() {
            tracing::debug!(?action, captured = capture.is_some(), "mouse capture changed");
        }
        tracing::trace!(?action, x = event.x, y = event.y, consumed, "mouse dispatched");

        self.capture = capture;
        consumed
    }

    /// Deliver one action, applying any focus request through `focus`.
    pub fn dispatch_with_focus(
        &mut self,
        root: &PrimitiveRef,
        action: MouseAction,
        event: MouseEvent,
        focus: &mut FocusManager,
    ) -> bool {
        let mut requested = None;
        let consumed = self.dispatch(root, action, event, &mut |p| requested = Some(p));
        if let Some(target) = requested {
            focus.set_focus(target);
        }
        consumed
    }
}

// =============================================================================
// TESTS
// =============================================================================
