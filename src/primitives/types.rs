//! The primitive contract shared by every drawable element.
//!
//! A UI is a tree of [`Primitive`]s held as [`PrimitiveRef`]s. Containers own
//! their children through [`ItemSlot`]s; there are no parent links. All
//! primitives use interior mutability so a tree can be mutated from one
//! thread while another draws it.

use std::sync::Arc;

use crate::renderer::Surface;
use crate::state::{KeyEvent, MouseAction, MouseEvent};
use crate::types::Rect;

/// Shared handle to any primitive.
pub type PrimitiveRef = Arc<dyn Primitive>;

/// Callback handed to mouse handlers to request a focus change.
pub type SetFocus<'a> = &'a mut dyn FnMut(PrimitiveRef);

// =============================================================================
// MouseOutcome
// =============================================================================

/// Result of offering a mouse event to a primitive.
#[derive(Clone, Default)]
pub struct MouseOutcome {
    /// The event was handled; siblings will not see it.
    pub consumed: bool,
    /// Primitive that receives all further mouse events regardless of
    /// position, until a handler returns a different capture.
    pub capture: Option<PrimitiveRef>,
}

impl MouseOutcome {
    /// Not handled, no capture.
    pub const fn ignored() -> Self {
        Self {
            consumed: false,
            capture: None,
        }
    }

    /// Handled, no capture.
    pub const fn consumed() -> Self {
        Self {
            consumed: true,
            capture: None,
        }
    }

    /// Handled, and `target` captures the mouse.
    pub fn captured(target: PrimitiveRef) -> Self {
        Self {
            consumed: true,
            capture: Some(target),
        }
    }
}

impl std::fmt::Debug for MouseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MouseOutcome")
            .field("consumed", &self.consumed)
            .field("capture", &self.capture.is_some())
            .finish()
    }
}

// =============================================================================
// Primitive
// =============================================================================

/// Capability set of every tree node.
pub trait Primitive: Send + Sync {
    /// Current rectangle in screen cells.
    fn rect(&self) -> Rect;

    /// Set the rectangle. Called by the owning container on every draw.
    fn set_rect(&self, rect: Rect);

    /// Area available to content, inside any border and padding.
    fn inner_rect(&self) -> Rect {
        self.rect()
    }

    fn visible(&self) -> bool {
        true
    }

    fn set_visible(&self, _visible: bool) {}

    /// Draw onto `surface`. Writes outside the surface are dropped by it.
    fn draw(&self, surface: &mut dyn Surface);

    /// Whether this primitive or any descendant holds focus.
    fn has_focus(&self) -> bool;

    /// Offer focus.
    ///
    /// Returns `None` when this primitive accepted focus itself, or the
    /// descendant that should receive it instead.
    fn focus(&self) -> Option<PrimitiveRef>;

    /// Drop focus.
    fn blur(&self);

    /// Whether focus traversal (Tab / BackTab) may stop here.
    fn focusable(&self) -> bool {
        false
    }

    /// Direct children in layout order. Leaves return an empty list.
    fn children(&self) -> Vec<PrimitiveRef> {
        Vec::new()
    }

    /// Bring `child`, one of [`children`](Primitive::children), into view.
    /// Only scrolling containers move anything.
    fn reveal(&self, _child: &PrimitiveRef) {}

    /// Offer a mouse event.
    fn handle_mouse(
        self: Arc<Self>,
        _action: MouseAction,
        _event: &MouseEvent,
        _set_focus: SetFocus<'_>,
    ) -> MouseOutcome {
        MouseOutcome::ignored()
    }

    /// Offer a key event while focused. Returns true if consumed.
    fn handle_key(&self, _event: &KeyEvent) -> bool {
        false
    }
}

/// Identity comparison of two primitives.
#[inline]
pub fn same_primitive(a: &PrimitiveRef, b: &PrimitiveRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

// =============================================================================
// ItemSlot
// =============================================================================

/// One entry of a container's item list.
#[derive(Clone)]
pub enum ItemSlot {
    Occupied(PrimitiveRef),
    /// Reserved space. Consumes its slot but is never drawn, focused or
    /// offered events.
    Spacer,
}

impl ItemSlot {
    pub fn primitive(&self) -> Option<&PrimitiveRef> {
        match self {
            Self::Occupied(primitive) => Some(primitive),
            Self::Spacer => None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer)
    }

    /// Whether this slot holds `primitive`.
    pub fn holds(&self, primitive: &PrimitiveRef) -> bool {
        self.primitive().is_some_and(|held| same_primitive(held, primitive))
    }
}

impl From<Option<PrimitiveRef>> for ItemSlot {
    fn from(item: Option<PrimitiveRef>) -> Self {
        match item {
            Some(primitive) => Self::Occupied(primitive),
            None => Self::Spacer,
        }
    }
}

impl std::fmt::Debug for ItemSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Occupied(primitive) => write!(f, "Occupied({:p})", Arc::as_ptr(primitive)),
            Self::Spacer => f.write_str("Spacer"),
        }
    }
}

// =============================================================================
// Drawing helpers shared by containers
// =============================================================================

/// Draw `children` with focused ones last so they layer above siblings.
pub(crate) fn draw_deferred(surface: &mut dyn Surface, children: &[PrimitiveRef]) {
    let mut focused = Vec::new();
    for child in children {
        if child.has_focus() {
            focused.push(child);
        } else {
            child.draw(surface);
        }
    }
    for child in focused {
        child.draw(surface);
    }
}

/// Offer a mouse event to `children` in order; the first consumer wins.
pub(crate) fn route_mouse(
    children: Vec<PrimitiveRef>,
    action: MouseAction,
    event: &MouseEvent,
    set_focus: SetFocus<'_>,
) -> MouseOutcome {
    for child in children {
        let outcome = child.handle_mouse(action, event, &mut *set_focus);
        if outcome.consumed {
            return outcome;
        }
    }
    MouseOutcome::ignored()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::BoxPrimitive;

    #[test]
    fn test_same_primitive_is_identity() {
        let a: PrimitiveRef = Arc::new(BoxPrimitive::new());
        let b: PrimitiveRef = Arc::new(BoxPrimitive::new());
        let a2 = Arc::clone(&a);

        assert!(same_primitive(&a, &a2));
        assert!(!same_primitive(&a, &b));
    }

    #[test]
    fn test_item_slot_from_option() {
        let a: PrimitiveRef = Arc::new(BoxPrimitive::new());

        let slot = ItemSlot::from(Some(Arc::clone(&a)));
        assert!(slot.holds(&a));
        assert!(!slot.is_spacer());

        let spacer = ItemSlot::from(None);
        assert!(spacer.is_spacer());
        assert!(spacer.primitive().is_none());
        assert!(!spacer.holds(&a));
    }

    #[test]
    fn test_mouse_outcome_constructors() {
        assert!(!MouseOutcome::ignored().consumed);
        assert!(MouseOutcome::consumed().consumed);

        let target: PrimitiveRef = Arc::new(BoxPrimitive::new());
        let outcome = MouseOutcome::captured(Arc::clone(&target));
        assert!(outcome.consumed);
        assert!(same_primitive(outcome.capture.as_ref().unwrap(), &target));
    }
}
