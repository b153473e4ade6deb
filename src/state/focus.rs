//! Focus System - Keyboard navigation and focus state
//!
//! The [`FocusManager`] owns "who has focus" for one primitive tree:
//! - Focus requests follow delegation (`Primitive::focus`) down to the
//!   primitive that actually accepts
//! - Focus cycling (Tab/Shift+Tab) over focusable primitives in tree order
//! - Key routing: the focused primitive first, then its ancestors
//! - Focus history for restoration
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spark_widgets::primitives::{BoxPrimitive, Flex, Primitive, PrimitiveRef};
//! use spark_widgets::state::FocusManager;
//!
//! let a: PrimitiveRef = Arc::new(BoxPrimitive::new());
//! let b: PrimitiveRef = Arc::new(BoxPrimitive::new());
//! let flex = Arc::new(Flex::new());
//! flex.add_item(Some(a.clone()), 0, 1, false);
//! flex.add_item(Some(b.clone()), 0, 1, true);
//! let root: PrimitiveRef = flex;
//!
//! let mut focus = FocusManager::new();
//! focus.set_focus(root.clone());
//! assert!(b.has_focus());
//!
//! focus.focus_next(&root);
//! assert!(a.has_focus());
//! ```

use std::collections::VecDeque;

use super::keyboard::{KeyCode, KeyEvent};
use crate::primitives::{same_primitive, PrimitiveRef};

/// Maximum focus history entries.
const MAX_HISTORY: usize = 16;

/// Upper bound on delegation hops; guards against delegation cycles.
const MAX_DELEGATION_DEPTH: usize = 64;

/// Tracks the focused primitive of one tree.
#[derive(Default)]
pub struct FocusManager {
    focused: Option<PrimitiveRef>,
    history: VecDeque<PrimitiveRef>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The primitive that accepted focus, if any.
    pub fn focused(&self) -> Option<&PrimitiveRef> {
        self.focused.as_ref()
    }

    /// Check if `primitive` is the one holding focus.
    pub fn is_focused(&self, primitive: &PrimitiveRef) -> bool {
        self.focused.as_ref().is_some_and(|f| same_primitive(f, primitive))
    }

    // =========================================================================
    // FOCUS CHANGES
    // =========================================================================

    /// Focus `target`, following delegation until a primitive accepts.
    pub fn set_focus(&mut self, target: PrimitiveRef) {
        if self.is_focused(&target) {
            return;
        }

        if let Some(old) = self.focused.take() {
            old.blur();
            self.push_history(old);
        }

        let accepted = delegate(target);
        tracing::debug!(focusable = accepted.focusable(), "focus changed");
        self.focused = Some(accepted);
    }

    /// Drop focus entirely.
    pub fn blur(&mut self) {
        if let Some(old) = self.focused.take() {
            old.blur();
            self.push_history(old);
            tracing::debug!("focus cleared");
        }
    }

    /// Focus the most recent entry of the history.
    ///
    /// Returns false when the history is empty.
    pub fn restore_previous(&mut self) -> bool {
        let Some(previous) = self.history.pop_back() else {
            return false;
        };
        if let Some(old) = self.focused.take() {
            old.blur();
        }
        let accepted = delegate(previous);
        tracing::debug!("focus restored from history");
        self.focused = Some(accepted);
        true
    }

    fn push_history(&mut self, primitive: PrimitiveRef) {
        self.history.retain(|p| !same_primitive(p, &primitive));
        self.history.push_back(primitive);
        if self.history.len() > MAX_HISTORY {
            self.history.pop_front();
        }
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Move focus to the next focusable primitive under `root`, wrapping.
    ///
    /// Returns false when nothing under `root` is focusable.
    pub fn focus_next(&mut self, root: &PrimitiveRef) -> bool {
        self.cycle(root, 1)
    }

    /// Move focus to the previous focusable primitive under `root`, wrapping.
    pub fn focus_previous(&mut self, root: &PrimitiveRef) -> bool {
        self.cycle(root, -1)
    }

    fn cycle(&mut self, root: &PrimitiveRef, step: isize) -> bool {
        let candidates = focusable_primitives(root);
        if candidates.is_empty() {
            return false;
        }

        let len = candidates.len() as isize;
        let current = self
            .focused
            .as_ref()
            .and_then(|focused| candidates.iter().position(|c| same_primitive(c, focused)));

        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(len),
            None if step > 0 => 0,
            None => len - 1,
        };

        self.set_focus(candidates[next as usize].clone());
        self.reveal_focused(root);
        true
    }

    /// Let every container between `root` and the focused primitive scroll
    /// it into view.
    fn reveal_focused(&self, root: &PrimitiveRef) {
        let Some(focused) = self.focused.as_ref() else {
            return;
        };
        let Some(path) = path_to(root, focused) else {
            return;
        };
        for pair in path.windows(2) {
            pair[0].reveal(&pair[1]);
        }
    }

    // =========================================================================
    // KEY ROUTING
    // =========================================================================

    /// Route one key press.
    ///
    /// Tab / BackTab move focus. Any other key goes to the focused primitive,
    /// then to each of its ancestors under `root` until one consumes it.
    pub fn handle_key(&mut self, root: &PrimitiveRef, event: &KeyEvent) -> bool {
        if !event.is_press() {
            return false;
        }

        match event.code {
            KeyCode::BackTab => return self.focus_previous(root),
            KeyCode::Tab if event.modifiers.shift => return self.focus_previous(root),
            KeyCode::Tab => return self.focus_next(root),
            _ => {}
        }

        let Some(focused) = self.focused.clone() else {
            return root.handle_key(event);
        };

        let chain = path_to(root, &focused).unwrap_or_else(|| vec![focused]);
        let consumed = chain.iter().rev().any(|p| p.handle_key(event));
        tracing::trace!(code = ?event.code, consumed, "key routed");
        consumed
    }
}

// =============================================================================
// TREE WALKS
// =============================================================================

fn delegate(target: PrimitiveRef) -> PrimitiveRef {
    let mut current = target;
    for _ in 0..MAX_DELEGATION_DEPTH {
        match current.focus() {
            None => return current,
            Some(next) if same_primitive(&next, &current) => return current,
            Some(next) => current = next,
        }
    }
    tracing::warn!("focus delegation did not settle");
    current
}

/// Visible focusable primitives under `root`, in tree order.
pub fn focusable_primitives(root: &PrimitiveRef) -> Vec<PrimitiveRef> {
    fn walk(node: &PrimitiveRef, out: &mut Vec<PrimitiveRef>) {
        if !node.visible() {
            return;
        }
        if node.focusable() {
            out.push(node.clone());
        }
        for child in node.children() {
            walk(&child, out);
        }
    }

    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

/// Path from `root` down to `target`, both included.
fn path_to(root: &PrimitiveRef, target: &PrimitiveRef) -> Option<Vec<PrimitiveRef>> {
    if same_primitive(root, target) {
        return Some(vec![root.clone()]);
    }
    root.children().iter().find_map(|child| {
        path_to(child, target).map(|mut path| {
            path.insert(0, root.clone());
            path
        })
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::primitives::{BoxPrimitive, Flex, ScrollView};
    use crate::renderer::FrameBuffer;
    use crate::state::Modifiers;
    use crate::types::Rect;

    fn leaf() -> PrimitiveRef {
        Arc::new(BoxPrimitive::new())
    }

    #[test]
    fn test_set_focus_blurs_previous() {
        let a = leaf();
        let b = leaf();
        let mut focus = FocusManager::new();

        focus.set_focus(a.clone());
        assert!(a.has_focus());

        focus.set_focus(b.clone());
        assert!(!a.has_focus());
        assert!(b.has_focus());
        assert!(focus.is_focused(&b));
    }

    #[test]
    fn test_tab_cycles_and_wraps() {
        let a = leaf();
        let b = leaf();
        let c = leaf();
        let flex = Arc::new(Flex::new());
        for p in [&a, &b, &c] {
            flex.add_item(Some(p.clone()), 0, 1, false);
        }
        let root: PrimitiveRef = flex;
        let mut focus = FocusManager::new();

        let tab = KeyEvent::new(KeyCode::Tab);
        assert!(focus.handle_key(&root, &tab));
        assert!(focus.is_focused(&a));
        focus.handle_key(&root, &tab);
        focus.handle_key(&root, &tab);
        assert!(focus.is_focused(&c));
        focus.handle_key(&root, &tab);
        assert!(focus.is_focused(&a));

        let shift_tab = KeyEvent::with_modifiers(KeyCode::Tab, Modifiers::shift());
        focus.handle_key(&root, &shift_tab);
        assert!(focus.is_focused(&c));
        focus.handle_key(&root, &KeyEvent::new(KeyCode::BackTab));
        assert!(focus.is_focused(&b));
    }

    #[test]
    fn test_hidden_primitives_are_skipped() {
        let a = leaf();
        let b = leaf();
        b.set_visible(false);
        let flex = Arc::new(Flex::new());
        flex.add_item(Some(a.clone()), 0, 1, false);
        flex.add_item(Some(b.clone()), 0, 1, false);
        let root: PrimitiveRef = flex;

        let candidates = focusable_primitives(&root);
        assert_eq!(candidates.len(), 1);
        assert!(same_primitive(&candidates[0], &a));
    }

    #[test]
    fn test_restore_previous() {
        let a = leaf();
        let b = leaf();
        let mut focus = FocusManager::new();

        assert!(!focus.restore_previous());
        focus.set_focus(a.clone());
        focus.set_focus(b.clone());

        assert!(focus.restore_previous());
        assert!(focus.is_focused(&a));
        assert!(a.has_focus());
        assert!(!b.has_focus());
    }

    #[test]
    fn test_keys_bubble_to_ancestors() {
        let a = Arc::new(BoxPrimitive::new());
        let flex = Arc::new(Flex::new());
        flex.add_item(Some(a.clone()), 0, 1, true);
        flex.base().set_input_capture(|event| (event.code != KeyCode::Char('q')).then_some(*event));
        let root: PrimitiveRef = flex;

        let mut focus = FocusManager::new();
        focus.set_focus(root.clone());
        let a_ref: PrimitiveRef = a;
        assert!(focus.is_focused(&a_ref));

        assert!(focus.handle_key(&root, &KeyEvent::new(KeyCode::Char('q'))));
        assert!(!focus.handle_key(&root, &KeyEvent::new(KeyCode::Char('w'))));
    }

    #[test]
    fn test_blur_clears_focus() {
        let a = leaf();
        let mut focus = FocusManager::new();
        focus.set_focus(a.clone());
        focus.blur();
        assert!(focus.focused().is_none());
        assert!(!a.has_focus());
    }

    #[test]
    fn test_tab_scrolls_hidden_item_into_view() {
        let view = Arc::new(ScrollView::new());
        let items: Vec<PrimitiveRef> = (0..10).map(|_| leaf()).collect();
        for item in &items {
            view.add_item(Some(item.clone()), 3, false);
        }
        let root: PrimitiveRef = view.clone();
        root.set_rect(Rect::new(0, 0, 10, 6));
        root.draw(&mut FrameBuffer::new(10, 6));

        let mut focus = FocusManager::new();
        let tab = KeyEvent::new(KeyCode::Tab);
        for _ in 0..5 {
            focus.handle_key(&root, &tab);
        }
        assert!(focus.is_focused(&items[4]));
        assert_eq!(view.scroll_offset(), 9);

        for _ in 0..4 {
            focus.handle_key(&root, &KeyEvent::new(KeyCode::BackTab));
        }
        assert!(focus.is_focused(&items[0]));
        assert_eq!(view.scroll_offset(), 0);

        focus.handle_key(&root, &KeyEvent::new(KeyCode::BackTab));
        assert!(focus.is_focused(&items[9]));
        assert_eq!(view.scroll_offset(), 24);
    }
}
