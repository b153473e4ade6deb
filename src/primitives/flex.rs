//! Flex - one-axis container.
//!
//! Arranges an ordered list of items along one axis. Each item is either a
//! fixed number of cells or a proportional share of the space left over by
//! the fixed items. Every item spans the full cross axis.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spark_widgets::primitives::{BoxPrimitive, Flex, Primitive, PrimitiveRef};
//! use spark_widgets::renderer::FrameBuffer;
//! use spark_widgets::types::{FlexDirection, Rect};
//!
//! let sidebar: PrimitiveRef = Arc::new(BoxPrimitive::new());
//! let main: PrimitiveRef = Arc::new(BoxPrimitive::new());
//!
//! let flex = Flex::new();
//! flex.set_direction(FlexDirection::Row);
//! flex.add_item(Some(sidebar.clone()), 20, 0, false);
//! flex.add_item(Some(main.clone()), 0, 1, true);
//! flex.set_rect(Rect::new(0, 0, 80, 24));
//!
//! flex.draw(&mut FrameBuffer::new(80, 24));
//! assert_eq!(main.rect(), Rect::new(20, 0, 60, 24));
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use super::box_primitive::BoxPrimitive;
use super::types::{draw_deferred, route_mouse, ItemSlot, MouseOutcome, Primitive, PrimitiveRef, SetFocus};
use crate::layout::{distribute, offsets, ItemSize};
use crate::renderer::Surface;
use crate::state::{KeyEvent, MouseAction, MouseEvent};
use crate::types::{FlexDirection, Rect};

/// Layout record of one flex item.
#[derive(Debug, Clone)]
struct FlexItem {
    slot: ItemSlot,
    fixed: i32,
    proportion: i32,
    focus: bool,
}

impl FlexItem {
    fn size(&self) -> ItemSize {
        ItemSize {
            fixed: self.fixed,
            proportion: self.proportion,
        }
    }
}

struct FlexState {
    items: Vec<FlexItem>,
    direction: FlexDirection,
    full_screen: bool,
}

/// One-axis container of fixed and proportional items.
pub struct Flex {
    base: BoxPrimitive,
    state: RwLock<FlexState>,
}

impl Default for Flex {
    fn default() -> Self {
        Self::new()
    }
}

fn warn_malformed(fixed: i32, proportion: i32) {
    if fixed < 0 {
        tracing::warn!(fixed, "negative fixed size, flex item gets zero length");
    } else if fixed == 0 && proportion < 1 {
        tracing::warn!(proportion, "proportional flex item needs proportion >= 1, item gets zero length");
    }
}

impl Flex {
    /// Empty container stacking items top to bottom, with a transparent background.
    pub fn new() -> Self {
        let base = BoxPrimitive::new();
        base.set_background_transparent(true);
        Self {
            base,
            state: RwLock::new(FlexState {
                items: Vec::new(),
                direction: FlexDirection::Column,
                full_screen: false,
            }),
        }
    }

    /// The embedded box: border, title, background and event hooks.
    pub fn base(&self) -> &BoxPrimitive {
        &self.base
    }

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

    // =========================================================================
    // Items
    // =========================================================================

    /// Append an item. `None` reserves empty space.
    ///
    /// `fixed` is the item's main-axis length, or 0 for a proportional item
    /// whose share of the free space is weighted by `proportion` (>= 1).
    /// The first item with `focus` set receives focus when the flex does.
    pub fn add_item(&self, item: Option<PrimitiveRef>, fixed: i32, proportion: i32, focus: bool) {
        let mut state = self.state.write();
        let index = state.items.len();
        Self::insert(&mut state, index, item, fixed, proportion, focus);
    }

    /// Insert an item at `index`, clamped to the current item count.
    pub fn add_item_at_index(&self, index: usize, item: Option<PrimitiveRef>, fixed: i32, proportion: i32, focus: bool) {
        let mut state = self.state.write();
        let index = index.min(state.items.len());
        Self::insert(&mut state, index, item, fixed, proportion, focus);
    }

    fn insert(state: &mut FlexState, index: usize, item: Option<PrimitiveRef>, fixed: i32, proportion: i32, focus: bool) {
        warn_malformed(fixed, proportion);
        state.items.insert(
            index,
            FlexItem {
                slot: item.into(),
                fixed,
                proportion,
                focus,
            },
        );
        tracing::debug!(index, fixed, proportion, count = state.items.len(), "flex item added");
    }

    /// Remove every occurrence of `p`, keeping the order of the rest.
    pub fn remove_item(&self, p: &PrimitiveRef) {
        let mut state = self.state.write();
        let before = state.items.len();
        for index in (0..state.items.len()).rev() {
            if state.items[index].slot.holds(p) {
                state.items.remove(index);
            }
        }
        tracing::debug!(removed = before - state.items.len(), "flex item removed");
    }

    /// Change the size of every occurrence of `p` in place.
    pub fn resize_item(&self, p: &PrimitiveRef, fixed: i32, proportion: i32) {
        let mut state = self.state.write();
        warn_malformed(fixed, proportion);
        for item in state.items.iter_mut().filter(|item| item.slot.holds(p)) {
            item.fixed = fixed;
            item.proportion = proportion;
        }
        tracing::debug!(fixed, proportion, "flex item resized");
    }

    /// All item slots in order.
    pub fn items(&self) -> Vec<ItemSlot> {
        self.state.read().items.iter().map(|item| item.slot.clone()).collect()
    }

    /// The primitive at `index`, if the slot exists and is occupied.
    pub fn item(&self, index: usize) -> Option<PrimitiveRef> {
        self.state
            .read()
            .items
            .get(index)
            .and_then(|item| item.slot.primitive().cloned())
    }

    pub fn item_count(&self) -> usize {
        self.state.read().items.len()
    }

    pub fn clear(&self) {
        self.state.write().items.clear();
        tracing::debug!("flex cleared");
    }

    fn occupied(&self) -> Vec<PrimitiveRef> {
        self.state
            .read()
            .items
            .iter()
            .filter_map(|item| item.slot.primitive().cloned())
            .collect()
    }

    /// Lay out the items inside `area`, returning the occupied ones in order.
    fn layout(&self, area: Rect) -> Vec<PrimitiveRef> {
        let state = self.state.write();
        let direction = state.direction;
        let sizes: Vec<ItemSize> = state.items.iter().map(FlexItem::size).collect();
        let lengths = distribute(direction.main_len(&area), &sizes);
        let starts = offsets(direction.main_start(&area), &lengths);

        tracing::trace!(items = sizes.len(), extent = direction.main_len(&area), ?direction, "flex layout");

        state
            .items
            .iter()
            .zip(starts.into_iter().zip(lengths))
            .filter_map(|(item, (start, length))| {
                let primitive = item.slot.primitive()?;
                primitive.set_rect(direction.slot(&area, start, length));
                Some(primitive.clone())
            })
            .collect()
    }
}

impl Primitive for Flex {
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
        let children = self.layout(self.base.inner_rect());
        draw_deferred(surface, &children);
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
            .find(|item| item.focus && !item.slot.is_spacer())
            .and_then(|item| item.slot.primitive().cloned());

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

    fn handle_mouse(self: Arc<Self>, action: MouseAction, event: &MouseEvent, set_focus: SetFocus<'_>) -> MouseOutcome {
        let Some((action, event)) = self.base.capture_mouse(action, event) else {
            return MouseOutcome::consumed();
        };
        if !self.rect().contains(event.x, event.y) {
            return MouseOutcome::ignored();
        }
        route_mouse(self.occupied(), action, &event, set_focus)
    }

    fn handle_key(&self, event: &KeyEvent) -> bool {
        self.base.capture_key(event).is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================
