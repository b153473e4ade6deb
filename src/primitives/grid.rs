//! Grid - two-axis container.
//!
//! Items occupy a cell, or a span of cells, of a row/column track grid.
//! Track sizes use the same convention as flex items: a positive value is a
//! fixed number of cells, `0` a proportional track of weight 1 and `-n` a
//! proportional track of weight n.

use std::sync::Arc;

use parking_lot::RwLock;

use super::box_primitive::BoxPrimitive;
use super::types::{draw_deferred, route_mouse, same_primitive, MouseOutcome, Primitive, PrimitiveRef, SetFocus};
use crate::layout::{solve_grid, GridPlacement, GridTracks};
use crate::renderer::Surface;
use crate::state::{KeyEvent, MouseAction, MouseEvent};
use crate::types::Rect;

#[derive(Clone)]
struct GridItem {
    primitive: PrimitiveRef,
    placement: GridPlacement,
    focus: bool,
}

struct GridState {
    items: Vec<GridItem>,
    tracks: GridTracks,
}

/// Container placing items on row/column tracks.
pub struct Grid {
    base: BoxPrimitive,
    state: RwLock<GridState>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        let base = BoxPrimitive::new();
        base.set_background_transparent(true);
        Self {
            base,
            state: RwLock::new(GridState {
                items: Vec::new(),
                tracks: GridTracks::default(),
            }),
        }
    }

    /// The embedded box: border, title, background and event hooks.
    pub fn base(&self) -> &BoxPrimitive {
        &self.base
    }

    pub fn set_rows(&self, rows: &[i32]) {
        self.state.write().tracks.rows = rows.to_vec();
    }

    pub fn set_columns(&self, columns: &[i32]) {
        self.state.write().tracks.columns = columns.to_vec();
    }

    /// Empty cells between rows and between columns.
    pub fn set_gap(&self, row_gap: i32, column_gap: i32) {
        let mut state = self.state.write();
        state.tracks.row_gap = row_gap.max(0);
        state.tracks.column_gap = column_gap.max(0);
    }

    /// Place `p` at (`row`, `column`) spanning the given number of tracks.
    ///
    /// Spans below 1 are treated as 1. If `focus` is set, `p` receives focus
    /// when the grid does (first flagged item wins).
    pub fn add_item(&self, p: PrimitiveRef, row: usize, column: usize, row_span: usize, column_span: usize, focus: bool) {
        let placement = GridPlacement::new(row, column, row_span.max(1), column_span.max(1));
        let mut state = self.state.write();
        state.items.push(GridItem {
            primitive: p,
            placement,
            focus,
        });
        tracing::debug!(row, column, row_span, column_span, count = state.items.len(), "grid item added");
    }

    /// Remove every occurrence of `p`.
    pub fn remove_item(&self, p: &PrimitiveRef) {
        let mut state = self.state.write();
        state.items.retain(|item| !same_primitive(&item.primitive, p));
        tracing::debug!(count = state.items.len(), "grid item removed");
    }

    pub fn clear(&self) {
        self.state.write().items.clear();
    }

    /// All items in insertion order.
    pub fn items(&self) -> Vec<PrimitiveRef> {
        self.state.read().items.iter().map(|item| item.primitive.clone()).collect()
    }

    pub fn item_count(&self) -> usize {
        self.state.read().items.len()
    }

    fn layout(&self, area: Rect) -> Vec<PrimitiveRef> {
        let state = self.state.write();
        let placements: Vec<GridPlacement> = state.items.iter().map(|item| item.placement).collect();

        match solve_grid(area, &state.tracks, &placements) {
            Ok(rects) => {
                tracing::trace!(items = rects.len(), ?area, "grid layout");
                state
                    .items
                    .iter()
                    .zip(rects)
                    .map(|(item, rect)| {
                        item.primitive.set_rect(rect);
                        item.primitive.clone()
                    })
                    .collect()
            }
            Err(err) => {
                tracing::warn!(%err, "grid layout failed, items left unplaced");
                Vec::new()
            }
        }
    }
}

impl Primitive for Grid {
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
        self.base.draw(surface);
        let children = self.layout(self.base.inner_rect());
        draw_deferred(surface, &children);
    }

    fn has_focus(&self) -> bool {
        self.base.holds_focus() || self.items().iter().any(|child| child.has_focus())
    }

    fn focus(&self) -> Option<PrimitiveRef> {
        let target = self
            .state
            .read()
            .items
            .iter()
            .find(|item| item.focus)
            .map(|item| item.primitive.clone());

        if target.is_none() {
            self.base.set_holds_focus(true);
        }
        target
    }

    fn blur(&self) {
        self.base.set_holds_focus(false);
    }

    fn children(&self) -> Vec<PrimitiveRef> {
        self.items()
    }

    fn handle_mouse(self: Arc<Self>, action: MouseAction, event: &MouseEvent, set_focus: SetFocus<'_>) -> MouseOutcome {
        let Some((action, event)) = self.base.capture_mouse(action, event) else {
            return MouseOutcome::consumed();
        };
        if !self.rect().contains(event.x, event.y) {
            return MouseOutcome::ignored();
        }
        route_mouse(self.items(), action, &event, set_focus)
    }

    fn handle_key(&self, event: &KeyEvent) -> bool {
        self.base.capture_key(event).is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================
