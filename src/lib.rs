//! # spark-widgets
//!
//! Container layout and interaction engine for terminal UIs.
//!
//! A UI is a tree of [`Primitive`]s. Leaves draw themselves; containers
//! ([`Flex`], [`Grid`], [`ScrollView`]) own their children, compute a
//! rectangle for each one every time they are drawn, and route input down
//! the tree.
//!
//! ```text
//!   crossterm event
//!        │
//!        ├── key ──► FocusManager ──► focused primitive ──► ancestors
//!        │
//!        └── mouse ─► MouseTranslator ─► MouseDispatcher ─► root (or captor)
//!                                                │
//!                                                └─► containers route to the
//!                                                    child under the pointer
//!
//!   Terminal::draw(root) ─► FrameBuffer ─► DiffRenderer ─► stdout
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Rect, colors, cell styles, shared enums
//! - [`theme`] - Process-wide palette and presets
//! - [`layout`] - Main-axis distribution and grid track solving
//! - [`primitives`] - Box, Flex, Grid, ScrollView
//! - [`state`] - Keyboard and mouse events, focus management
//! - [`renderer`] - Surfaces, frame buffer, terminal output
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use spark_widgets::{BoxPrimitive, Flex, FlexDirection, FrameBuffer, Primitive, PrimitiveRef, Rect};
//!
//! let left: PrimitiveRef = Arc::new(BoxPrimitive::new());
//! let right: PrimitiveRef = Arc::new(BoxPrimitive::new());
//!
//! let flex = Flex::new();
//! flex.set_direction(FlexDirection::Row);
//! flex.add_item(Some(left.clone()), 10, 0, false);
//! flex.add_item(Some(right.clone()), 0, 1, false);
//!
//! flex.set_rect(Rect::new(0, 0, 40, 5));
//! flex.draw(&mut FrameBuffer::new(40, 5));
//!
//! assert_eq!(left.rect(), Rect::new(0, 0, 10, 5));
//! assert_eq!(right.rect(), Rect::new(10, 0, 30, 5));
//! ```

pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use layout::{distribute, offsets, solve_grid, GridPlacement, GridTracks, ItemSize, LayoutError};

pub use primitives::{
    render_scroll_bar, same_primitive, BoxPrimitive, Flex, Grid, InputCapture, ItemSlot,
    MouseCapture, MouseOutcome, Padding, Primitive, PrimitiveRef, ScrollBar, ScrollView, SetFocus,
};

pub use renderer::{ClippedSurface, DiffRenderer, FrameBuffer, RenderError, Surface, Terminal};

pub use state::{
    // Focus
    focusable_primitives, FocusManager,
    // Keyboard
    KeyCode, KeyEvent, KeyState, Modifiers,
    // Mouse
    MouseAction, MouseDispatcher, MouseEvent, MouseTranslator,
};

pub use theme::{get_preset, preset_names, set_styles, styles, use_preset, Styles, ThemeError};
