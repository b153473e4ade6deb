//! Primitives - the widget tree.
//!
//! Everything on screen is a [`Primitive`]. Leaves and containers share the
//! same trait; containers own their children as [`PrimitiveRef`]s and lay
//! them out each time they are drawn.
//!
//! - [`box_primitive`] - Border, title, padding, background and event hooks
//! - [`flex`] - One-axis container with fixed and proportional items
//! - [`grid`] - Row/column track container
//! - [`scroll_view`] - One-axis container that scrolls fixed-size items
//! - [`scrollbar`] - Scroll bar rendering shared by scrolling containers
//!
//! # Drawing
//!
//! ```text
//!   container.draw(surface)
//!       ├── base box: background, border, title
//!       ├── layout: set_rect on every child (under the container lock)
//!       └── children: unfocused first, focused last
//! ```

pub mod box_primitive;
pub mod flex;
pub mod grid;
pub mod scroll_view;
pub mod scrollbar;
mod types;

pub use box_primitive::{BoxPrimitive, InputCapture, MouseCapture, Padding};
pub use flex::Flex;
pub use grid::Grid;
pub use scroll_view::ScrollView;
pub use scrollbar::{render_scroll_bar, ScrollBar};
pub use types::{same_primitive, ItemSlot, MouseOutcome, Primitive, PrimitiveRef, SetFocus};
