//! Layout algorithms for containers.
//!
//! - [`distribute`]: splits a main axis between fixed and proportional items.
//!   Used by `Flex` and, for fixed items only, by `ScrollView`.
//! - [`grid`]: two-dimensional track solving for `Grid`, backed by Taffy.
//!
//! Both are pure functions of their inputs. Containers call them on every
//! draw; nothing is cached between frames.

use thiserror::Error;

pub mod distribute;
pub mod grid;

pub use distribute::{distribute, offsets, ItemSize};
pub use grid::{solve_grid, GridPlacement, GridTracks};

/// Layout solver failure.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("grid solver failed: {0}")]
    Solver(String),
}
