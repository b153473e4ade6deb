//! Surfaces and terminal output.
//!
//! Primitives draw into a [`Surface`]. The in-memory [`FrameBuffer`] is the
//! surface used for real frames (and for tests); the [`DiffRenderer`] pushes
//! its changed cells to the terminal through crossterm.
//!
//! ```text
//!   root.draw(&mut frame_buffer)      ← containers lay out and recurse
//!                 │
//!                 ▼
//!          ┌───────────────┐
//!          │  FrameBuffer  │  ← 2D grid of Cells
//!          └───────────────┘
//!                 │
//!                 ▼
//!          ┌───────────────┐
//!          │ DiffRenderer  │  ← only changed cells, one flush
//!          └───────────────┘
//!                 │
//!                 ▼
//!             Terminal
//! ```

use thiserror::Error;

pub mod buffer;
pub mod diff;
pub mod surface;
pub mod terminal;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use surface::{fill, print, text_width, ClippedSurface, Surface};
pub use terminal::Terminal;

/// Failure while talking to the terminal.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
