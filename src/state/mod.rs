//! State Module - input and focus state around a primitive tree
//!
//! - **Keyboard** - Key event types, crossterm conversion
//! - **Mouse** - Discrete mouse actions, click synthesis, capture-aware dispatch
//! - **Focus** - Delegation, Tab cycling, key routing, history

pub mod focus;
pub mod keyboard;
pub mod mouse;

pub use focus::{focusable_primitives, FocusManager};
pub use keyboard::{KeyCode, KeyEvent, KeyState, Modifiers};
pub use mouse::{MouseAction, MouseDispatcher, MouseEvent, MouseTranslator, DOUBLE_CLICK_INTERVAL};
