//! Theme System for spark-widgets.
//!
//! The palette every primitive draws with. A process-wide active palette is
//! kept behind a lock; primitives copy the colors they need when they are
//! constructed, so switching palettes affects primitives created afterwards.
//!
//! # Example
//!
//! ```rust
//! use spark_widgets::theme::{self, Styles};
//!
//! theme::use_preset("dracula").unwrap();
//! let scroll_bar = theme::styles().scroll_bar_color;
//!
//! // Override a single slot by name.
//! let custom = Styles::terminal().with_color("title", "#ffcc00").unwrap();
//! theme::set_styles(custom);
//! # theme::set_styles(Styles::terminal());
//! # let _ = scroll_bar;
//! ```

use parking_lot::RwLock;
use thiserror::Error;

use crate::types::Rgba;

pub mod presets;

pub use presets::{get_preset, preset_names};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme preset `{0}`")]
    UnknownPreset(String),
    #[error("unknown palette slot `{0}`")]
    UnknownSlot(String),
    #[error("invalid color `{0}`")]
    InvalidColor(String),
}

// =============================================================================
// Styles - the palette
// =============================================================================

/// Colors used by the primitives when nothing more specific is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    /// Main background of primitives; also fills blank space.
    pub primitive_background: Rgba,
    /// Background for contrasting elements.
    pub contrast_background: Rgba,
    /// Background for even more contrasting elements.
    pub more_contrast_background: Rgba,
    /// Box borders.
    pub border_color: Rgba,
    /// Box borders while the box has focus.
    pub border_focus_color: Rgba,
    /// Box titles.
    pub title_color: Rgba,
    /// Graphics such as lines and glyphs.
    pub graphics_color: Rgba,
    /// Primary text.
    pub primary_text_color: Rgba,
    /// Scroll bars.
    pub scroll_bar_color: Rgba,
}

impl Default for Styles {
    fn default() -> Self {
        Self::terminal()
    }
}

impl Styles {
    /// Palette built on ANSI colors so the user's terminal scheme shows through.
    pub const fn terminal() -> Self {
        Self {
            primitive_background: Rgba::TERMINAL_DEFAULT,
            contrast_background: Rgba::ansi(4),
            more_contrast_background: Rgba::ansi(2),
            border_color: Rgba::ansi(7),
            border_focus_color: Rgba::ansi(12),
            title_color: Rgba::ansi(15),
            graphics_color: Rgba::ansi(15),
            primary_text_color: Rgba::TERMINAL_DEFAULT,
            scroll_bar_color: Rgba::ansi(15),
        }
    }

    /// Replace one slot by name with a hex color.
    ///
    /// Slots: `primitive_background`, `contrast_background`,
    /// `more_contrast_background`, `border`, `border_focus`, `title`,
    /// `graphics`, `primary_text`, `scroll_bar`.
    pub fn with_color(mut self, slot: &str, hex: &str) -> Result<Self, ThemeError> {
        let color = Rgba::from_hex(hex).ok_or_else(|| ThemeError::InvalidColor(hex.to_string()))?;
        let target = match slot {
            "primitive_background" => &mut self.primitive_background,
            "contrast_background" => &mut self.contrast_background,
            "more_contrast_background" => &mut self.more_contrast_background,
            "border" => &mut self.border_color,
            "border_focus" => &mut self.border_focus_color,
            "title" => &mut self.title_color,
            "graphics" => &mut self.graphics_color,
            "primary_text" => &mut self.primary_text_color,
            "scroll_bar" => &mut self.scroll_bar_color,
            other => return Err(ThemeError::UnknownSlot(other.to_string())),
        };
        *target = color;
        Ok(self)
    }
}

// =============================================================================
// Active palette
// =============================================================================

static ACTIVE: RwLock<Styles> = RwLock::new(Styles::terminal());

/// Copy of the active palette.
pub fn styles() -> Styles {
    *ACTIVE.read()
}

/// Replace the active palette.
pub fn set_styles(styles: Styles) {
    *ACTIVE.write() = styles;
    tracing::debug!("active palette replaced");
}

/// Activate a built-in preset by name.
pub fn use_preset(name: &str) -> Result<(), ThemeError> {
    let preset = get_preset(name).ok_or_else(|| ThemeError::UnknownPreset(name.to_string()))?;
    set_styles(preset);
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_color_overrides_slot() {
        let styles = Styles::terminal().with_color("scroll_bar", "#102030").unwrap();
        assert_eq!(styles.scroll_bar_color, Rgba::rgb(0x10, 0x20, 0x30));
        assert_eq!(styles.border_color, Styles::terminal().border_color);
    }

    #[test]
    fn test_with_color_errors() {
        assert_eq!(
            Styles::terminal().with_color("nope", "#fff"),
            Err(ThemeError::UnknownSlot("nope".to_string()))
        );
        assert_eq!(
            Styles::terminal().with_color("title", "blue-ish"),
            Err(ThemeError::InvalidColor("blue-ish".to_string()))
        );
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!(
            use_preset("does-not-exist"),
            Err(ThemeError::UnknownPreset("does-not-exist".to_string()))
        );
    }

    #[test]
    fn test_default_is_terminal() {
        assert_eq!(Styles::default(), Styles::terminal());
        assert!(Styles::default().primitive_background.is_terminal_default());
    }
}
