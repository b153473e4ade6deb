//! Palette presets for spark-widgets.
//!
//! - terminal (default - uses ANSI colors)
//! - dracula
//! - nord

use super::Styles;
use crate::types::Rgba;

// =============================================================================
// Dracula
// =============================================================================

/// Dracula - dark palette with vivid accents.
pub fn dracula() -> Styles {
    Styles {
        primitive_background: Rgba::from_rgb_int(0x282a36),
        contrast_background: Rgba::from_rgb_int(0x44475a),
        more_contrast_background: Rgba::from_rgb_int(0x343746),
        border_color: Rgba::from_rgb_int(0x6272a4),
        border_focus_color: Rgba::from_rgb_int(0xbd93f9),
        title_color: Rgba::from_rgb_int(0xffffff),
        graphics_color: Rgba::from_rgb_int(0xf8f8f2),
        primary_text_color: Rgba::from_rgb_int(0xf8f8f2),
        scroll_bar_color: Rgba::from_rgb_int(0xbd93f9),
    }
}

// =============================================================================
// Nord
// =============================================================================

/// Nord - arctic, bluish colors.
pub fn nord() -> Styles {
    Styles {
        primitive_background: Rgba::from_rgb_int(0x2e3440),
        contrast_background: Rgba::from_rgb_int(0x434c5e),
        more_contrast_background: Rgba::from_rgb_int(0x3b4252),
        border_color: Rgba::from_rgb_int(0x4c566a),
        border_focus_color: Rgba::from_rgb_int(0x88c0d0),
        title_color: Rgba::from_rgb_int(0xeceff4),
        graphics_color: Rgba::from_rgb_int(0xd8dee9),
        primary_text_color: Rgba::from_rgb_int(0xd8dee9),
        scroll_bar_color: Rgba::from_rgb_int(0x88c0d0),
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Get a preset by name (case-insensitive, `_` ignored).
pub fn get_preset(name: &str) -> Option<Styles> {
    match name.to_lowercase().replace('_', "").as_str() {
        "terminal" => Some(Styles::terminal()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        _ => None,
    }
}

/// List all available preset names.
pub fn preset_names() -> &'static [&'static str] {
    &["terminal", "dracula", "nord"]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_preset_resolves() {
        for name in preset_names() {
            assert!(get_preset(name).is_some(), "missing preset {name}");
        }
    }

    #[test]
    fn test_preset_lookup_is_case_insensitive() {
        assert_eq!(get_preset("DRACULA"), Some(dracula()));
        assert_eq!(get_preset("No_rd"), Some(nord()));
        assert!(get_preset("solarized").is_none());
    }
}
