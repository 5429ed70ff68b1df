//! System color palettes.
//!
//! A palette holds one color per modern system color for the light and dark
//! appearances, plus an optional canvas color for elevated surfaces in the
//! dark appearance. Palettes load from TOML; every entry is optional and
//! falls back to the built-in value.
//!
//! ```toml
//! [light]
//! canvas = "#fafafa"
//! link-text = "navy"
//!
//! [dark]
//! canvas = "#1e1e1e"
//! elevated-canvas = "#2a2a2a"
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::debug;

use crate::absolute::AbsoluteColor;
use crate::error::PaletteError;
use crate::keyword::{StyleColorOptions, SystemColor};

const PALETTE_LEN: usize = 19;

/// Key of the elevated canvas entry under `[dark]`.
const ELEVATED_CANVAS_KEY: &str = "elevated-canvas";

static BUILTIN: Lazy<SystemColorPalette> = Lazy::new(SystemColorPalette::standard);

/// System colors for the light and dark appearances.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemColorPalette {
    light: [AbsoluteColor; PALETTE_LEN],
    dark: [AbsoluteColor; PALETTE_LEN],
    elevated_canvas: AbsoluteColor,
}

impl Default for SystemColorPalette {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteFile {
    #[serde(default)]
    light: BTreeMap<String, String>,
    #[serde(default)]
    dark: BTreeMap<String, String>,
}

impl SystemColorPalette {
    /// The built-in palette.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    fn standard() -> Self {
        let hex = |value: u32| {
            AbsoluteColor::from_rgb_u8((value >> 16) as u8, (value >> 8) as u8, value as u8)
        };
        // Same order as SystemColor::MODERN.
        let light = [
            0x0a64d6, // AccentColor
            0xffffff, // AccentColorText
            0xff0000, // ActiveText
            0x767676, // ButtonBorder
            0xefefef, // ButtonFace
            0x000000, // ButtonText
            0xffffff, // Canvas
            0x000000, // CanvasText
            0xffffff, // Field
            0x000000, // FieldText
            0x808080, // GrayText
            0xb5d5ff, // Highlight
            0x000000, // HighlightText
            0x0000ee, // LinkText
            0xffff00, // Mark
            0x000000, // MarkText
            0x0064d6, // SelectedItem
            0xffffff, // SelectedItemText
            0x551a8b, // VisitedText
        ]
        .map(hex);
        let dark = [
            0x0a84ff, // AccentColor
            0xffffff, // AccentColorText
            0xff9e9e, // ActiveText
            0x6b6b6b, // ButtonBorder
            0x6b6b6b, // ButtonFace
            0xffffff, // ButtonText
            0x121212, // Canvas
            0xffffff, // CanvasText
            0x3b3b3b, // Field
            0xffffff, // FieldText
            0x8e8e93, // GrayText
            0x3f638b, // Highlight
            0xffffff, // HighlightText
            0x9e9eff, // LinkText
            0x665f00, // Mark
            0xffffff, // MarkText
            0x0a84ff, // SelectedItem
            0xffffff, // SelectedItemText
            0xd0adf0, // VisitedText
        ]
        .map(hex);
        Self {
            light,
            dark,
            elevated_canvas: hex(0x1c1c1e),
        }
    }

    /// Loads a palette from TOML, starting from the built-in colors.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Toml`] for malformed TOML or unknown tables,
    /// [`PaletteError::UnknownSystemColor`] for keys that are not modern
    /// system colors, and [`PaletteError::InvalidColor`] for values that
    /// are not hex or named colors.
    pub fn from_toml_str(input: &str) -> Result<Self, PaletteError> {
        let file: PaletteFile = toml::from_str(input)?;
        let mut palette = Self::builtin().clone();

        for (key, value) in &file.light {
            let color = parse_entry(key, value)?;
            palette.set(system_color_for_key(key)?, false, color);
        }
        for (key, value) in &file.dark {
            let color = parse_entry(key, value)?;
            if key == ELEVATED_CANVAS_KEY {
                palette.elevated_canvas = color;
            } else {
                palette.set(system_color_for_key(key)?, true, color);
            }
        }

        debug!(
            light = file.light.len(),
            dark = file.dark.len(),
            "loaded system color palette"
        );
        Ok(palette)
    }

    /// Overrides one color. Deprecated colors set their replacement.
    pub fn set(&mut self, color: SystemColor, dark: bool, value: AbsoluteColor) {
        let table = if dark { &mut self.dark } else { &mut self.light };
        table[color.palette_index()] = value;
    }

    /// Overrides the elevated dark canvas color.
    pub fn set_elevated_canvas(&mut self, value: AbsoluteColor) {
        self.elevated_canvas = value;
    }

    /// The color for `color` in one appearance, ignoring other options.
    pub fn get(&self, color: SystemColor, dark: bool) -> AbsoluteColor {
        let table = if dark { &self.dark } else { &self.light };
        table[color.palette_index()]
    }

    /// Resolves a system color under `options`.
    ///
    /// Deprecated keywords resolve as their replacement. `LinkText` becomes
    /// `VisitedText` for visited links, and `Canvas` uses the elevated
    /// canvas on elevated dark surfaces.
    pub fn resolve(&self, color: SystemColor, options: StyleColorOptions) -> AbsoluteColor {
        let mut color = color.modern();
        if color == SystemColor::LinkText && options.contains(StyleColorOptions::FOR_VISITED_LINK) {
            color = SystemColor::VisitedText;
        }
        let dark = options.contains(StyleColorOptions::USE_DARK_APPEARANCE);
        if dark
            && color == SystemColor::Canvas
            && options.contains(StyleColorOptions::USE_ELEVATED_USER_INTERFACE_LEVEL)
        {
            return self.elevated_canvas;
        }
        self.get(color, dark)
    }
}

fn system_color_for_key(key: &str) -> Result<SystemColor, PaletteError> {
    SystemColor::from_config_key(key).ok_or_else(|| PaletteError::UnknownSystemColor(key.to_string()))
}

fn parse_entry(key: &str, value: &str) -> Result<AbsoluteColor, PaletteError> {
    AbsoluteColor::parse(value).map_err(|source| PaletteError::InvalidColor {
        name: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColorParseError;

    #[test]
    fn test_builtin_canvas() {
        let palette = SystemColorPalette::builtin();
        assert_eq!(palette.get(SystemColor::Canvas, false), AbsoluteColor::WHITE);
        assert_eq!(palette.get(SystemColor::CanvasText, false), AbsoluteColor::BLACK);
        assert_eq!(palette.get(SystemColor::CanvasText, true), AbsoluteColor::WHITE);
    }

    #[test]
    fn test_resolve_options() {
        let palette = SystemColorPalette::builtin();
        let dark = StyleColorOptions::USE_DARK_APPEARANCE;
        assert_ne!(
            palette.resolve(SystemColor::Canvas, dark),
            palette.resolve(
                SystemColor::Canvas,
                dark | StyleColorOptions::USE_ELEVATED_USER_INTERFACE_LEVEL
            )
        );
        // Elevation only applies to the dark appearance.
        assert_eq!(
            palette.resolve(
                SystemColor::Canvas,
                StyleColorOptions::USE_ELEVATED_USER_INTERFACE_LEVEL
            ),
            AbsoluteColor::WHITE
        );
        assert_eq!(
            palette.resolve(SystemColor::LinkText, StyleColorOptions::FOR_VISITED_LINK),
            palette.get(SystemColor::VisitedText, false)
        );
    }

    #[test]
    fn test_from_toml_overrides() {
        let palette = SystemColorPalette::from_toml_str(
            r##"
            [light]
            canvas = "#fafafa"
            link-text = "navy"

            [dark]
            elevated-canvas = "#2a2a2a"
            "##,
        )
        .unwrap();
        assert_eq!(
            palette.get(SystemColor::Canvas, false),
            AbsoluteColor::from_rgb_u8(0xfa, 0xfa, 0xfa)
        );
        assert_eq!(
            palette.get(SystemColor::LinkText, false),
            AbsoluteColor::from_rgb_u8(0, 0, 0x80)
        );
        assert_eq!(
            palette.resolve(
                SystemColor::Canvas,
                StyleColorOptions::USE_DARK_APPEARANCE
                    | StyleColorOptions::USE_ELEVATED_USER_INTERFACE_LEVEL
            ),
            AbsoluteColor::from_rgb_u8(0x2a, 0x2a, 0x2a)
        );
        // Untouched entries keep their built-in values.
        assert_eq!(
            palette.get(SystemColor::Mark, true),
            SystemColorPalette::builtin().get(SystemColor::Mark, true)
        );
    }

    #[test]
    fn test_empty_file_is_builtin() {
        assert_eq!(
            &SystemColorPalette::from_toml_str("").unwrap(),
            SystemColorPalette::builtin()
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            SystemColorPalette::from_toml_str("[light]\nmenu = \"red\""),
            Err(PaletteError::UnknownSystemColor(key)) if key == "menu"
        ));
        assert!(matches!(
            SystemColorPalette::from_toml_str("[light]\ncanvas = \"#12\""),
            Err(PaletteError::InvalidColor { source: ColorParseError::InvalidLength(2), .. })
        ));
        assert!(matches!(
            SystemColorPalette::from_toml_str("[sepia]\ncanvas = \"red\""),
            Err(PaletteError::Toml(_))
        ));
        assert!(matches!(
            SystemColorPalette::from_toml_str("[light]\ncanvas = 12"),
            Err(PaletteError::Toml(_))
        ));
    }
}
