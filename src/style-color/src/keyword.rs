//! Color keywords: named colors, `currentcolor` and system colors.
//!
//! Keyword lookup is a collaborator of value construction. The
//! [`ColorKeywordLookup`] trait maps absolute keywords and system colors to
//! concrete colors; [`DefaultColorKeywords`] backs it with the CSS named
//! color table and a [`SystemColorPalette`].
//!
//! # Examples
//!
//! ```
//! use style_color::{AbsoluteColor, DefaultColorKeywords, StyleColor, StyleColorOptions};
//!
//! let keywords = DefaultColorKeywords::default();
//! let red = StyleColor::from_keyword("Red", StyleColorOptions::empty(), &keywords).unwrap();
//! assert_eq!(red, StyleColor::from(AbsoluteColor::RED));
//!
//! let current = StyleColor::from_keyword("currentColor", StyleColorOptions::empty(), &keywords).unwrap();
//! assert!(current.is_current_color());
//! ```

use std::fmt;

use bitflags::bitflags;
use tracing::debug;

use crate::absolute::AbsoluteColor;
use crate::error::{ColorError, Result};
use crate::named;
use crate::palette::SystemColorPalette;
use crate::value::StyleColor;

bitflags! {
    /// Kinds of color keyword accepted by [`is_color_keyword`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CssColorType: u8 {
        /// Named colors and `transparent`.
        const ABSOLUTE = 0b0000_0001;
        /// `currentcolor`.
        const CURRENT  = 0b0000_0010;
        /// System colors, deprecated ones included.
        const SYSTEM   = 0b0000_0100;
    }
}

impl Default for CssColorType {
    fn default() -> Self {
        Self::all()
    }
}

bitflags! {
    /// Options for resolving system color keywords.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleColorOptions: u8 {
        /// The element is a visited link: `LinkText` means `VisitedText`.
        const FOR_VISITED_LINK                   = 0b0000_0001;
        /// Use the configured palette instead of the built-in one.
        const USE_SYSTEM_APPEARANCE              = 0b0000_0010;
        /// Use the dark appearance.
        const USE_DARK_APPEARANCE                = 0b0000_0100;
        /// The content sits on an elevated surface, such as a sheet.
        const USE_ELEVATED_USER_INTERFACE_LEVEL  = 0b0000_1000;
    }
}

macro_rules! system_colors {
    (
        modern { $($modern:ident => $modern_name:literal, $modern_key:literal;)* }
        deprecated { $($old:ident => $old_name:literal, $replacement:ident;)* }
    ) => {
        /// A CSS system color keyword.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SystemColor {
            $(
                #[doc = concat!("`", $modern_name, "`")]
                $modern,
            )*
            $(
                #[doc = concat!("`", $old_name, "`, deprecated alias of `", stringify!($replacement), "`")]
                $old,
            )*
        }

        impl SystemColor {
            /// The non-deprecated system colors, in palette order.
            pub const MODERN: &'static [Self] = &[$(Self::$modern,)*];

            /// Every system color keyword.
            pub const ALL: &'static [Self] = &[$(Self::$modern,)* $(Self::$old,)*];

            /// The keyword with its conventional capitalization.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$modern => $modern_name,)*
                    $(Self::$old => $old_name,)*
                }
            }

            /// The kebab-case key used in palette files. Deprecated colors
            /// have none; they follow their replacement.
            pub const fn config_key(self) -> Option<&'static str> {
                match self {
                    $(Self::$modern => Some($modern_key),)*
                    _ => None,
                }
            }

            /// The modern color a deprecated keyword maps to, or `self`.
            pub const fn modern(self) -> Self {
                match self {
                    $(Self::$old => Self::$replacement,)*
                    other => other,
                }
            }

            /// Returns true for the deprecated keywords.
            pub const fn is_deprecated(self) -> bool {
                !matches!(self, $(Self::$modern)|*)
            }
        }
    };
}

system_colors! {
    modern {
        AccentColor => "AccentColor", "accent-color";
        AccentColorText => "AccentColorText", "accent-color-text";
        ActiveText => "ActiveText", "active-text";
        ButtonBorder => "ButtonBorder", "button-border";
        ButtonFace => "ButtonFace", "button-face";
        ButtonText => "ButtonText", "button-text";
        Canvas => "Canvas", "canvas";
        CanvasText => "CanvasText", "canvas-text";
        Field => "Field", "field";
        FieldText => "FieldText", "field-text";
        GrayText => "GrayText", "gray-text";
        Highlight => "Highlight", "highlight";
        HighlightText => "HighlightText", "highlight-text";
        LinkText => "LinkText", "link-text";
        Mark => "Mark", "mark";
        MarkText => "MarkText", "mark-text";
        SelectedItem => "SelectedItem", "selected-item";
        SelectedItemText => "SelectedItemText", "selected-item-text";
        VisitedText => "VisitedText", "visited-text";
    }
    deprecated {
        ActiveBorder => "ActiveBorder", ButtonBorder;
        ActiveCaption => "ActiveCaption", Canvas;
        AppWorkspace => "AppWorkspace", Canvas;
        Background => "Background", Canvas;
        ButtonHighlight => "ButtonHighlight", ButtonFace;
        ButtonShadow => "ButtonShadow", ButtonFace;
        CaptionText => "CaptionText", CanvasText;
        InactiveBorder => "InactiveBorder", ButtonBorder;
        InactiveCaption => "InactiveCaption", Canvas;
        InactiveCaptionText => "InactiveCaptionText", GrayText;
        InfoBackground => "InfoBackground", Canvas;
        InfoText => "InfoText", CanvasText;
        Menu => "Menu", Canvas;
        MenuText => "MenuText", CanvasText;
        Scrollbar => "Scrollbar", Canvas;
        ThreeDDarkShadow => "ThreeDDarkShadow", ButtonBorder;
        ThreeDFace => "ThreeDFace", ButtonFace;
        ThreeDHighlight => "ThreeDHighlight", ButtonBorder;
        ThreeDLightShadow => "ThreeDLightShadow", ButtonBorder;
        ThreeDShadow => "ThreeDShadow", ButtonBorder;
        Window => "Window", Canvas;
        WindowFrame => "WindowFrame", ButtonBorder;
        WindowText => "WindowText", CanvasText;
    }
}

impl SystemColor {
    /// Looks up a keyword, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.as_str().eq_ignore_ascii_case(name))
    }

    /// Looks up a modern color by its palette file key.
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::MODERN
            .iter()
            .copied()
            .find(|color| color.config_key() == Some(key))
    }

    /// Position of the modern equivalent in [`SystemColor::MODERN`].
    pub(crate) fn palette_index(self) -> usize {
        let modern = self.modern();
        Self::MODERN
            .iter()
            .position(|color| *color == modern)
            .unwrap_or(0)
    }
}

impl fmt::Display for SystemColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Keyword classification
// ============================================================================

/// Returns true for `currentcolor`, ignoring ASCII case.
pub fn is_current_color_keyword(name: &str) -> bool {
    name.eq_ignore_ascii_case("currentcolor")
}

/// Returns true for named colors and `transparent`, ignoring ASCII case.
pub fn is_absolute_color_keyword(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower == "transparent" || named::is_named_color(&lower)
}

/// Returns true for system colors, deprecated ones included.
pub fn is_system_color_keyword(name: &str) -> bool {
    SystemColor::from_name(name).is_some()
}

/// Returns true for deprecated system colors.
pub fn is_deprecated_system_color_keyword(name: &str) -> bool {
    SystemColor::from_name(name).is_some_and(SystemColor::is_deprecated)
}

/// Returns true if `name` is a color keyword of one of the allowed kinds.
pub fn is_color_keyword(name: &str, allowed: CssColorType) -> bool {
    (allowed.contains(CssColorType::ABSOLUTE) && is_absolute_color_keyword(name))
        || (allowed.contains(CssColorType::CURRENT) && is_current_color_keyword(name))
        || (allowed.contains(CssColorType::SYSTEM) && is_system_color_keyword(name))
}

// ============================================================================
// Lookup collaborator
// ============================================================================

/// Maps color keywords to absolute colors.
pub trait ColorKeywordLookup {
    /// Looks up a named color or `transparent`. `name` is lowercase.
    fn absolute_by_name(&self, name: &str) -> Option<AbsoluteColor>;

    /// Resolves a system color under the given appearance options.
    fn system_color(&self, color: SystemColor, options: StyleColorOptions) -> AbsoluteColor;
}

/// Keyword lookup backed by the CSS named colors and a system palette.
#[derive(Debug, Clone, Default)]
pub struct DefaultColorKeywords {
    palette: SystemColorPalette,
}

impl DefaultColorKeywords {
    /// Creates a lookup using `palette` when
    /// [`StyleColorOptions::USE_SYSTEM_APPEARANCE`] is set.
    pub fn new(palette: SystemColorPalette) -> Self {
        Self { palette }
    }

    /// The configured palette.
    pub fn palette(&self) -> &SystemColorPalette {
        &self.palette
    }
}

impl ColorKeywordLookup for DefaultColorKeywords {
    fn absolute_by_name(&self, name: &str) -> Option<AbsoluteColor> {
        named::lookup_absolute_keyword(name)
    }

    fn system_color(&self, color: SystemColor, options: StyleColorOptions) -> AbsoluteColor {
        let palette = if options.contains(StyleColorOptions::USE_SYSTEM_APPEARANCE) {
            &self.palette
        } else {
            SystemColorPalette::builtin()
        };
        palette.resolve(color, options)
    }
}

impl StyleColor {
    /// Builds a value from a color keyword.
    ///
    /// `currentcolor` gives the keyword itself; named colors,
    /// `transparent` and system colors resolve through `lookup`
    /// immediately. Matching ignores ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnknownKeyword`] if `name` is not a color
    /// keyword.
    pub fn from_keyword<L>(name: &str, options: StyleColorOptions, lookup: &L) -> Result<Self>
    where
        L: ColorKeywordLookup + ?Sized,
    {
        let lower = name.to_ascii_lowercase();
        if lower == "currentcolor" {
            return Ok(Self::current_color());
        }
        if let Some(color) = lookup.absolute_by_name(&lower) {
            return Ok(Self::absolute(color));
        }
        if let Some(system) = SystemColor::from_name(name) {
            return Ok(Self::absolute(lookup.system_color(system, options)));
        }
        debug!(name, "unknown color keyword");
        Err(ColorError::UnknownKeyword(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod classification_tests {
        use super::*;

        #[test]
        fn test_counts() {
            assert_eq!(SystemColor::MODERN.len(), 19);
            assert_eq!(SystemColor::ALL.len(), 42);
        }

        #[test]
        fn test_keyword_kinds() {
            assert!(is_color_keyword("red", CssColorType::ABSOLUTE));
            assert!(is_color_keyword("Transparent", CssColorType::ABSOLUTE));
            assert!(!is_color_keyword("red", CssColorType::SYSTEM));
            assert!(is_color_keyword("CurrentColor", CssColorType::CURRENT));
            assert!(is_color_keyword("canvastext", CssColorType::SYSTEM));
            assert!(is_color_keyword("ThreeDFace", CssColorType::default()));
            assert!(!is_color_keyword("bogus", CssColorType::all()));
        }

        #[test]
        fn test_deprecated_mapping() {
            assert!(is_deprecated_system_color_keyword("windowtext"));
            assert!(!is_deprecated_system_color_keyword("CanvasText"));
            assert_eq!(SystemColor::WindowText.modern(), SystemColor::CanvasText);
            assert_eq!(SystemColor::ThreeDFace.modern(), SystemColor::ButtonFace);
            assert_eq!(SystemColor::InactiveCaptionText.modern(), SystemColor::GrayText);
            assert_eq!(SystemColor::Canvas.modern(), SystemColor::Canvas);
            assert_eq!(
                SystemColor::Window.palette_index(),
                SystemColor::Canvas.palette_index()
            );
        }

        #[test]
        fn test_config_keys() {
            assert_eq!(SystemColor::CanvasText.config_key(), Some("canvas-text"));
            assert_eq!(SystemColor::Menu.config_key(), None);
            assert_eq!(
                SystemColor::from_config_key("selected-item-text"),
                Some(SystemColor::SelectedItemText)
            );
            assert_eq!(SystemColor::from_config_key("menu"), None);
        }
    }

    mod from_keyword_tests {
        use super::*;

        #[test]
        fn test_named_and_transparent() {
            let keywords = DefaultColorKeywords::default();
            let options = StyleColorOptions::empty();
            assert_eq!(
                StyleColor::from_keyword("RebeccaPurple", options, &keywords).unwrap(),
                StyleColor::from(AbsoluteColor::from_rgb_u8(0x66, 0x33, 0x99))
            );
            assert_eq!(
                StyleColor::from_keyword("transparent", options, &keywords).unwrap(),
                StyleColor::from(AbsoluteColor::TRANSPARENT)
            );
        }

        #[test]
        fn test_system_colors_follow_appearance() {
            let keywords = DefaultColorKeywords::default();
            let light = StyleColor::from_keyword("Canvas", StyleColorOptions::empty(), &keywords)
                .unwrap();
            let dark = StyleColor::from_keyword(
                "Canvas",
                StyleColorOptions::USE_DARK_APPEARANCE,
                &keywords,
            )
            .unwrap();
            assert_eq!(light, StyleColor::from(AbsoluteColor::WHITE));
            assert_ne!(light, dark);
        }

        #[test]
        fn test_deprecated_resolves_like_replacement() {
            let keywords = DefaultColorKeywords::default();
            let options = StyleColorOptions::USE_DARK_APPEARANCE;
            assert_eq!(
                StyleColor::from_keyword("Window", options, &keywords).unwrap(),
                StyleColor::from_keyword("Canvas", options, &keywords).unwrap()
            );
        }

        #[test]
        fn test_visited_link_text() {
            let keywords = DefaultColorKeywords::default();
            assert_eq!(
                StyleColor::from_keyword("LinkText", StyleColorOptions::FOR_VISITED_LINK, &keywords)
                    .unwrap(),
                StyleColor::from_keyword("VisitedText", StyleColorOptions::empty(), &keywords)
                    .unwrap()
            );
        }

        #[test]
        fn test_unknown_keyword() {
            let keywords = DefaultColorKeywords::default();
            assert_eq!(
                StyleColor::from_keyword("notacolor", StyleColorOptions::empty(), &keywords),
                Err(ColorError::UnknownKeyword("notacolor".to_string()))
            );
        }
    }
}
