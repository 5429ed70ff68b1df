//! Fully resolved sRGB colors.
//!
//! [`AbsoluteColor`] is the output of resolution and the payload of the
//! inline `Absolute` variant of [`StyleColor`](crate::StyleColor). It has no
//! remaining dependency on context.
//!
//! # Color Representation
//!
//! Colors are represented using normalized f32 components in the range 0.0 to 1.0,
//! with straight (not premultiplied) alpha.
//!
//! # Examples
//!
//! ```
//! use style_color::AbsoluteColor;
//!
//! let red = AbsoluteColor::from_hex("#FF0000").unwrap();
//! assert_eq!(red, AbsoluteColor::RED);
//! assert_eq!(red.to_string(), "rgb(255, 0, 0)");
//!
//! let overlay = AbsoluteColor::new(1.0, 0.0, 0.0, 0.5);
//! let blended = overlay.blend_over(AbsoluteColor::WHITE);
//! assert!(blended.is_opaque());
//! ```

use crate::error::ColorParseError;
use crate::named;
use std::fmt;

/// An sRGB color with normalized f32 components in the range 0.0 to 1.0.
#[derive(Clone, Copy, PartialEq)]
pub struct AbsoluteColor {
    /// Red component (0.0 - 1.0).
    pub r: f32,
    /// Green component (0.0 - 1.0).
    pub g: f32,
    /// Blue component (0.0 - 1.0).
    pub b: f32,
    /// Alpha component (0.0 = transparent, 1.0 = opaque).
    pub a: f32,
}

impl Default for AbsoluteColor {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Debug for AbsoluteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 1.0 {
            write!(
                f,
                "AbsoluteColor::rgb({:.3}, {:.3}, {:.3})",
                self.r, self.g, self.b
            )
        } else {
            write!(
                f,
                "AbsoluteColor::rgba({:.3}, {:.3}, {:.3}, {:.3})",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl fmt::Display for AbsoluteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_css(f)
    }
}

// ============================================================================
// Common color constants
// ============================================================================

impl AbsoluteColor {
    /// Fully transparent black, the result of resolving "no color".
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque black (#000000).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    /// Opaque white (#FFFFFF).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Opaque red (#FF0000).
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Opaque lime (#00FF00).
    pub const LIME: Self = Self::rgb(0.0, 1.0, 0.0);

    /// Opaque blue (#0000FF).
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
}

// ============================================================================
// Constructors
// ============================================================================

impl AbsoluteColor {
    /// Creates a new color from normalized RGBA components.
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new color from normalized RGBA components (alias for `rgba`).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::rgba(r, g, b, a)
    }

    /// Creates a new opaque color from normalized RGB components.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a new color from u8 RGBA components (0-255).
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        const INV_255: f32 = 1.0 / 255.0;
        Self {
            r: r as f32 * INV_255,
            g: g as f32 * INV_255,
            b: b as f32 * INV_255,
            a: a as f32 * INV_255,
        }
    }

    /// Creates a new opaque color from u8 RGB components (0-255).
    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Creates a grayscale color with the given lightness.
    #[inline]
    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }

    /// Returns the color with every component clamped to `0.0..=1.0`.
    ///
    /// NaN components become 0.
    pub fn clamped(self) -> Self {
        let clamp = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        Self {
            r: clamp(self.r),
            g: clamp(self.g),
            b: clamp(self.b),
            a: clamp(self.a),
        }
    }
}

// ============================================================================
// Hex and keyword parsing
// ============================================================================

impl AbsoluteColor {
    /// Parses a color from a hex string.
    ///
    /// Supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`. The `#` prefix is
    /// optional.
    ///
    /// # Examples
    ///
    /// ```
    /// use style_color::AbsoluteColor;
    ///
    /// let red = AbsoluteColor::from_hex("#FF0000").unwrap();
    /// let semi_blue = AbsoluteColor::from_hex("#0000FF80").unwrap();
    /// let short_white = AbsoluteColor::from_hex("fff").unwrap();
    /// assert_eq!(short_white, AbsoluteColor::WHITE);
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHexChar);
        }

        let digit = |c: u8| -> Result<u8, ColorParseError> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or(ColorParseError::InvalidHexChar)
        };
        let bytes = hex.as_bytes();

        let (r, g, b, a) = match bytes.len() {
            3 | 4 => {
                let short = |i: usize| digit(bytes[i]).map(|d| d * 17);
                let a = if bytes.len() == 4 { short(3)? } else { 255 };
                (short(0)?, short(1)?, short(2)?, a)
            }
            6 | 8 => {
                let pair = |i: usize| -> Result<u8, ColorParseError> {
                    Ok(digit(bytes[i])? * 16 + digit(bytes[i + 1])?)
                };
                let a = if bytes.len() == 8 { pair(6)? } else { 255 };
                (pair(0)?, pair(2)?, pair(4)?, a)
            }
            len => return Err(ColorParseError::InvalidLength(len)),
        };

        Ok(Self::from_rgba_u8(r, g, b, a))
    }

    /// Parses a named color, `transparent`, or a hex string.
    ///
    /// # Examples
    ///
    /// ```
    /// use style_color::AbsoluteColor;
    ///
    /// assert_eq!(AbsoluteColor::parse("Red").unwrap(), AbsoluteColor::RED);
    /// assert!(AbsoluteColor::parse("transparent").unwrap().is_transparent());
    /// assert_eq!(AbsoluteColor::parse("#00f").unwrap(), AbsoluteColor::BLUE);
    /// ```
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColorParseError::EmptyInput);
        }
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed);
        }

        let lower = trimmed.to_ascii_lowercase();
        if let Some(color) = named::lookup_absolute_keyword(&lower) {
            return Ok(color);
        }

        Self::from_hex(trimmed).map_err(|_| ColorParseError::UnknownColor(trimmed.to_string()))
    }

    /// Returns the color for a CSS named color, or `None` if not found.
    pub fn from_name(name: &str) -> Option<Self> {
        named::lookup_absolute_keyword(&name.to_ascii_lowercase())
    }
}

// ============================================================================
// Component access and formatting
// ============================================================================

impl AbsoluteColor {
    /// Returns the color components as u8 values (0-255).
    #[inline]
    pub fn to_rgba_u8(&self) -> (u8, u8, u8, u8) {
        let channel = |v: f32| {
            let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
            (v * 255.0).round() as u8
        };
        (channel(self.r), channel(self.g), channel(self.b), channel(self.a))
    }

    /// Returns the color as lowercase `#rrggbbaa`, alpha always included.
    pub fn to_hex_rgba(&self) -> String {
        let (r, g, b, a) = self.to_rgba_u8();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    /// Writes the CSSOM serialization: `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn write_css<W: fmt::Write + ?Sized>(&self, dest: &mut W) -> fmt::Result {
        let (r, g, b, a) = self.to_rgba_u8();
        if a == 255 {
            write!(dest, "rgb({}, {}, {})", r, g, b)
        } else {
            write!(dest, "rgba({}, {}, {}, {})", r, g, b, serialized_alpha(a))
        }
    }
}

/// Shortest decimal alpha that maps back to the same byte.
///
/// Two decimals are used when they round-trip, three otherwise.
fn serialized_alpha(alpha: u8) -> f32 {
    let exact = alpha as f32 / 255.0;
    let two = (exact * 100.0).round() / 100.0;
    if (two * 255.0).round() as u8 == alpha {
        two
    } else {
        (exact * 1000.0).round() / 1000.0
    }
}

// ============================================================================
// Alpha and transparency
// ============================================================================

impl AbsoluteColor {
    /// Returns whether the color is fully transparent (alpha ≈ 0).
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a < 0.001
    }

    /// Returns whether any part of the color would be painted.
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.is_transparent()
    }

    /// Returns whether the color is fully opaque (alpha ≈ 1.0).
    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a >= 0.999
    }

    /// Returns a new color with the specified alpha value.
    #[inline]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }

    /// Returns true if this color is approximately equal to another.
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

// ============================================================================
// Alpha blending
// ============================================================================

impl AbsoluteColor {
    /// Blends this color over a background color (Porter-Duff source-over).
    #[inline]
    pub fn blend_over(self, background: Self) -> Self {
        if self.a >= 1.0 {
            return self;
        }
        if self.a <= 0.0 {
            return background;
        }

        let out_a = self.a + background.a * (1.0 - self.a);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }

        Self {
            r: (self.r * self.a + background.r * background.a * (1.0 - self.a)) / out_a,
            g: (self.g * self.a + background.g * background.a * (1.0 - self.a)) / out_a,
            b: (self.b * self.a + background.b * background.a * (1.0 - self.a)) / out_a,
            a: out_a,
        }
    }

    /// Returns the WCAG 2.1 relative luminance of the color, ignoring alpha.
    pub fn relative_luminance(&self) -> f32 {
        let linear = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Returns the WCAG 2.1 contrast ratio between two colors (1.0 to 21.0).
    pub fn contrast_ratio(&self, other: &Self) -> f32 {
        let la = self.relative_luminance() + 0.05;
        let lb = other.relative_luminance() + 0.05;
        if la > lb { la / lb } else { lb / la }
    }
}

// ============================================================================
// Type conversions
// ============================================================================

impl From<(u8, u8, u8)> for AbsoluteColor {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::from_rgb_u8(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for AbsoluteColor {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::from_rgba_u8(r, g, b, a)
    }
}
