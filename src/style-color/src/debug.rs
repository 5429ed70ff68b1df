//! Diagnostic dumps of color values.
//!
//! The debug form brackets every value as `StyleColor[...]` and spells
//! absolute colors as `#rrggbbaa`, so nested trees stay readable in logs.
//! It mirrors the CSS serializer's recursion but is not meant to be parsed.

use std::fmt;

use crate::expression::{ColorExpression, ContrastColor, RelativeColor};
use crate::value::{Repr, StyleColor};

/// Types with a bracketed diagnostic dump.
pub trait DebugDescription {
    /// Writes the debug dump of `self` to `dest`.
    fn write_debug_description<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized;

    /// Returns the debug dump of `self`.
    fn debug_description(&self) -> String {
        let mut out = String::new();
        let _ = self.write_debug_description(&mut out);
        out
    }
}

impl DebugDescription for StyleColor {
    fn write_debug_description<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        dest.write_str("StyleColor[")?;
        match &self.repr {
            Repr::Absolute(color) => write!(dest, "absoluteColor({})", color.to_hex_rgba())?,
            Repr::CurrentColor => dest.write_str("currentcolor")?,
            Repr::Invalid => dest.write_str("invalid")?,
            Repr::Expression(expression) => expression.write_debug_description(dest)?,
        }
        dest.write_char(']')
    }
}

impl fmt::Debug for StyleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_debug_description(f)
    }
}

fn write_list<W>(dest: &mut W, colors: &[StyleColor]) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    for (i, color) in colors.iter().enumerate() {
        if i > 0 {
            dest.write_str(", ")?;
        }
        color.write_debug_description(dest)?;
    }
    Ok(())
}

impl DebugDescription for ColorExpression {
    fn write_debug_description<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        match self {
            Self::Mix(mix) => {
                write!(dest, "color-mix(in {}", mix.method().space_name())?;
                if let Some(hue) = mix.method().hue_method() {
                    write!(dest, " {hue} hue")?;
                }
                for component in [mix.first(), mix.second()] {
                    dest.write_str(", ")?;
                    component.color.write_debug_description(dest)?;
                    if let Some(percentage) = component.percentage {
                        write!(dest, " {percentage}%")?;
                    }
                }
                dest.write_char(')')
            }
            Self::Layers(layers) => {
                dest.write_str("color-layers(")?;
                write_list(dest, layers.colors())?;
                dest.write_char(')')
            }
            Self::Contrast(contrast) => write_contrast(dest, contrast),
            Self::Relative(relative) => write_relative(dest, relative),
        }
    }
}

fn write_contrast<W>(dest: &mut W, contrast: &ContrastColor) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    if contrast.candidates().is_empty() {
        dest.write_str("contrast-color(")?;
        contrast.against().write_debug_description(dest)?;
        return dest.write_char(')');
    }
    dest.write_str("color-contrast(")?;
    contrast.against().write_debug_description(dest)?;
    dest.write_str(" vs ")?;
    write_list(dest, contrast.candidates())?;
    if let Some(target) = contrast.target() {
        write!(dest, " to {target}")?;
    }
    dest.write_char(')')
}

fn write_relative<W>(dest: &mut W, relative: &RelativeColor) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    use crate::css::ToCss;

    write!(dest, "relative-color({} from ", relative.space())?;
    relative.origin().write_debug_description(dest)?;
    for value in relative.channels().values() {
        dest.write_char(' ')?;
        value.to_css(dest)?;
    }
    if let Some(alpha) = relative.channels().alpha() {
        dest.write_str(" / ")?;
        alpha.to_css(dest)?;
    }
    dest.write_char(')')
}
