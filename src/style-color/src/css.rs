//! Canonical CSS serialization.
//!
//! Every value serializes to CSS Color 4/5 syntax that reparses to an equal
//! value. Absolute colors use the CSSOM legacy `rgb()`/`rgba()` form.

use std::fmt;

use crate::absolute::AbsoluteColor;
use crate::expression::{
    CalcNode, ChannelValue, ColorExpression, ColorLayers, ColorMix, ContrastColor, MixComponent,
    RelativeColor,
};
use crate::interpolation::{ColorInterpolationMethod, HueInterpolationMethod};
use crate::value::{Repr, StyleColor};

/// Types that serialize to CSS text.
pub trait ToCss {
    /// Writes the CSS form of `self` to `dest`.
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized;

    /// Returns the CSS form of `self` as a string.
    fn to_css_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.to_css(&mut out);
        out
    }
}

/// Writes a number in its shortest round-tripping form, without a negative
/// zero.
pub(crate) fn write_number<W>(dest: &mut W, value: f32) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    if value == 0.0 {
        dest.write_char('0')
    } else {
        write!(dest, "{value}")
    }
}

fn write_percentage<W>(dest: &mut W, value: f64) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    if value == 0.0 {
        dest.write_str("0%")
    } else {
        write!(dest, "{value}%")
    }
}

impl ToCss for AbsoluteColor {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        self.write_css(dest)
    }
}

impl ToCss for StyleColor {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        match &self.repr {
            Repr::Absolute(color) => color.to_css(dest),
            Repr::CurrentColor => dest.write_str("currentcolor"),
            Repr::Expression(expression) => expression.to_css(dest),
            Repr::Invalid => Ok(()),
        }
    }
}

impl StyleColor {
    /// The canonical CSS text of this value. The invalid value serializes
    /// to an empty string.
    pub fn to_css_string(&self) -> String {
        ToCss::to_css_string(self)
    }
}

impl fmt::Display for StyleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_css(f)
    }
}

impl ToCss for ColorExpression {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        match self {
            Self::Mix(mix) => mix.to_css(dest),
            Self::Layers(layers) => layers.to_css(dest),
            Self::Contrast(contrast) => contrast.to_css(dest),
            Self::Relative(relative) => relative.to_css(dest),
        }
    }
}

impl ToCss for ColorInterpolationMethod {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        dest.write_str(self.space_name())?;
        match self.hue_method() {
            Some(HueInterpolationMethod::Shorter) | None => Ok(()),
            Some(hue) => write!(dest, " {hue} hue"),
        }
    }
}

impl ToCss for MixComponent {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        self.color.to_css(dest)?;
        if let Some(percentage) = self.percentage {
            dest.write_char(' ')?;
            write_percentage(dest, percentage)?;
        }
        Ok(())
    }
}

impl ToCss for ColorMix {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        dest.write_str("color-mix(in ")?;
        self.method().to_css(dest)?;
        dest.write_str(", ")?;
        self.first().to_css(dest)?;
        dest.write_str(", ")?;
        self.second().to_css(dest)?;
        dest.write_char(')')
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
        color.to_css(dest)?;
    }
    Ok(())
}

impl ToCss for ColorLayers {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        dest.write_str("color-layers(")?;
        write_list(dest, self.colors())?;
        dest.write_char(')')
    }
}

impl ToCss for ContrastColor {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        if self.candidates().is_empty() {
            dest.write_str("contrast-color(")?;
            self.against().to_css(dest)?;
            return dest.write_char(')');
        }
        dest.write_str("color-contrast(")?;
        self.against().to_css(dest)?;
        dest.write_str(" vs ")?;
        write_list(dest, self.candidates())?;
        if let Some(target) = self.target() {
            write!(dest, " to {target}")?;
        }
        dest.write_char(')')
    }
}

impl ToCss for CalcNode {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        let (a, op, b) = match self {
            Self::Number(n) => return write_number(dest, *n),
            Self::Percentage(p) => {
                write_number(dest, *p)?;
                return dest.write_char('%');
            }
            Self::Keyword(k) => return dest.write_str(k.as_str()),
            Self::Sum(a, b) => (a, " + ", b),
            Self::Difference(a, b) => (a, " - ", b),
            Self::Product(a, b) => (a, " * ", b),
            Self::Quotient(a, b) => (a, " / ", b),
        };
        write_operand(dest, a)?;
        dest.write_str(op)?;
        write_operand(dest, b)
    }
}

fn write_operand<W>(dest: &mut W, node: &CalcNode) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    if node.is_operation() {
        dest.write_char('(')?;
        node.to_css(dest)?;
        dest.write_char(')')
    } else {
        node.to_css(dest)
    }
}

impl ToCss for ChannelValue {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        match self {
            Self::Number(n) => write_number(dest, *n),
            Self::Percentage(p) => {
                write_number(dest, *p)?;
                dest.write_char('%')
            }
            Self::None => dest.write_str("none"),
            Self::Keyword(k) => dest.write_str(k.as_str()),
            Self::Calc(node) => {
                dest.write_str("calc(")?;
                node.to_css(dest)?;
                dest.write_char(')')
            }
        }
    }
}

impl ToCss for RelativeColor {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write + ?Sized,
    {
        let space = self.space();
        write!(dest, "{}(from ", space.function_name())?;
        self.origin().to_css(dest)?;
        if let Some(name) = space.color_space_name() {
            write!(dest, " {name}")?;
        }
        for value in self.channels().values() {
            dest.write_char(' ')?;
            value.to_css(dest)?;
        }
        if let Some(alpha) = self.channels().alpha() {
            dest.write_str(" / ")?;
            alpha.to_css(dest)?;
        }
        dest.write_char(')')
    }
}
