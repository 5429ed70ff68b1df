//! Relative color syntax: `rgb(from <origin> r g b)` and friends.
//!
//! A relative color names a target color space, an origin color, and one
//! expression per channel. Channel expressions may refer to the origin's
//! channels, converted to the target space, by keyword.

use std::fmt;

use tracing::debug;

use crate::error::{ColorError, Result};
use crate::value::StyleColor;

/// The color space a relative color is expressed in.
///
/// The first seven use their own functional notation; the rest use
/// `color(from <origin> <space> ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeColorSpace {
    /// `rgb(from ...)`, channels 0 to 255.
    Rgb,
    /// `hsl(from ...)`
    Hsl,
    /// `hwb(from ...)`
    Hwb,
    /// `lab(from ...)`
    Lab,
    /// `lch(from ...)`
    Lch,
    /// `oklab(from ...)`
    Oklab,
    /// `oklch(from ...)`
    Oklch,
    /// `color(from ... srgb)`
    Srgb,
    /// `color(from ... srgb-linear)`
    SrgbLinear,
    /// `color(from ... display-p3)`
    DisplayP3,
    /// `color(from ... a98-rgb)`
    A98Rgb,
    /// `color(from ... prophoto-rgb)`
    ProphotoRgb,
    /// `color(from ... rec2020)`
    Rec2020,
    /// `color(from ... xyz-d50)`
    XyzD50,
    /// `color(from ... xyz-d65)`
    XyzD65,
}

impl RelativeColorSpace {
    /// Every space, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Rgb,
        Self::Hsl,
        Self::Hwb,
        Self::Lab,
        Self::Lch,
        Self::Oklab,
        Self::Oklch,
        Self::Srgb,
        Self::SrgbLinear,
        Self::DisplayP3,
        Self::A98Rgb,
        Self::ProphotoRgb,
        Self::Rec2020,
        Self::XyzD50,
        Self::XyzD65,
    ];

    /// The CSS function this space is written with.
    pub const fn function_name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hsl => "hsl",
            Self::Hwb => "hwb",
            Self::Lab => "lab",
            Self::Lch => "lch",
            Self::Oklab => "oklab",
            Self::Oklch => "oklch",
            _ => "color",
        }
    }

    /// The `<colorspace>` argument of `color()`, for spaces written with it.
    pub const fn color_space_name(self) -> Option<&'static str> {
        match self {
            Self::Srgb => Some("srgb"),
            Self::SrgbLinear => Some("srgb-linear"),
            Self::DisplayP3 => Some("display-p3"),
            Self::A98Rgb => Some("a98-rgb"),
            Self::ProphotoRgb => Some("prophoto-rgb"),
            Self::Rec2020 => Some("rec2020"),
            Self::XyzD50 => Some("xyz-d50"),
            Self::XyzD65 => Some("xyz-d65"),
            _ => None,
        }
    }

    /// Looks up a space by its functional notation name. Returns `None` for
    /// `color`, whose space is named by its first argument.
    pub fn from_function_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|space| space.color_space_name().is_none() && space.function_name() == name)
    }

    /// Looks up a `color()` space by name. `xyz` is an alias of `xyz-d65`.
    pub fn from_color_space_name(name: &str) -> Option<Self> {
        if name == "xyz" {
            return Some(Self::XyzD65);
        }
        Self::ALL
            .into_iter()
            .find(|space| space.color_space_name() == Some(name))
    }

    /// The origin channel keywords of this space, in channel order.
    pub const fn channel_keywords(self) -> [ChannelKeyword; 3] {
        use ChannelKeyword as K;
        match self {
            Self::Rgb
            | Self::Srgb
            | Self::SrgbLinear
            | Self::DisplayP3
            | Self::A98Rgb
            | Self::ProphotoRgb
            | Self::Rec2020 => [K::R, K::G, K::B],
            Self::Hsl => [K::H, K::S, K::L],
            Self::Hwb => [K::H, K::W, K::B],
            Self::Lab | Self::Oklab => [K::L, K::A, K::B],
            Self::Lch | Self::Oklch => [K::L, K::C, K::H],
            Self::XyzD50 | Self::XyzD65 => [K::X, K::Y, K::Z],
        }
    }

    /// Position of `keyword` in this space: 0 to 2 for a channel, 3 for
    /// `alpha`.
    pub fn keyword_index(self, keyword: ChannelKeyword) -> Option<usize> {
        if keyword == ChannelKeyword::Alpha {
            return Some(3);
        }
        self.channel_keywords().iter().position(|k| *k == keyword)
    }

    /// Index of the hue channel, for polar spaces.
    pub const fn hue_index(self) -> Option<usize> {
        match self {
            Self::Hsl | Self::Hwb => Some(0),
            Self::Lch | Self::Oklch => Some(2),
            _ => None,
        }
    }

    /// The value 100% maps to for channel `index`; index 3 is alpha.
    pub fn percent_reference(self, index: usize) -> f32 {
        if index >= 3 {
            return 1.0;
        }
        match (self, index) {
            (Self::Rgb, _) => 255.0,
            (Self::Hsl | Self::Hwb, _) => 100.0,
            (Self::Lab | Self::Lch, 0) => 100.0,
            (Self::Lab, _) => 125.0,
            (Self::Lch, _) => 150.0,
            (Self::Oklab | Self::Oklch, 0) => 1.0,
            (Self::Oklab | Self::Oklch, _) => 0.4,
            _ => 1.0,
        }
    }
}

impl fmt::Display for RelativeColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color_space_name() {
            Some(name) => write!(f, "color({name})"),
            None => write!(f, "{}()", self.function_name()),
        }
    }
}

/// A reference to an origin channel inside a relative color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKeyword {
    /// `r`
    R,
    /// `g`
    G,
    /// `b`, blue or blackness or the lab b axis depending on the space
    B,
    /// `h`
    H,
    /// `s`
    S,
    /// `l`
    L,
    /// `w`
    W,
    /// `a`, the lab a axis
    A,
    /// `c`
    C,
    /// `x`
    X,
    /// `y`
    Y,
    /// `z`
    Z,
    /// `alpha`
    Alpha,
}

impl ChannelKeyword {
    /// Every keyword.
    pub const ALL: [Self; 13] = [
        Self::R,
        Self::G,
        Self::B,
        Self::H,
        Self::S,
        Self::L,
        Self::W,
        Self::A,
        Self::C,
        Self::X,
        Self::Y,
        Self::Z,
        Self::Alpha,
    ];

    /// The keyword as written in CSS.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::G => "g",
            Self::B => "b",
            Self::H => "h",
            Self::S => "s",
            Self::L => "l",
            Self::W => "w",
            Self::A => "a",
            Self::C => "c",
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::Alpha => "alpha",
        }
    }

    /// Looks up a keyword by its CSS spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for ChannelKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `calc()` expression over channel values.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcNode {
    /// A plain number.
    Number(f32),
    /// A percentage of the channel's reference range.
    Percentage(f32),
    /// An origin channel.
    Keyword(ChannelKeyword),
    /// `a + b`
    Sum(Box<CalcNode>, Box<CalcNode>),
    /// `a - b`
    Difference(Box<CalcNode>, Box<CalcNode>),
    /// `a * b`
    Product(Box<CalcNode>, Box<CalcNode>),
    /// `a / b`
    Quotient(Box<CalcNode>, Box<CalcNode>),
}

impl CalcNode {
    /// Builds `a + b`.
    pub fn sum(a: CalcNode, b: CalcNode) -> Self {
        Self::Sum(Box::new(a), Box::new(b))
    }

    /// Builds `a - b`.
    pub fn difference(a: CalcNode, b: CalcNode) -> Self {
        Self::Difference(Box::new(a), Box::new(b))
    }

    /// Builds `a * b`.
    pub fn product(a: CalcNode, b: CalcNode) -> Self {
        Self::Product(Box::new(a), Box::new(b))
    }

    /// Builds `a / b`.
    pub fn quotient(a: CalcNode, b: CalcNode) -> Self {
        Self::Quotient(Box::new(a), Box::new(b))
    }

    /// Returns true for the binary operators.
    pub fn is_operation(&self) -> bool {
        !matches!(self, Self::Number(_) | Self::Percentage(_) | Self::Keyword(_))
    }

    fn evaluate(&self, reference: f32, origin: &[f32; 4], space: RelativeColorSpace) -> f32 {
        match self {
            Self::Number(n) => *n,
            Self::Percentage(p) => p / 100.0 * reference,
            Self::Keyword(k) => keyword_value(*k, origin, space),
            Self::Sum(a, b) => a.evaluate(reference, origin, space) + b.evaluate(reference, origin, space),
            Self::Difference(a, b) => {
                a.evaluate(reference, origin, space) - b.evaluate(reference, origin, space)
            }
            Self::Product(a, b) => {
                a.evaluate(reference, origin, space) * b.evaluate(reference, origin, space)
            }
            Self::Quotient(a, b) => {
                a.evaluate(reference, origin, space) / b.evaluate(reference, origin, space)
            }
        }
    }

    fn validate(&self, space: RelativeColorSpace, is_hue: bool) -> Result<()> {
        match self {
            Self::Number(n) => check_finite(*n),
            Self::Percentage(p) => {
                if is_hue {
                    return Err(ColorError::PercentageHue(space));
                }
                check_finite(*p)
            }
            Self::Keyword(k) => check_keyword(*k, space),
            Self::Sum(a, b) | Self::Difference(a, b) | Self::Product(a, b) | Self::Quotient(a, b) => {
                a.validate(space, is_hue)?;
                b.validate(space, is_hue)
            }
        }
    }
}

/// The expression for one channel of a relative color.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValue {
    /// A plain number in the channel's natural unit.
    Number(f32),
    /// A percentage of the channel's reference range.
    Percentage(f32),
    /// The `none` keyword, a missing component.
    None,
    /// An origin channel.
    Keyword(ChannelKeyword),
    /// A `calc()` expression.
    Calc(Box<CalcNode>),
}

impl ChannelValue {
    /// Wraps a calc tree.
    pub fn calc(node: CalcNode) -> Self {
        Self::Calc(Box::new(node))
    }

    fn evaluate(&self, index: usize, origin: &[f32; 4], space: RelativeColorSpace) -> f32 {
        let reference = space.percent_reference(index);
        let value = match self {
            Self::Number(n) => *n,
            Self::Percentage(p) => p / 100.0 * reference,
            Self::None => 0.0,
            Self::Keyword(k) => keyword_value(*k, origin, space),
            Self::Calc(node) => node.evaluate(reference, origin, space),
        };
        if value.is_finite() { value } else { 0.0 }
    }

    fn validate(&self, space: RelativeColorSpace, is_hue: bool) -> Result<()> {
        match self {
            Self::Number(n) => check_finite(*n),
            Self::Percentage(p) => {
                if is_hue {
                    return Err(ColorError::PercentageHue(space));
                }
                check_finite(*p)
            }
            Self::None => Ok(()),
            Self::Keyword(k) => check_keyword(*k, space),
            Self::Calc(node) => node.validate(space, is_hue),
        }
    }
}

fn keyword_value(keyword: ChannelKeyword, origin: &[f32; 4], space: RelativeColorSpace) -> f32 {
    space
        .keyword_index(keyword)
        .map_or(0.0, |index| origin[index])
}

fn check_finite(value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ColorError::NonFiniteChannel(value))
    }
}

fn check_keyword(keyword: ChannelKeyword, space: RelativeColorSpace) -> Result<()> {
    match space.keyword_index(keyword) {
        Some(_) => Ok(()),
        None => Err(ColorError::UnknownChannel { keyword, space }),
    }
}

/// The three channel expressions plus an optional alpha expression.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeChannels {
    values: [ChannelValue; 3],
    alpha: Option<ChannelValue>,
}

impl RelativeChannels {
    /// Creates channel expressions. A missing alpha keeps the origin alpha.
    pub fn new(values: [ChannelValue; 3], alpha: Option<ChannelValue>) -> Self {
        Self { values, alpha }
    }

    /// `<space>(from <origin> c0 c1 c2)` with every channel taken from the
    /// origin.
    pub fn identity(space: RelativeColorSpace) -> Self {
        Self::new(space.channel_keywords().map(ChannelValue::Keyword), None)
    }

    /// Replaces the expression of channel `index` (0 to 2).
    #[must_use]
    pub fn with_channel(mut self, index: usize, value: ChannelValue) -> Self {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
        self
    }

    /// Sets the alpha expression.
    #[must_use]
    pub fn with_alpha(mut self, alpha: ChannelValue) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// The three channel expressions.
    #[inline]
    pub fn values(&self) -> &[ChannelValue; 3] {
        &self.values
    }

    /// The alpha expression, if one was written.
    #[inline]
    pub fn alpha(&self) -> Option<&ChannelValue> {
        self.alpha.as_ref()
    }

    /// Evaluates every channel against the origin's components in `space`.
    ///
    /// `origin` holds the three channels followed by alpha. `none`, and any
    /// arithmetic producing a non-finite value, evaluates to 0.
    pub fn evaluate(&self, space: RelativeColorSpace, origin: [f32; 4]) -> [f32; 4] {
        let [c0, c1, c2] = &self.values;
        let alpha = self
            .alpha
            .as_ref()
            .map_or(origin[3], |alpha| alpha.evaluate(3, &origin, space));
        [
            c0.evaluate(0, &origin, space),
            c1.evaluate(1, &origin, space),
            c2.evaluate(2, &origin, space),
            alpha,
        ]
    }

    fn validate(&self, space: RelativeColorSpace) -> Result<()> {
        let hue = space.hue_index();
        for (index, value) in self.values.iter().enumerate() {
            value.validate(space, hue == Some(index))?;
        }
        if let Some(alpha) = &self.alpha {
            alpha.validate(space, false)?;
        }
        Ok(())
    }
}

/// A color derived from an origin color channel by channel.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeColor {
    space: RelativeColorSpace,
    origin: StyleColor,
    channels: RelativeChannels,
}

impl RelativeColor {
    /// Creates a relative color.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::NonFiniteChannel`] for NaN or infinite
    /// literals, [`ColorError::UnknownChannel`] for keywords the space does
    /// not define, and [`ColorError::PercentageHue`] for a percentage in a
    /// hue channel.
    pub fn new(
        space: RelativeColorSpace,
        origin: StyleColor,
        channels: RelativeChannels,
    ) -> Result<Self> {
        if let Err(error) = channels.validate(space) {
            debug!(%error, "rejecting relative color");
            return Err(error);
        }
        Ok(Self {
            space,
            origin,
            channels,
        })
    }

    /// The target color space.
    #[inline]
    pub fn space(&self) -> RelativeColorSpace {
        self.space
    }

    /// The origin color.
    #[inline]
    pub fn origin(&self) -> &StyleColor {
        &self.origin
    }

    /// The channel expressions.
    #[inline]
    pub fn channels(&self) -> &RelativeChannels {
        &self.channels
    }
}
