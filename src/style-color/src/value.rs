//! The [`StyleColor`] value type.
//!
//! A `StyleColor` is what every style property stores. The two common cases,
//! an absolute color and the `currentcolor` keyword, live inline. Composite
//! expressions live in an immutable [`ColorExpression`] node behind an
//! [`Arc`], so cloning a value shares the node instead of copying the tree.
//!
//! # Examples
//!
//! ```
//! use style_color::{AbsoluteColor, ColorInterpolationMethod, MixComponent, StyleColor};
//!
//! let mix = StyleColor::mix(
//!     ColorInterpolationMethod::Srgb,
//!     MixComponent::new(StyleColor::current_color(), Some(30.0)),
//!     MixComponent::new(AbsoluteColor::WHITE.into(), Some(70.0)),
//! )
//! .unwrap();
//!
//! assert!(mix.is_color_mix());
//! assert!(mix.contains_current_color());
//!
//! let shared = mix.clone();
//! assert!(shared.shares_expression_with(&mix));
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::absolute::AbsoluteColor;
use crate::error::Result;
use crate::expression::{
    ColorExpression, ColorLayers, ColorMix, ContrastColor, ContrastTarget, MixComponent,
    RelativeChannels, RelativeColor, RelativeColorSpace,
};
use crate::interpolation::ColorInterpolationMethod;

/// Fallback node handed out by [`StyleColor::expression`] on misuse.
static EMPTY_EXPRESSION: Lazy<ColorExpression> =
    Lazy::new(|| ColorExpression::Layers(ColorLayers::empty()));

/// Storage for a [`StyleColor`].
#[derive(Clone)]
pub(crate) enum Repr {
    /// A resolved color.
    Absolute(AbsoluteColor),
    /// The `currentcolor` keyword.
    CurrentColor,
    /// A shared composite expression.
    Expression(Arc<ColorExpression>),
    /// No value. Left behind by [`StyleColor::take`].
    Invalid,
}

/// A CSS `<color>` value as stored in computed style.
///
/// Exactly one of the following is held at a time:
/// - an [`AbsoluteColor`], stored inline;
/// - the `currentcolor` keyword, stored inline;
/// - a shared [`ColorExpression`] node (`color-mix()`, layers, contrast or a
///   relative color);
/// - the invalid marker, used for "no color" in optional slots.
///
/// Cloning an expression value bumps the node's atomic reference count; the
/// node is freed when the last value referencing it is dropped.
#[derive(Clone)]
pub struct StyleColor {
    pub(crate) repr: Repr,
}

impl Default for StyleColor {
    /// `currentcolor`, the initial value of most color properties.
    fn default() -> Self {
        Self::current_color()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl StyleColor {
    /// Creates a value holding an absolute color.
    #[inline]
    pub const fn absolute(color: AbsoluteColor) -> Self {
        Self {
            repr: Repr::Absolute(color),
        }
    }

    /// Creates the `currentcolor` keyword.
    #[inline]
    pub const fn current_color() -> Self {
        Self {
            repr: Repr::CurrentColor,
        }
    }

    /// Creates the invalid marker.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            repr: Repr::Invalid,
        }
    }

    /// Wraps an expression in a new shared node.
    ///
    /// This is the only allocation made when building a composite value; the
    /// children were allocated when they were built.
    pub fn from_expression(expression: ColorExpression) -> Self {
        Self {
            repr: Repr::Expression(Arc::new(expression)),
        }
    }

    /// Builds a `color-mix()` value.
    pub fn mix(
        method: ColorInterpolationMethod,
        first: MixComponent,
        second: MixComponent,
    ) -> Result<Self> {
        ColorMix::new(method, first, second).map(Self::from)
    }

    /// Builds a layered color. An empty stack is allowed and resolves to
    /// transparent.
    pub fn layers<I>(colors: I) -> Self
    where
        I: IntoIterator<Item = StyleColor>,
    {
        Self::from(ColorLayers::new(colors))
    }

    /// Builds a contrast pick of `candidates` against `against`.
    ///
    /// With no candidates this is `contrast-color()`, which picks black or
    /// white.
    pub fn contrast<I>(against: StyleColor, candidates: I, target: Option<ContrastTarget>) -> Result<Self>
    where
        I: IntoIterator<Item = StyleColor>,
    {
        ContrastColor::new(against, candidates, target).map(Self::from)
    }

    /// Builds a relative color in `space` derived from `origin`.
    pub fn relative(
        space: RelativeColorSpace,
        origin: StyleColor,
        channels: RelativeChannels,
    ) -> Result<Self> {
        RelativeColor::new(space, origin, channels).map(Self::from)
    }

    /// Moves the value out, leaving the invalid marker behind.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::invalid())
    }
}

// ============================================================================
// Kind queries and accessors
// ============================================================================

impl StyleColor {
    /// Returns true if this holds an absolute color.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        matches!(self.repr, Repr::Absolute(_))
    }

    /// Returns true if this is the `currentcolor` keyword itself.
    ///
    /// An expression that merely contains `currentcolor` returns false; see
    /// [`StyleColor::contains_current_color`].
    #[inline]
    pub fn is_current_color(&self) -> bool {
        matches!(self.repr, Repr::CurrentColor)
    }

    /// Returns true if this holds a composite expression.
    #[inline]
    pub fn is_expression(&self) -> bool {
        matches!(self.repr, Repr::Expression(_))
    }

    /// Returns false only for the invalid marker.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !matches!(self.repr, Repr::Invalid)
    }

    /// Returns true if this is a `color-mix()`.
    pub fn is_color_mix(&self) -> bool {
        matches!(self.as_expression().map(|e| &**e), Some(ColorExpression::Mix(_)))
    }

    /// Returns true if this is a layered color.
    pub fn is_color_layers(&self) -> bool {
        matches!(self.as_expression().map(|e| &**e), Some(ColorExpression::Layers(_)))
    }

    /// Returns true if this is a contrast pick.
    pub fn is_contrast_color(&self) -> bool {
        matches!(self.as_expression().map(|e| &**e), Some(ColorExpression::Contrast(_)))
    }

    /// Returns true if this is a relative color.
    pub fn is_relative_color(&self) -> bool {
        matches!(self.as_expression().map(|e| &**e), Some(ColorExpression::Relative(_)))
    }

    /// Returns the absolute color, if that is what this holds.
    #[inline]
    pub fn as_absolute(&self) -> Option<&AbsoluteColor> {
        match &self.repr {
            Repr::Absolute(color) => Some(color),
            _ => None,
        }
    }

    /// Returns the shared expression node, if that is what this holds.
    #[inline]
    pub fn as_expression(&self) -> Option<&Arc<ColorExpression>> {
        match &self.repr {
            Repr::Expression(expression) => Some(expression),
            _ => None,
        }
    }

    /// Returns the absolute color.
    ///
    /// Calling this on any other kind is a bug: it asserts in debug builds
    /// and returns transparent in release builds.
    pub fn absolute_color(&self) -> &AbsoluteColor {
        debug_assert!(self.is_absolute(), "absolute_color() on {:?}", self);
        self.as_absolute().unwrap_or(&AbsoluteColor::TRANSPARENT)
    }

    /// Returns the expression node.
    ///
    /// Calling this on any other kind is a bug: it asserts in debug builds
    /// and returns an empty layer stack in release builds.
    pub fn expression(&self) -> &ColorExpression {
        debug_assert!(self.is_expression(), "expression() on {:?}", self);
        match &self.repr {
            Repr::Expression(expression) => &**expression,
            _ => &*EMPTY_EXPRESSION,
        }
    }

    /// Returns true if both values point at the same expression node.
    pub fn shares_expression_with(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Expression(a), Repr::Expression(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns the number of values sharing this value's expression node.
    pub fn expression_ref_count(&self) -> Option<usize> {
        self.as_expression().map(Arc::strong_count)
    }
}

// ============================================================================
// Equality
// ============================================================================

impl PartialEq for StyleColor {
    fn eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Absolute(a), Repr::Absolute(b)) => a == b,
            (Repr::CurrentColor, Repr::CurrentColor) | (Repr::Invalid, Repr::Invalid) => true,
            (Repr::Expression(a), Repr::Expression(b)) => Arc::ptr_eq(a, b) || **a == **b,
            _ => false,
        }
    }
}

// ============================================================================
// Type conversions
// ============================================================================

impl From<AbsoluteColor> for StyleColor {
    fn from(color: AbsoluteColor) -> Self {
        Self::absolute(color)
    }
}

impl From<ColorExpression> for StyleColor {
    fn from(expression: ColorExpression) -> Self {
        Self::from_expression(expression)
    }
}

impl From<ColorMix> for StyleColor {
    fn from(mix: ColorMix) -> Self {
        Self::from_expression(ColorExpression::Mix(mix))
    }
}

impl From<ColorLayers> for StyleColor {
    fn from(layers: ColorLayers) -> Self {
        Self::from_expression(ColorExpression::Layers(layers))
    }
}

impl From<ContrastColor> for StyleColor {
    fn from(contrast: ContrastColor) -> Self {
        Self::from_expression(ColorExpression::Contrast(contrast))
    }
}

impl From<RelativeColor> for StyleColor {
    fn from(relative: RelativeColor) -> Self {
        Self::from_expression(ColorExpression::Relative(relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ChannelValue;

    fn sample_mix() -> StyleColor {
        StyleColor::mix(
            ColorInterpolationMethod::Oklab,
            MixComponent::new(StyleColor::current_color(), Some(30.0)),
            MixComponent::new(AbsoluteColor::WHITE.into(), Some(70.0)),
        )
        .unwrap()
    }

    mod kind_tests {
        use super::*;

        #[test]
        fn test_exactly_one_kind() {
            let values = [
                StyleColor::absolute(AbsoluteColor::RED),
                StyleColor::current_color(),
                sample_mix(),
                StyleColor::invalid(),
            ];
            for value in &values {
                let kinds = [
                    value.is_absolute(),
                    value.is_current_color(),
                    value.is_expression(),
                    !value.is_valid(),
                ];
                assert_eq!(kinds.iter().filter(|k| **k).count(), 1, "{:?}", value);
            }
        }

        #[test]
        fn test_expression_kind_queries() {
            let mix = sample_mix();
            assert!(mix.is_color_mix());
            assert!(!mix.is_color_layers());

            let layers = StyleColor::layers([]);
            assert!(layers.is_color_layers());

            let contrast = StyleColor::contrast(AbsoluteColor::WHITE.into(), [], None).unwrap();
            assert!(contrast.is_contrast_color());

            let relative = StyleColor::relative(
                RelativeColorSpace::Rgb,
                AbsoluteColor::RED.into(),
                RelativeChannels::identity(RelativeColorSpace::Rgb),
            )
            .unwrap();
            assert!(relative.is_relative_color());
            assert!(!StyleColor::current_color().is_color_mix());
        }

        #[test]
        fn test_default_is_current_color() {
            assert!(StyleColor::default().is_current_color());
        }

        #[test]
        fn test_checked_accessors() {
            let red = StyleColor::from(AbsoluteColor::RED);
            assert_eq!(red.as_absolute(), Some(&AbsoluteColor::RED));
            assert_eq!(red.absolute_color(), &AbsoluteColor::RED);
            assert!(red.as_expression().is_none());
            assert!(StyleColor::current_color().as_absolute().is_none());
        }

        #[test]
        #[cfg(debug_assertions)]
        #[should_panic(expected = "absolute_color()")]
        fn test_wrong_kind_accessor_asserts() {
            let _ = StyleColor::current_color().absolute_color();
        }
    }

    mod ownership_tests {
        use super::*;

        #[test]
        fn test_clone_shares_node() {
            let a = sample_mix();
            assert_eq!(a.expression_ref_count(), Some(1));
            let b = a.clone();
            assert!(a.shares_expression_with(&b));
            assert_eq!(a.expression_ref_count(), Some(2));
            drop(b);
            assert_eq!(a.expression_ref_count(), Some(1));
        }

        #[test]
        fn test_take_leaves_invalid() {
            let mut a = sample_mix();
            let moved = a.take();
            assert!(!a.is_valid());
            assert!(!a.is_current_color());
            assert!(!a.is_absolute());
            assert_eq!(moved.expression_ref_count(), Some(1));
        }

        #[test]
        fn test_child_shared_between_parents() {
            let child = sample_mix();
            let parent = StyleColor::layers([child.clone(), child.clone()]);
            assert_eq!(child.expression_ref_count(), Some(3));
            drop(parent);
            assert_eq!(child.expression_ref_count(), Some(1));
        }
    }

    mod equality_tests {
        use super::*;

        #[test]
        fn test_like_kinds() {
            assert_eq!(StyleColor::current_color(), StyleColor::current_color());
            assert_eq!(StyleColor::invalid(), StyleColor::invalid());
            assert_eq!(
                StyleColor::from(AbsoluteColor::RED),
                StyleColor::from(AbsoluteColor::RED)
            );
            assert_ne!(
                StyleColor::from(AbsoluteColor::RED),
                StyleColor::from(AbsoluteColor::BLUE)
            );
        }

        #[test]
        fn test_cross_kind_unequal() {
            assert_ne!(StyleColor::current_color(), StyleColor::invalid());
            assert_ne!(
                StyleColor::current_color(),
                StyleColor::from(AbsoluteColor::BLACK)
            );
            assert_ne!(sample_mix(), StyleColor::current_color());
        }

        #[test]
        fn test_structural_equality() {
            let a = sample_mix();
            let b = sample_mix();
            assert!(!a.shares_expression_with(&b));
            assert_eq!(a, b);
        }

        #[test]
        fn test_component_order_matters() {
            let a = sample_mix();
            let swapped = StyleColor::mix(
                ColorInterpolationMethod::Oklab,
                MixComponent::new(AbsoluteColor::WHITE.into(), Some(70.0)),
                MixComponent::new(StyleColor::current_color(), Some(30.0)),
            )
            .unwrap();
            assert_ne!(a, swapped);
        }

        #[test]
        fn test_relative_channels_compared() {
            let origin = StyleColor::from(AbsoluteColor::RED);
            let identity = StyleColor::relative(
                RelativeColorSpace::Rgb,
                origin.clone(),
                RelativeChannels::identity(RelativeColorSpace::Rgb),
            )
            .unwrap();
            let zero_blue = StyleColor::relative(
                RelativeColorSpace::Rgb,
                origin,
                RelativeChannels::identity(RelativeColorSpace::Rgb)
                    .with_channel(2, ChannelValue::Number(0.0)),
            )
            .unwrap();
            assert_ne!(identity, zero_blue);
        }
    }
}
