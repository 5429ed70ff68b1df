//! Resolution of color values and the current-color dependency query.

use smallvec::SmallVec;
use tracing::trace;

use crate::absolute::AbsoluteColor;
use crate::expression::ColorExpression;
use crate::math::{ColorMath, ResolvedMixComponent, StandardColorMath};
use crate::value::{Repr, StyleColor};

impl StyleColor {
    /// Resolves this value to an absolute color using [`StandardColorMath`].
    ///
    /// `current` is substituted for every `currentcolor` in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use style_color::{AbsoluteColor, StyleColor};
    ///
    /// assert_eq!(
    ///     StyleColor::from(AbsoluteColor::RED).resolve(AbsoluteColor::BLUE),
    ///     AbsoluteColor::RED
    /// );
    /// assert_eq!(
    ///     StyleColor::current_color().resolve(AbsoluteColor::BLUE),
    ///     AbsoluteColor::BLUE
    /// );
    /// ```
    pub fn resolve(&self, current: AbsoluteColor) -> AbsoluteColor {
        self.resolve_with(current, &StandardColorMath)
    }

    /// Resolves this value, delegating composite arithmetic to `math`.
    ///
    /// Every child is resolved with the same `current` color before the
    /// node's own computation runs. The tree is only read, so one shared
    /// tree may be resolved from several threads at once. The invalid value
    /// resolves to transparent.
    pub fn resolve_with<M>(&self, current: AbsoluteColor, math: &M) -> AbsoluteColor
    where
        M: ColorMath + ?Sized,
    {
        match &self.repr {
            Repr::Absolute(color) => *color,
            Repr::CurrentColor => current,
            Repr::Invalid => AbsoluteColor::TRANSPARENT,
            Repr::Expression(expression) => {
                trace!(kind = expression.kind_name(), "resolving color expression");
                resolve_expression(expression, current, math)
            }
        }
    }

    /// Returns true if resolving this value needs the current color.
    ///
    /// Stops at the first `currentcolor` found.
    pub fn contains_current_color(&self) -> bool {
        match &self.repr {
            Repr::Absolute(_) | Repr::Invalid => false,
            Repr::CurrentColor => true,
            Repr::Expression(expression) => expression
                .children()
                .into_iter()
                .any(StyleColor::contains_current_color),
        }
    }
}

fn resolve_expression<M>(expression: &ColorExpression, current: AbsoluteColor, math: &M) -> AbsoluteColor
where
    M: ColorMath + ?Sized,
{
    let resolve_all = |colors: &[StyleColor]| -> SmallVec<[AbsoluteColor; 4]> {
        colors.iter().map(|c| c.resolve_with(current, math)).collect()
    };

    match expression {
        ColorExpression::Mix(mix) => {
            let first = ResolvedMixComponent {
                color: mix.first().color.resolve_with(current, math),
                percentage: mix.first().percentage,
            };
            let second = ResolvedMixComponent {
                color: mix.second().color.resolve_with(current, math),
                percentage: mix.second().percentage,
            };
            math.mix(mix.method(), first, second)
        }
        ColorExpression::Layers(layers) => math.composite_layers(&resolve_all(layers.colors())),
        ColorExpression::Contrast(contrast) => {
            let against = contrast.against().resolve_with(current, math);
            let candidates = resolve_all(contrast.candidates());
            math.select_by_contrast(against, &candidates, contrast.target())
        }
        ColorExpression::Relative(relative) => {
            let origin = relative.origin().resolve_with(current, math);
            math.evaluate_relative(origin, relative.space(), relative.channels())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{
        ChannelValue, ContrastTarget, MixComponent, RelativeChannels, RelativeColorSpace,
    };
    use crate::interpolation::ColorInterpolationMethod;

    fn mix(first: StyleColor, second: StyleColor) -> StyleColor {
        StyleColor::mix(
            ColorInterpolationMethod::Srgb,
            MixComponent::new(first, None),
            MixComponent::new(second, None),
        )
        .unwrap()
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_leaves() {
            assert_eq!(
                StyleColor::from(AbsoluteColor::RED).resolve(AbsoluteColor::BLUE),
                AbsoluteColor::RED
            );
            assert_eq!(
                StyleColor::current_color().resolve(AbsoluteColor::BLUE),
                AbsoluteColor::BLUE
            );
            assert_eq!(
                StyleColor::invalid().resolve(AbsoluteColor::BLUE),
                AbsoluteColor::TRANSPARENT
            );
        }

        #[test]
        fn test_current_color_reaches_every_level() {
            let nested = mix(
                mix(StyleColor::current_color(), StyleColor::current_color()),
                StyleColor::current_color(),
            );
            let out = nested.resolve(AbsoluteColor::RED);
            assert!(out.approx_eq(&AbsoluteColor::RED, 1e-5));
        }

        #[test]
        fn test_empty_layers_transparent() {
            let empty = StyleColor::layers([]);
            assert_eq!(empty.resolve(AbsoluteColor::RED), AbsoluteColor::TRANSPARENT);
            assert_eq!(empty.resolve(AbsoluteColor::WHITE), AbsoluteColor::TRANSPARENT);
        }

        #[test]
        fn test_contrast_against_current_color() {
            let pick = StyleColor::contrast(
                StyleColor::current_color(),
                [AbsoluteColor::WHITE.into(), AbsoluteColor::BLACK.into()],
                Some(ContrastTarget::Aa),
            )
            .unwrap();
            assert_eq!(pick.resolve(AbsoluteColor::WHITE), AbsoluteColor::BLACK);
            assert_eq!(pick.resolve(AbsoluteColor::BLACK), AbsoluteColor::WHITE);
        }

        #[test]
        fn test_relative_from_current_color() {
            let relative = StyleColor::relative(
                RelativeColorSpace::Rgb,
                StyleColor::current_color(),
                RelativeChannels::identity(RelativeColorSpace::Rgb)
                    .with_alpha(ChannelValue::Number(0.25)),
            )
            .unwrap();
            let out = relative.resolve(AbsoluteColor::BLUE);
            assert!(out.approx_eq(&AbsoluteColor::BLUE.with_alpha(0.25), 1e-5));
        }
    }

    mod dependency_tests {
        use super::*;

        #[test]
        fn test_leaves() {
            assert!(!StyleColor::from(AbsoluteColor::RED).contains_current_color());
            assert!(StyleColor::current_color().contains_current_color());
            assert!(!StyleColor::invalid().contains_current_color());
        }

        #[test]
        fn test_deep_current_color() {
            let deep = StyleColor::layers([
                AbsoluteColor::RED.into(),
                mix(
                    AbsoluteColor::BLUE.into(),
                    mix(AbsoluteColor::WHITE.into(), StyleColor::current_color()),
                ),
            ]);
            assert!(deep.contains_current_color());
        }

        #[test]
        fn test_absolute_only_tree() {
            let tree = mix(
                AbsoluteColor::BLUE.into(),
                StyleColor::layers([AbsoluteColor::RED.into()]),
            );
            assert!(!tree.contains_current_color());
            assert_eq!(tree.resolve(AbsoluteColor::RED), tree.resolve(AbsoluteColor::LIME));
        }
    }
}
