//! `color-mix()` expressions.

use tracing::debug;

use crate::error::{ColorError, Result};
use crate::interpolation::ColorInterpolationMethod;
use crate::value::StyleColor;

/// One side of a `color-mix()`: a color and its optional percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct MixComponent {
    /// The color being mixed.
    pub color: StyleColor,
    /// The percentage in `0..=100`, if one was written.
    pub percentage: Option<f64>,
}

impl MixComponent {
    /// Creates a component.
    pub fn new(color: StyleColor, percentage: Option<f64>) -> Self {
        Self { color, percentage }
    }

    /// Creates a component without a percentage.
    pub fn without_percentage(color: StyleColor) -> Self {
        Self::new(color, None)
    }
}

/// A `color-mix(in <method>, <c1> [<p1>%], <c2> [<p2>%])` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMix {
    method: ColorInterpolationMethod,
    first: MixComponent,
    second: MixComponent,
}

impl ColorMix {
    /// Creates a mix of two components.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidPercentage`] if a percentage is not a
    /// finite number in `0..=100`, and [`ColorError::PercentagesSumToZero`]
    /// if both percentages are given and add up to zero.
    pub fn new(
        method: ColorInterpolationMethod,
        first: MixComponent,
        second: MixComponent,
    ) -> Result<Self> {
        for percentage in [first.percentage, second.percentage].into_iter().flatten() {
            if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
                debug!(percentage, "rejecting color-mix() component");
                return Err(ColorError::InvalidPercentage(percentage));
            }
        }
        if let (Some(p1), Some(p2)) = (first.percentage, second.percentage) {
            if p1 + p2 == 0.0 {
                debug!("rejecting color-mix() with zero total percentage");
                return Err(ColorError::PercentagesSumToZero);
            }
        }
        Ok(Self {
            method,
            first,
            second,
        })
    }

    /// Creates a mix from a component list, which must hold exactly two
    /// components.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::WrongComponentCount`] for any other count, and
    /// the errors of [`ColorMix::new`].
    pub fn from_components<I>(method: ColorInterpolationMethod, components: I) -> Result<Self>
    where
        I: IntoIterator<Item = MixComponent>,
    {
        let mut components = components.into_iter();
        match (components.next(), components.next()) {
            (Some(first), Some(second)) => {
                let extra = components.count();
                if extra > 0 {
                    return Err(ColorError::WrongComponentCount(2 + extra));
                }
                Self::new(method, first, second)
            }
            (Some(_), None) => Err(ColorError::WrongComponentCount(1)),
            _ => Err(ColorError::WrongComponentCount(0)),
        }
    }

    /// The interpolation method.
    #[inline]
    pub fn method(&self) -> ColorInterpolationMethod {
        self.method
    }

    /// The first component.
    #[inline]
    pub fn first(&self) -> &MixComponent {
        &self.first
    }

    /// The second component.
    #[inline]
    pub fn second(&self) -> &MixComponent {
        &self.second
    }

    /// The normalized weights of this mix.
    pub fn percentages(&self) -> MixPercentages {
        MixPercentages::normalize(self.first.percentage, self.second.percentage)
    }
}

/// Normalized `color-mix()` weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixPercentages {
    /// Weight of the first color, in `0.0..=1.0`.
    pub first: f64,
    /// Weight of the second color, `1.0 - first`.
    pub second: f64,
    /// Factor applied to the mixed alpha when the written percentages sum
    /// to less than 100%.
    pub alpha_multiplier: f64,
}

impl MixPercentages {
    /// Normalizes written percentages following CSS Color 5.
    ///
    /// Both omitted means 50/50. One omitted means the complement of the
    /// other. A sum above 100% is scaled down; a sum below 100% is scaled up
    /// and the shortfall becomes an alpha multiplier. A zero sum yields
    /// 50/50 with a zero multiplier.
    pub fn normalize(p1: Option<f64>, p2: Option<f64>) -> Self {
        let (p1, p2) = match (p1, p2) {
            (None, None) => (50.0, 50.0),
            (Some(p1), None) => (p1, 100.0 - p1),
            (None, Some(p2)) => (100.0 - p2, p2),
            (Some(p1), Some(p2)) => (p1, p2),
        };
        let sum = p1 + p2;
        if sum <= 0.0 {
            return Self {
                first: 0.5,
                second: 0.5,
                alpha_multiplier: 0.0,
            };
        }
        Self {
            first: p1 / sum,
            second: p2 / sum,
            alpha_multiplier: if sum < 100.0 { sum / 100.0 } else { 1.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absolute::AbsoluteColor;

    fn component(percentage: Option<f64>) -> MixComponent {
        MixComponent::new(AbsoluteColor::RED.into(), percentage)
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_accepts_valid_percentages() {
            let method = ColorInterpolationMethod::Srgb;
            assert!(ColorMix::new(method, component(None), component(None)).is_ok());
            assert!(ColorMix::new(method, component(Some(0.0)), component(None)).is_ok());
            assert!(ColorMix::new(method, component(Some(100.0)), component(Some(100.0))).is_ok());
        }

        #[test]
        fn test_rejects_out_of_range_percentages() {
            let method = ColorInterpolationMethod::Srgb;
            assert_eq!(
                ColorMix::new(method, component(Some(-1.0)), component(None)),
                Err(ColorError::InvalidPercentage(-1.0))
            );
            assert_eq!(
                ColorMix::new(method, component(None), component(Some(100.5))),
                Err(ColorError::InvalidPercentage(100.5))
            );
            assert!(matches!(
                ColorMix::new(method, component(Some(f64::NAN)), component(None)),
                Err(ColorError::InvalidPercentage(_))
            ));
        }

        #[test]
        fn test_rejects_zero_sum() {
            assert_eq!(
                ColorMix::new(
                    ColorInterpolationMethod::Srgb,
                    component(Some(0.0)),
                    component(Some(0.0))
                ),
                Err(ColorError::PercentagesSumToZero)
            );
        }

        #[test]
        fn test_component_count() {
            let method = ColorInterpolationMethod::Lab;
            assert_eq!(
                ColorMix::from_components(method, [component(None)]),
                Err(ColorError::WrongComponentCount(1))
            );
            assert_eq!(
                ColorMix::from_components(method, Vec::new()),
                Err(ColorError::WrongComponentCount(0))
            );
            assert_eq!(
                ColorMix::from_components(method, [component(None), component(None), component(None)]),
                Err(ColorError::WrongComponentCount(3))
            );
            assert!(ColorMix::from_components(method, [component(None), component(None)]).is_ok());
        }
    }

    mod normalize_tests {
        use super::*;

        #[test]
        fn test_both_omitted() {
            let p = MixPercentages::normalize(None, None);
            assert_eq!((p.first, p.second, p.alpha_multiplier), (0.5, 0.5, 1.0));
        }

        #[test]
        fn test_one_omitted() {
            let p = MixPercentages::normalize(Some(30.0), None);
            assert!((p.first - 0.3).abs() < 1e-12);
            assert!((p.second - 0.7).abs() < 1e-12);
            assert_eq!(p.alpha_multiplier, 1.0);
        }

        #[test]
        fn test_sum_above_hundred_scales_down() {
            let p = MixPercentages::normalize(Some(75.0), Some(75.0));
            assert_eq!((p.first, p.second, p.alpha_multiplier), (0.5, 0.5, 1.0));
        }

        #[test]
        fn test_sum_below_hundred_reduces_alpha() {
            let p = MixPercentages::normalize(Some(20.0), Some(20.0));
            assert_eq!((p.first, p.second), (0.5, 0.5));
            assert!((p.alpha_multiplier - 0.4).abs() < 1e-12);
        }
    }
}
