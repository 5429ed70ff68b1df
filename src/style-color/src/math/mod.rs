//! Colorimetric operations on resolved colors.
//!
//! The resolver decides *when* each computation runs; the [`ColorMath`]
//! implementation decides *what* it computes. Every method is a pure
//! function of already resolved inputs. [`StandardColorMath`] follows CSS
//! Color 4 and 5 and clamps its results to the sRGB gamut.

mod space;

use tracing::trace;

use crate::absolute::AbsoluteColor;
use crate::expression::{ContrastTarget, MixPercentages, RelativeChannels, RelativeColorSpace};
use crate::interpolation::ColorInterpolationMethod;

pub(crate) use space::ColorSpace;

/// A `color-mix()` component after its color has been resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMixComponent {
    /// The resolved color.
    pub color: AbsoluteColor,
    /// The percentage as written, if any.
    pub percentage: Option<f64>,
}

/// The colorimetric collaborator used by resolution.
pub trait ColorMath {
    /// Mixes two colors in the given interpolation space.
    fn mix(
        &self,
        method: ColorInterpolationMethod,
        first: ResolvedMixComponent,
        second: ResolvedMixComponent,
    ) -> AbsoluteColor;

    /// Composites a stack of colors, bottom first, each painted over the
    /// ones before it. An empty stack is transparent.
    fn composite_layers(&self, colors: &[AbsoluteColor]) -> AbsoluteColor;

    /// Picks the candidate that contrasts best with `against`. With no
    /// candidates, picks white or black.
    fn select_by_contrast(
        &self,
        against: AbsoluteColor,
        candidates: &[AbsoluteColor],
        target: Option<ContrastTarget>,
    ) -> AbsoluteColor;

    /// Evaluates relative color channels against a resolved origin.
    fn evaluate_relative(
        &self,
        origin: AbsoluteColor,
        space: RelativeColorSpace,
        channels: &RelativeChannels,
    ) -> AbsoluteColor;
}

/// CSS Color 4/5 color math over sRGB results.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardColorMath;

impl ColorMath for StandardColorMath {
    fn mix(
        &self,
        method: ColorInterpolationMethod,
        first: ResolvedMixComponent,
        second: ResolvedMixComponent,
    ) -> AbsoluteColor {
        let weights = MixPercentages::normalize(first.percentage, second.percentage);
        let space = ColorSpace::from(method);
        let hue_index = space.hue_index();

        let mut a = space.from_srgb(first.color);
        let mut b = space.from_srgb(second.color);

        // A missing component takes the other color's value.
        for i in 0..3 {
            match (a[i].is_nan(), b[i].is_nan()) {
                (true, false) => a[i] = b[i],
                (false, true) => b[i] = a[i],
                _ => {}
            }
        }

        if let (Some(h), Some(hue_method)) = (hue_index, method.hue_method()) {
            if !a[h].is_nan() {
                hue_method.fixup(&mut a[h], &mut b[h]);
            }
        }

        let (w1, w2) = (weights.first as f32, weights.second as f32);
        let alpha_a = first.color.a.clamp(0.0, 1.0);
        let alpha_b = second.color.a.clamp(0.0, 1.0);
        let alpha = alpha_a * w1 + alpha_b * w2;

        let mut out = [0.0_f32; 3];
        for i in 0..3 {
            out[i] = if Some(i) == hue_index {
                a[i] * w1 + b[i] * w2
            } else {
                let premultiplied = a[i] * alpha_a * w1 + b[i] * alpha_b * w2;
                if alpha > 0.0 { premultiplied / alpha } else { 0.0 }
            };
        }
        if let Some(h) = hue_index {
            out[h] = out[h].rem_euclid(360.0);
        }

        let alpha = alpha * weights.alpha_multiplier as f32;
        trace!(space = method.space_name(), ?out, alpha, "mixed colors");
        space.to_srgb(out, alpha).clamped()
    }

    fn composite_layers(&self, colors: &[AbsoluteColor]) -> AbsoluteColor {
        colors
            .iter()
            .fold(AbsoluteColor::TRANSPARENT, |below, layer| {
                layer.clamped().blend_over(below)
            })
            .clamped()
    }

    fn select_by_contrast(
        &self,
        against: AbsoluteColor,
        candidates: &[AbsoluteColor],
        target: Option<ContrastTarget>,
    ) -> AbsoluteColor {
        if let Some(target) = target {
            let minimum = target.ratio();
            if let Some(found) = candidates
                .iter()
                .find(|c| c.contrast_ratio(&against) >= minimum)
            {
                return *found;
            }
            return black_or_white(against);
        }

        let mut best: Option<(AbsoluteColor, f32)> = None;
        for candidate in candidates {
            let ratio = candidate.contrast_ratio(&against);
            if best.is_none_or(|(_, best_ratio)| ratio > best_ratio) {
                best = Some((*candidate, ratio));
            }
        }
        best.map_or_else(|| black_or_white(against), |(color, _)| color)
    }

    fn evaluate_relative(
        &self,
        origin: AbsoluteColor,
        space: RelativeColorSpace,
        channels: &RelativeChannels,
    ) -> AbsoluteColor {
        let target = ColorSpace::from(space);
        let scale = if space == RelativeColorSpace::Rgb { 255.0 } else { 1.0 };

        let [c0, c1, c2] = target.from_srgb(origin).map(|c| c * scale);
        let [e0, e1, e2, alpha] = channels.evaluate(space, [c0, c1, c2, origin.a]);

        target
            .to_srgb([e0 / scale, e1 / scale, e2 / scale], alpha)
            .clamped()
    }
}

/// White or black, whichever contrasts more with `against`. Ties pick white.
pub fn black_or_white(against: AbsoluteColor) -> AbsoluteColor {
    let white = AbsoluteColor::WHITE.contrast_ratio(&against);
    let black = AbsoluteColor::BLACK.contrast_ratio(&against);
    if white >= black {
        AbsoluteColor::WHITE
    } else {
        AbsoluteColor::BLACK
    }
}
