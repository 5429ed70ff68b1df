//! Contrast-based color selection.

use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::error::{ColorError, Result};
use crate::value::StyleColor;

/// The contrast a `color-contrast()` pick should reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContrastTarget {
    /// WCAG AA for normal text, 4.5:1.
    Aa,
    /// WCAG AA for large text, 3:1.
    AaLarge,
    /// WCAG AAA for normal text, 7:1.
    Aaa,
    /// WCAG AAA for large text, 4.5:1.
    AaaLarge,
    /// An explicit ratio.
    Ratio(f32),
}

impl ContrastTarget {
    /// The minimum contrast ratio this target asks for.
    pub fn ratio(self) -> f32 {
        match self {
            Self::Aa | Self::AaaLarge => 4.5,
            Self::AaLarge => 3.0,
            Self::Aaa => 7.0,
            Self::Ratio(ratio) => ratio,
        }
    }
}

impl fmt::Display for ContrastTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aa => f.write_str("AA"),
            Self::AaLarge => f.write_str("AA-large"),
            Self::Aaa => f.write_str("AAA"),
            Self::AaaLarge => f.write_str("AAA-large"),
            Self::Ratio(ratio) => crate::css::write_number(f, *ratio),
        }
    }
}

/// Picks the candidate that contrasts best with a background.
///
/// Without candidates this is `contrast-color(<against>)`, which picks
/// white or black. With candidates it is
/// `color-contrast(<against> vs <c1>, <c2>, ... [to <target>])`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastColor {
    against: StyleColor,
    candidates: SmallVec<[StyleColor; 4]>,
    target: Option<ContrastTarget>,
}

impl ContrastColor {
    /// Creates a contrast pick.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::ContrastCandidateCount`] for exactly one
    /// candidate, [`ColorError::TargetWithoutCandidates`] for a target with
    /// no candidates, and [`ColorError::InvalidContrastTarget`] for a ratio
    /// that is not a finite number of at least 1.
    pub fn new<I>(against: StyleColor, candidates: I, target: Option<ContrastTarget>) -> Result<Self>
    where
        I: IntoIterator<Item = StyleColor>,
    {
        let candidates: SmallVec<[StyleColor; 4]> = candidates.into_iter().collect();
        if candidates.len() == 1 {
            debug!("rejecting color-contrast() with a single candidate");
            return Err(ColorError::ContrastCandidateCount(1));
        }
        if let Some(target) = target {
            if candidates.is_empty() {
                return Err(ColorError::TargetWithoutCandidates);
            }
            let ratio = target.ratio();
            if !ratio.is_finite() || ratio < 1.0 {
                debug!(ratio, "rejecting contrast target");
                return Err(ColorError::InvalidContrastTarget(ratio));
            }
        }
        Ok(Self {
            against,
            candidates,
            target,
        })
    }

    /// `contrast-color(<against>)`.
    pub fn black_or_white(against: StyleColor) -> Self {
        Self {
            against,
            candidates: SmallVec::new(),
            target: None,
        }
    }

    /// The background being contrasted against.
    #[inline]
    pub fn against(&self) -> &StyleColor {
        &self.against
    }

    /// The candidates, in preference order. Empty for `contrast-color()`.
    #[inline]
    pub fn candidates(&self) -> &[StyleColor] {
        &self.candidates
    }

    /// The optional target.
    #[inline]
    pub fn target(&self) -> Option<ContrastTarget> {
        self.target
    }
}
